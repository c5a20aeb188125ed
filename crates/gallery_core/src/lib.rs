#![forbid(unsafe_code)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::suboptimal_flops)]

//! # Gallery Core
//!
//! Framework-independent models behind the widget gallery screens.
//!
//! - **heatmap**: pads sparse daily activity into a fixed calendar grid
//! - **dual_slider**: two-handle range slider with stepped, non-crossing drags
//! - **unit_curve**: cubic Bézier timing curve with draggable control points
//! - **overlay**: places recognized text over an image
//! - **sensor**: injected sensor capabilities and the headphone view-model
//!
//! Every model is synchronous and owns no platform resources, so each one
//! can be driven directly from tests.
//!
//! ## Example
//!
//! ```rust
//! use gallery_core::prelude::*;
//!
//! let state = RangeState::new(0.2, 0.8, 0.0..=1.0, 0.01).unwrap();
//! let ratio = SliderGeometry::default().handle_to_track_ratio();
//!
//! // Dragging the lower handle onto the upper one is ignored.
//! let next = state.on_drag(Handle::Lower, 1.0, ratio).unwrap();
//! assert_eq!(next, state);
//! ```

pub mod dual_slider;
pub mod error;
pub mod heatmap;
pub mod overlay;
pub mod sensor;
pub mod unit_curve;

pub use error::{Error, Result};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::dual_slider::{DualSlider, Handle, RangeState, SliderError, SliderGeometry};
    pub use crate::error::{Error, Result};
    pub use crate::heatmap::{DayActivity, GridError, GridFiller, HeatMap, Intensity};
    pub use crate::overlay::{NormalizedRect, TextBlock, TextRecognizer, ViewRect};
    pub use crate::sensor::{HeadphoneManager, Sensor, SensorError, SimulatedSensor};
    pub use crate::unit_curve::{CanvasSize, ControlPoint, TimingCurveEditor, UnitCurve, UnitPoint};
}
