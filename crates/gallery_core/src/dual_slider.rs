//! Dual-handle range slider.
//!
//! [`RangeState`] holds the two handle values and computes the result of a
//! drag. [`DualSlider`] wraps it with track geometry, drag tracking and an
//! editing-changed notification for the rendering layer.
//!
//! # Example
//!
//! ```rust
//! use gallery_core::dual_slider::{DualSlider, Handle, RangeState, SliderGeometry};
//!
//! let state = RangeState::new(0.2, 0.8, 0.0..=1.0, 0.01).unwrap();
//! let mut slider = DualSlider::new(state, SliderGeometry::default()).unwrap();
//!
//! slider.drag(Handle::Lower, 0.4).unwrap();
//! slider.end_drag();
//! assert!((slider.state().lower() - 0.4).abs() < 1e-9);
//! ```

use std::fmt;
use std::ops::RangeInclusive;

use thiserror::Error;
use tracing::debug;

/// Track width of the reference layout, in points.
pub const DEFAULT_TRACK_WIDTH: f64 = 338.0;
/// Handle width of the reference layout, in points.
pub const DEFAULT_HANDLE_WIDTH: f64 = 38.0;

/// Errors produced by the slider model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SliderError {
    /// A numeric input was NaN or infinite.
    #[error("non-finite slider input: {0}")]
    NonFinite(f64),

    /// The value range is empty or inverted.
    #[error("invalid slider range {min}..={max}")]
    InvalidRange {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// The step is zero or negative.
    #[error("slider step must be positive, got {0}")]
    InvalidStep(f64),

    /// Handle values are outside the range or out of order.
    #[error("handle values {lower}/{upper} violate min <= lower <= upper <= max")]
    OutOfOrder {
        /// Lower handle value.
        lower: f64,
        /// Upper handle value.
        upper: f64,
    },

    /// Handles are closer than the minimum separation.
    #[error("handles {lower}/{upper} are closer than {separation}")]
    Overlap {
        /// Lower handle value.
        lower: f64,
        /// Upper handle value.
        upper: f64,
        /// Required separation.
        separation: f64,
    },

    /// Track geometry is unusable.
    #[error("handle width {handle} must be positive and smaller than track width {track}")]
    InvalidGeometry {
        /// Track width.
        track: f64,
        /// Handle width.
        handle: f64,
    },
}

/// One of the two slider handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    /// The left handle.
    Lower,
    /// The right handle.
    Upper,
}

impl Handle {
    /// The other handle.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Lower => Self::Upper,
            Self::Upper => Self::Lower,
        }
    }
}

/// Physical track layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderGeometry {
    /// Full track width.
    pub track_width: f64,
    /// Width of one handle.
    pub handle_width: f64,
}

impl Default for SliderGeometry {
    fn default() -> Self {
        Self {
            track_width: DEFAULT_TRACK_WIDTH,
            handle_width: DEFAULT_HANDLE_WIDTH,
        }
    }
}

impl SliderGeometry {
    /// Creates a validated geometry.
    ///
    /// # Errors
    ///
    /// Returns [`SliderError::InvalidGeometry`] unless
    /// `0 < handle_width < track_width` and both are finite.
    pub fn new(track_width: f64, handle_width: f64) -> Result<Self, SliderError> {
        let geometry = Self {
            track_width,
            handle_width,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    /// Checks the geometry invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SliderError::InvalidGeometry`] on violation.
    pub fn validate(&self) -> Result<(), SliderError> {
        let ok = self.track_width.is_finite()
            && self.handle_width.is_finite()
            && self.handle_width > 0.0
            && self.handle_width < self.track_width;
        if ok {
            Ok(())
        } else {
            Err(SliderError::InvalidGeometry {
                track: self.track_width,
                handle: self.handle_width,
            })
        }
    }

    /// Handle width over track width; sets the minimum handle separation.
    #[must_use]
    pub fn handle_to_track_ratio(&self) -> f64 {
        self.handle_width / self.track_width
    }

    /// Distance a handle can travel.
    #[must_use]
    pub fn usable_length(&self) -> f64 {
        self.track_width - self.handle_width
    }

    /// Normalizes a pointer position to `[0, 1]` of the usable length.
    #[must_use]
    pub fn fraction_at(&self, x: f64) -> f64 {
        (x / self.usable_length()).clamp(0.0, 1.0)
    }
}

/// Values of both handles plus the range and step they live on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeState {
    lower: f64,
    upper: f64,
    min: f64,
    max: f64,
    step: f64,
}

impl RangeState {
    /// Creates a validated state.
    ///
    /// # Errors
    ///
    /// Returns an error for non-finite inputs, an empty range, a non-positive
    /// step, or handle values violating `min <= lower <= upper <= max`.
    pub fn new(
        lower: f64,
        upper: f64,
        range: RangeInclusive<f64>,
        step: f64,
    ) -> Result<Self, SliderError> {
        let (min, max) = range.into_inner();
        for value in [lower, upper, min, max, step] {
            if !value.is_finite() {
                return Err(SliderError::NonFinite(value));
            }
        }
        if min >= max {
            return Err(SliderError::InvalidRange { min, max });
        }
        if step <= 0.0 {
            return Err(SliderError::InvalidStep(step));
        }
        if !(min <= lower && lower <= upper && upper <= max) {
            return Err(SliderError::OutOfOrder { lower, upper });
        }
        Ok(Self {
            lower,
            upper,
            min,
            max,
            step,
        })
    }

    /// Lower handle value.
    #[must_use]
    pub const fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper handle value.
    #[must_use]
    pub const fn upper(&self) -> f64 {
        self.upper
    }

    /// Value of the given handle.
    #[must_use]
    pub const fn value(&self, handle: Handle) -> f64 {
        match handle {
            Handle::Lower => self.lower,
            Handle::Upper => self.upper,
        }
    }

    /// Range bounds.
    #[must_use]
    pub const fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Step size.
    #[must_use]
    pub const fn step(&self) -> f64 {
        self.step
    }

    /// Width of the value range.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Minimum distance between handles, in value space.
    #[must_use]
    pub fn separation(&self, handle_to_track_ratio: f64) -> f64 {
        handle_to_track_ratio * self.span()
    }

    /// Position of `value` along a track of `usable` length.
    #[must_use]
    pub fn offset_of(&self, value: f64, usable: f64) -> f64 {
        (value - self.min) / self.span() * usable
    }

    /// Computes the state after dragging `handle` to `fraction` of the track.
    ///
    /// A drag that would bring the handles closer than the separation leaves
    /// the state unchanged. The rejection compares the unclamped stepped
    /// value strictly, so landing exactly on the boundary is also rejected.
    /// When the handles already sit closer than the separation and the
    /// allowed bound falls outside the range, every drag is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`SliderError::NonFinite`] if `fraction` is NaN or infinite.
    pub fn on_drag(
        &self,
        handle: Handle,
        fraction: f64,
        handle_to_track_ratio: f64,
    ) -> Result<Self, SliderError> {
        if !fraction.is_finite() {
            return Err(SliderError::NonFinite(fraction));
        }
        let fraction = fraction.clamp(0.0, 1.0);
        let raw = fraction.mul_add(self.span(), self.min);
        let stepped = (raw / self.step).round() * self.step;
        let separation = self.separation(handle_to_track_ratio);

        let mut next = *self;
        match handle {
            Handle::Lower => {
                let max_allowed = self.upper - separation;
                if stepped >= max_allowed || max_allowed < self.min {
                    debug!(stepped, max_allowed, "lower handle drag rejected");
                    return Ok(next);
                }
                next.lower = stepped.max(self.min).min(max_allowed);
            }
            Handle::Upper => {
                let min_allowed = self.lower + separation;
                if stepped <= min_allowed || min_allowed > self.max {
                    debug!(stepped, min_allowed, "upper handle drag rejected");
                    return Ok(next);
                }
                next.upper = stepped.min(self.max).max(min_allowed);
            }
        }
        Ok(next)
    }
}

type EditingHandler = Box<dyn FnMut(bool)>;

/// Interactive slider: state, geometry and drag notifications.
pub struct DualSlider {
    state: RangeState,
    geometry: SliderGeometry,
    dragging: Option<Handle>,
    on_editing_changed: Option<EditingHandler>,
}

impl fmt::Debug for DualSlider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DualSlider")
            .field("state", &self.state)
            .field("geometry", &self.geometry)
            .field("dragging", &self.dragging)
            .field("on_editing_changed", &self.on_editing_changed.is_some())
            .finish()
    }
}

impl DualSlider {
    /// Creates a slider.
    ///
    /// # Errors
    ///
    /// Returns an error if the geometry is invalid or the handles start
    /// closer than the minimum separation.
    pub fn new(state: RangeState, geometry: SliderGeometry) -> Result<Self, SliderError> {
        geometry.validate()?;
        let separation = state.separation(geometry.handle_to_track_ratio());
        if state.upper - state.lower < separation {
            return Err(SliderError::Overlap {
                lower: state.lower,
                upper: state.upper,
                separation,
            });
        }
        Ok(Self {
            state,
            geometry,
            dragging: None,
            on_editing_changed: None,
        })
    }

    /// Registers the editing-changed subscriber.
    ///
    /// `true` is delivered on every drag event, `false` once when a drag ends.
    #[must_use]
    pub fn on_editing_changed<F>(mut self, handler: F) -> Self
    where
        F: FnMut(bool) + 'static,
    {
        self.on_editing_changed = Some(Box::new(handler));
        self
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &RangeState {
        &self.state
    }

    /// Track geometry.
    #[must_use]
    pub const fn geometry(&self) -> &SliderGeometry {
        &self.geometry
    }

    /// Handle currently being dragged.
    #[must_use]
    pub const fn dragging(&self) -> Option<Handle> {
        self.dragging
    }

    /// Drags `handle` to a normalized track position.
    ///
    /// Returns whether the state changed.
    ///
    /// # Errors
    ///
    /// Returns [`SliderError::NonFinite`] for NaN or infinite input.
    pub fn drag(&mut self, handle: Handle, fraction: f64) -> Result<bool, SliderError> {
        self.notify(true);
        self.dragging = Some(handle);
        let next = self
            .state
            .on_drag(handle, fraction, self.geometry.handle_to_track_ratio())?;
        let changed = next != self.state;
        self.state = next;
        Ok(changed)
    }

    /// Drags `handle` to pointer position `x` measured from the track start.
    ///
    /// # Errors
    ///
    /// Returns [`SliderError::NonFinite`] for NaN or infinite input.
    pub fn drag_to(&mut self, handle: Handle, x: f64) -> Result<bool, SliderError> {
        if !x.is_finite() {
            self.notify(true);
            return Err(SliderError::NonFinite(x));
        }
        self.drag(handle, self.geometry.fraction_at(x))
    }

    /// Ends the current drag, if any.
    pub fn end_drag(&mut self) {
        if self.dragging.take().is_some() {
            self.notify(false);
        }
    }

    /// Offset of `handle` along the usable track.
    #[must_use]
    pub fn handle_offset(&self, handle: Handle) -> f64 {
        self.state
            .offset_of(self.state.value(handle), self.geometry.usable_length())
    }

    /// Renders the track as `width` cells.
    ///
    /// The selected span is drawn heavy, the rest light, and the handles as
    /// dots. The handle being dragged is drawn hollow.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn render(&self, width: usize) -> String {
        if width < 2 {
            return "●".repeat(width);
        }
        let last = (width - 1) as f64;
        let cell = |handle| (self.handle_offset(handle) / self.geometry.usable_length() * last).round() as usize;
        let lo = cell(Handle::Lower).min(width - 1);
        let hi = cell(Handle::Upper).min(width - 1);

        (0..width)
            .map(|i| {
                let knob = |h| if self.dragging == Some(h) { '○' } else { '●' };
                if i == lo {
                    knob(Handle::Lower)
                } else if i == hi {
                    knob(Handle::Upper)
                } else if i > lo && i < hi {
                    '━'
                } else {
                    '─'
                }
            })
            .collect()
    }

    fn notify(&mut self, editing: bool) {
        if let Some(handler) = self.on_editing_changed.as_mut() {
            handler(editing);
        }
    }
}
