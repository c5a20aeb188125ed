//! Crate-wide error type.

use thiserror::Error;

use crate::dual_slider::SliderError;
use crate::heatmap::GridError;
use crate::sensor::SensorError;
use crate::unit_curve::CurveError;

/// Any error produced by a gallery model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Heat-map grid filling failed.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// Slider input was rejected.
    #[error(transparent)]
    Slider(#[from] SliderError),

    /// Timing-curve input was rejected.
    #[error(transparent)]
    Curve(#[from] CurveError),

    /// A sensor failed.
    #[error(transparent)]
    Sensor(#[from] SensorError),
}

/// Result alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
