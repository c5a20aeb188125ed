//! Timing-curve editor.
//!
//! A [`UnitCurve`] is a cubic Bézier running from `(0, 0)` to `(1, 1)` with
//! two free control points. The x axis is elapsed time and the y axis is
//! animation progress, so evaluating the curve means solving `x(s) = t` for
//! the curve parameter and reading off `y(s)`.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lowest progress value a control point may be dragged to.
pub const MIN_PROGRESS: f64 = -0.2;
/// Highest progress value a control point may be dragged to.
pub const MAX_PROGRESS: f64 = 1.2;
/// Samples used when tracing the curve path.
pub const PATH_STEPS: usize = 100;
/// Default animation duration in seconds.
pub const DEFAULT_DURATION: f64 = 0.5;

const NEWTON_ITERATIONS: usize = 8;
const BISECTION_ITERATIONS: usize = 64;
const EPSILON: f64 = 1e-7;

/// Errors from the curve editor.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    /// A coordinate was NaN or infinite.
    #[error("non-finite coordinate ({x}, {y})")]
    NonFinite {
        /// X coordinate.
        x: f64,
        /// Y coordinate.
        y: f64,
    },

    /// The canvas has no area.
    #[error("canvas {width}x{height} has no area")]
    EmptyCanvas {
        /// Canvas width.
        width: f64,
        /// Canvas height.
        height: f64,
    },
}

/// A point in unit space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitPoint {
    /// Time axis.
    pub x: f64,
    /// Progress axis.
    pub y: f64,
}

impl UnitPoint {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for UnitPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Size of the drawing canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl CanvasSize {
    /// Creates a size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Canvas position of a unit point; y grows downward.
    #[must_use]
    pub fn position_of(&self, point: UnitPoint) -> (f64, f64) {
        (point.x * self.width, (1.0 - point.y) * self.height)
    }

    /// Unit point under a canvas location, clamped to the editable area.
    ///
    /// # Errors
    ///
    /// Returns an error for non-finite locations or an empty canvas.
    pub fn unit_point_at(&self, x: f64, y: f64) -> Result<UnitPoint, CurveError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(CurveError::NonFinite { x, y });
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(CurveError::EmptyCanvas {
                width: self.width,
                height: self.height,
            });
        }
        Ok(UnitPoint::new(
            (x / self.width).clamp(0.0, 1.0),
            (1.0 - y / self.height).clamp(MIN_PROGRESS, MAX_PROGRESS),
        ))
    }
}

/// Cubic Bézier timing curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitCurve {
    ax: f64,
    bx: f64,
    cx: f64,
    ay: f64,
    by: f64,
    cy: f64,
}

impl UnitCurve {
    /// Builds a curve from its two control points.
    #[must_use]
    pub fn bezier(start_control: UnitPoint, end_control: UnitPoint) -> Self {
        let cx = 3.0 * start_control.x;
        let bx = 3.0 * (end_control.x - start_control.x) - cx;
        let cy = 3.0 * start_control.y;
        let by = 3.0 * (end_control.y - start_control.y) - cy;
        Self {
            ax: 1.0 - cx - bx,
            bx,
            cx,
            ay: 1.0 - cy - by,
            by,
            cy,
        }
    }

    /// Identity curve.
    #[must_use]
    pub fn linear() -> Self {
        Self::bezier(UnitPoint::new(0.0, 0.0), UnitPoint::new(1.0, 1.0))
    }

    /// Progress at time fraction `t`, clamped to `[0, 1]`.
    #[must_use]
    pub fn value_at(&self, t: f64) -> f64 {
        if t.is_nan() {
            return 0.0;
        }
        let t = t.clamp(0.0, 1.0);
        self.sample_y(self.solve_x(t))
    }

    fn sample_x(&self, s: f64) -> f64 {
        ((self.ax * s + self.bx) * s + self.cx) * s
    }

    fn sample_y(&self, s: f64) -> f64 {
        ((self.ay * s + self.by) * s + self.cy) * s
    }

    fn sample_dx(&self, s: f64) -> f64 {
        (3.0 * self.ax * s + 2.0 * self.bx) * s + self.cx
    }

    fn solve_x(&self, t: f64) -> f64 {
        let mut s = t;
        for _ in 0..NEWTON_ITERATIONS {
            let err = self.sample_x(s) - t;
            if err.abs() < EPSILON {
                return s;
            }
            let slope = self.sample_dx(s);
            if slope.abs() < 1e-6 {
                break;
            }
            s -= err / slope;
        }

        // x(s) is monotonic when both control x values lie in [0, 1].
        let (mut lo, mut hi) = (0.0, 1.0);
        s = t;
        for _ in 0..BISECTION_ITERATIONS {
            let x = self.sample_x(s);
            if (x - t).abs() < EPSILON {
                break;
            }
            if x < t {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) / 2.0;
        }
        s
    }
}

/// Which control point is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlPoint {
    /// Control point attached to the start of the curve.
    Start,
    /// Control point attached to the end of the curve.
    End,
}

/// Editor state: two control points and a duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingCurveEditor {
    /// Start control point.
    pub start: UnitPoint,
    /// End control point.
    pub end: UnitPoint,
    /// Animation duration in seconds.
    pub duration: f64,
}

impl Default for TimingCurveEditor {
    fn default() -> Self {
        Self {
            start: UnitPoint::new(1.0, 1.0),
            end: UnitPoint::new(0.0, 0.0),
            duration: DEFAULT_DURATION,
        }
    }
}

impl TimingCurveEditor {
    /// The curve described by the current control points.
    #[must_use]
    pub fn curve(&self) -> UnitCurve {
        UnitCurve::bezier(self.start, self.end)
    }

    /// Current position of a control point.
    #[must_use]
    pub const fn point(&self, which: ControlPoint) -> UnitPoint {
        match which {
            ControlPoint::Start => self.start,
            ControlPoint::End => self.end,
        }
    }

    /// Moves a control point to the canvas location `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns an error for non-finite locations or an empty canvas.
    pub fn drag(
        &mut self,
        which: ControlPoint,
        x: f64,
        y: f64,
        canvas: CanvasSize,
    ) -> Result<UnitPoint, CurveError> {
        let point = canvas.unit_point_at(x, y)?;
        match which {
            ControlPoint::Start => self.start = point,
            ControlPoint::End => self.end = point,
        }
        Ok(point)
    }

    /// Nudges a control point by a delta in unit space, keeping it editable.
    pub fn nudge(&mut self, which: ControlPoint, dx: f64, dy: f64) -> UnitPoint {
        let p = self.point(which);
        let moved = UnitPoint::new(
            (p.x + dx).clamp(0.0, 1.0),
            (p.y + dy).clamp(MIN_PROGRESS, MAX_PROGRESS),
        );
        match which {
            ControlPoint::Start => self.start = moved,
            ControlPoint::End => self.end = moved,
        }
        moved
    }

    /// Animation progress after `elapsed` seconds.
    #[must_use]
    pub fn progress(&self, elapsed: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        self.curve().value_at(elapsed / self.duration)
    }

    /// Canvas points tracing the curve from `t = 0` to `t = 1`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn sample_path(&self, canvas: CanvasSize, steps: usize) -> Vec<(f64, f64)> {
        let curve = self.curve();
        let steps = steps.max(1);
        (0..=steps)
            .map(|i| {
                let t = i as f64 / steps as f64;
                canvas.position_of(UnitPoint::new(t, curve.value_at(t)))
            })
            .collect()
    }

    /// Plots the curve on a `width x height` character grid.
    ///
    /// Rows cover progress from [`MAX_PROGRESS`] at the top to
    /// [`MIN_PROGRESS`] at the bottom. Control points are drawn as `1` and `2`.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn plot(&self, width: usize, height: usize) -> String {
        if width < 2 || height < 2 {
            return String::new();
        }
        let mut grid = vec![vec![' '; width]; height];
        let span = MAX_PROGRESS - MIN_PROGRESS;
        let row_of = |y: f64| {
            let frac = (MAX_PROGRESS - y.clamp(MIN_PROGRESS, MAX_PROGRESS)) / span;
            ((frac * (height - 1) as f64).round() as usize).min(height - 1)
        };
        let col_of = |x: f64| ((x.clamp(0.0, 1.0) * (width - 1) as f64).round() as usize).min(width - 1);

        let zero = row_of(0.0);
        let one = row_of(1.0);
        for (col, cell) in grid[zero].iter_mut().enumerate() {
            *cell = if col == 0 { '└' } else { '─' };
        }
        for row in grid.iter_mut().take(zero).skip(one) {
            row[0] = '│';
        }

        for (x, y) in self.sample_path(CanvasSize::new(1.0, 1.0), PATH_STEPS) {
            grid[row_of(1.0 - y)][col_of(x)] = '•';
        }
        grid[row_of(self.start.y)][col_of(self.start.x)] = '1';
        grid[row_of(self.end.y)][col_of(self.end.x)] = '2';

        grid.into_iter()
            .map(|row| row.into_iter().collect::<String>().trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
