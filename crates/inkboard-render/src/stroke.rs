//! Freehand stroke rendering with velocity-responsive width.

use crate::surface::Surface;
use inkboard_core::Color;
use kurbo::Point;

/// Sample spacing (logical units) at which the width falloff bottoms out.
const SPEED_FALLOFF: f64 = 20.0;

/// The width never drops below this fraction of the base width.
const MIN_WIDTH_FRACTION: f64 = 0.3;

/// Exponential-moving-average factor for width changes; lower = smoother.
const WIDTH_SMOOTHING: f64 = 0.15;

/// Per-sample target width: fast movement thins the line, floored at 30% of
/// the base width.
fn target_width(base_width: f64, dist: f64) -> f64 {
    (base_width * (1.0 - dist / SPEED_FALLOFF)).max(base_width * MIN_WIDTH_FRACTION)
}

/// An in-progress freehand stroke.
///
/// The stroke captures its color and base width when it begins and renders
/// round-capped, round-joined segments as samples arrive. Width follows
/// pointer velocity (quick flicks thin the line, slow movement restores it
/// toward the base width), smoothed so it never jumps between samples.
///
/// Strokes are transient: once ended only their pixel effect on the surface
/// survives, via the snapshot the board captures afterward.
#[derive(Debug, Clone)]
pub struct StrokeRenderer {
    last: Point,
    color: Color,
    base_width: f64,
    current_width: f64,
}

impl StrokeRenderer {
    /// Start a path at `point`, stamping the first dab so a tap leaves a dot.
    pub fn begin(point: Point, color: Color, base_width: f64, surface: &mut Surface) -> Self {
        surface.fill_disc(point, base_width / 2.0, color);
        Self {
            last: point,
            color,
            base_width,
            current_width: base_width,
        }
    }

    /// Extend the path to `point`, rendering the connecting segment.
    pub fn extend(&mut self, point: Point, surface: &mut Surface) {
        let dist = self.last.distance(point);
        let target = target_width(self.base_width, dist);
        self.current_width =
            self.current_width * (1.0 - WIDTH_SMOOTHING) + target * WIDTH_SMOOTHING;

        surface.stamp_segment(self.last, point, self.current_width, self.color);
        self.last = point;
    }

    /// The smoothed width the next segment would be drawn at.
    pub fn current_width(&self) -> f64 {
        self.current_width
    }
}
