//! Tool selection and color palette state.

use crate::color::Color;
use serde::{Deserialize, Serialize};

/// Maximum number of colors kept in the recent tray.
pub const RECENT_COLORS_CAP: usize = 5;

/// Width multiplier applied while the eraser is active.
pub const ERASER_WIDTH_FACTOR: f64 = 3.0;

/// Default stroke width in logical units.
pub const DEFAULT_LINE_WIDTH: f64 = 5.0;

/// Colors the tray is seeded with on a fresh session.
const DEFAULT_TRAY: [Color; RECENT_COLORS_CAP] = [
    Color::opaque(0x0f, 0x17, 0x2a),
    Color::opaque(0x3b, 0x82, 0xf6),
    Color::opaque(0xef, 0x44, 0x44),
    Color::opaque(0x10, 0xb9, 0x81),
    Color::opaque(0xf5, 0x9e, 0x0b),
];

/// Available drawing tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Tool {
    #[default]
    Brush,
    Eraser,
}

/// Per-session tool and color state.
///
/// One palette exists per board instance; it is consulted when a stroke
/// begins and mutated only by explicit tool selection. Nothing here is
/// persisted across sessions; only pixels survive, via snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Palette {
    pub tool: Tool,
    pub stroke_color: Color,
    pub background_color: Color,
    pub line_width: f64,
    recent: Vec<Color>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            tool: Tool::default(),
            stroke_color: DEFAULT_TRAY[0],
            background_color: Color::WHITE,
            line_width: DEFAULT_LINE_WIDTH,
            recent: DEFAULT_TRAY.to_vec(),
        }
    }
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.background_color = color;
    }

    /// Color-picker entry point.
    ///
    /// Sets the stroke color, switches back to the brush (picking a color
    /// exits eraser mode), and records the color in the tray if it is novel.
    /// A color already in the tray keeps its position.
    pub fn update_color(&mut self, color: Color) {
        self.stroke_color = color;
        self.tool = Tool::Brush;
        if !self.recent.contains(&color) {
            self.recent.insert(0, color);
            self.recent.truncate(RECENT_COLORS_CAP);
        }
    }

    /// Tray swatch entry point: re-selects a color without touching the tray
    /// or the active tool.
    pub fn select_from_tray(&mut self, color: Color) {
        self.stroke_color = color;
    }

    /// Recently used colors, most recent first.
    pub fn recent_colors(&self) -> &[Color] {
        &self.recent
    }

    /// The color a new stroke paints with. Erasing overpaints with the
    /// background color rather than clearing alpha.
    pub fn effective_color(&self) -> Color {
        match self.tool {
            Tool::Brush => self.stroke_color,
            Tool::Eraser => self.background_color,
        }
    }

    /// The width a new stroke starts at. The eraser is three times wider
    /// than the selected brush size; the stored width is left untouched.
    pub fn effective_width(&self) -> f64 {
        match self.tool {
            Tool::Brush => self.line_width,
            Tool::Eraser => self.line_width * ERASER_WIDTH_FACTOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let palette = Palette::new();
        assert_eq!(palette.tool, Tool::Brush);
        assert_eq!(palette.background_color, Color::WHITE);
        assert_eq!(palette.recent_colors().len(), RECENT_COLORS_CAP);
        assert_eq!(palette.stroke_color, palette.recent_colors()[0]);
    }

    #[test]
    fn test_recent_colors_capped_most_recent_first() {
        let mut palette = Palette::new();
        let added: Vec<Color> = (1..=6).map(|n| Color::opaque(n, n, n)).collect();
        for &c in &added {
            palette.update_color(c);
        }

        let recent = palette.recent_colors();
        assert_eq!(recent.len(), RECENT_COLORS_CAP);
        // Most recent first; the oldest of the six was evicted along with the
        // seeded defaults.
        for (i, &c) in added.iter().rev().take(RECENT_COLORS_CAP).enumerate() {
            assert_eq!(recent[i], c);
        }
        assert!(!recent.contains(&added[0]));
    }

    #[test]
    fn test_reselecting_a_tray_color_does_not_reorder() {
        let mut palette = Palette::new();
        let before = palette.recent_colors().to_vec();

        // The second swatch is already in the tray: no duplicate, no move.
        palette.update_color(before[1]);
        assert_eq!(palette.recent_colors(), &before[..]);
        assert_eq!(palette.stroke_color, before[1]);
    }

    #[test]
    fn test_tray_click_only_changes_stroke_color() {
        let mut palette = Palette::new();
        palette.set_tool(Tool::Eraser);
        let before = palette.recent_colors().to_vec();

        palette.select_from_tray(before[3]);
        assert_eq!(palette.stroke_color, before[3]);
        assert_eq!(palette.recent_colors(), &before[..]);
        // Unlike the picker, a swatch click leaves the tool alone.
        assert_eq!(palette.tool, Tool::Eraser);
    }

    #[test]
    fn test_picking_a_color_exits_eraser_mode() {
        let mut palette = Palette::new();
        palette.set_tool(Tool::Eraser);
        palette.update_color(Color::opaque(1, 2, 3));
        assert_eq!(palette.tool, Tool::Brush);
    }

    #[test]
    fn test_eraser_width_is_tripled_without_mutating_line_width() {
        let mut palette = Palette::new();
        palette.set_line_width(10.0);
        palette.set_tool(Tool::Eraser);

        assert!((palette.effective_width() - 30.0).abs() < f64::EPSILON);
        assert!((palette.line_width - 10.0).abs() < f64::EPSILON);

        palette.set_tool(Tool::Brush);
        assert!((palette.effective_width() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_eraser_paints_background_color() {
        let mut palette = Palette::new();
        palette.set_background_color(Color::opaque(30, 41, 59));
        palette.set_tool(Tool::Eraser);
        assert_eq!(palette.effective_color(), Color::opaque(30, 41, 59));

        palette.set_tool(Tool::Brush);
        assert_eq!(palette.effective_color(), palette.stroke_color);
    }
}
