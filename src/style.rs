use egui::Color32;
use serde::{Deserialize, Serialize};

/// Outline paint of a shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Color32,
    pub width: f32,
    /// `false` means "no pen": the outline is not painted at all
    pub enabled: bool,
}

impl StrokeStyle {
    pub const NONE: Self = Self {
        color: Color32::BLACK,
        width: 0.0,
        enabled: false,
    };

    pub fn new(color: Color32, width: f32) -> Self {
        Self {
            color,
            width,
            enabled: true,
        }
    }

    /// Convert to an egui stroke, scaled for the current zoom
    pub fn to_egui(&self, zoom: f32) -> egui::Stroke {
        if self.is_visible() {
            egui::Stroke::new(self.width.max(0.0) * zoom, self.color)
        } else {
            egui::Stroke::NONE
        }
    }

    pub fn is_visible(&self) -> bool {
        self.enabled && self.width > 0.0
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::new(Color32::BLACK, 1.0)
    }
}

/// Interior paint of a shape
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Fill {
    #[default]
    None,
    Solid(Color32),
}

impl Fill {
    pub fn color(&self) -> Option<Color32> {
        match self {
            Fill::None => None,
            Fill::Solid(color) => Some(*color),
        }
    }

    /// The fill color egui should use; transparent when there is no fill
    pub fn to_egui(&self) -> Color32 {
        self.color().unwrap_or(Color32::TRANSPARENT)
    }
}

/// Stroke and fill applied together to new or existing shapes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub stroke: StrokeStyle,
    pub fill: Fill,
}

impl Style {
    /// Defaults every shape starts with: thin black outline, white interior.
    pub fn shape_default() -> Self {
        Self {
            stroke: StrokeStyle::new(Color32::BLACK, 1.0),
            fill: Fill::Solid(Color32::WHITE),
        }
    }

    /// Defaults for the drawing tools: black 2px pen, no fill.
    pub fn tool_default() -> Self {
        Self {
            stroke: StrokeStyle::new(Color32::BLACK, 2.0),
            fill: Fill::None,
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::tool_default()
    }
}

/// Format a color as `#rrggbb` (alpha is dropped)
pub fn color_to_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

/// Parse a CSS-ish color value.
///
/// Understands `#rgb`, `#rrggbb`, `rgb(r, g, b)` and a handful of names.
/// Anything else falls back to black.
pub fn parse_color(value: &str) -> Color32 {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex).unwrap_or(Color32::BLACK);
    }
    if let Some(inner) = value.strip_prefix("rgb(").and_then(|v| v.strip_suffix(')')) {
        let parts: Vec<u8> = inner
            .split(',')
            .filter_map(|c| c.trim().parse::<i32>().ok())
            .map(|c| c.clamp(0, 255) as u8)
            .collect();
        if let [r, g, b] = parts[..] {
            return Color32::from_rgb(r, g, b);
        }
        return Color32::BLACK;
    }
    named_color(value).unwrap_or(Color32::BLACK)
}

fn parse_hex(hex: &str) -> Option<Color32> {
    let digit = |i: usize| u8::from_str_radix(hex.get(i..i + 1)?, 16).ok();
    let pair = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    match hex.len() {
        3 => Some(Color32::from_rgb(
            digit(0)? * 17,
            digit(1)? * 17,
            digit(2)? * 17,
        )),
        6 => Some(Color32::from_rgb(pair(0)?, pair(2)?, pair(4)?)),
        _ => None,
    }
}

fn named_color(name: &str) -> Option<Color32> {
    let color = match name.to_ascii_lowercase().as_str() {
        "black" => Color32::BLACK,
        "white" => Color32::WHITE,
        "red" => Color32::from_rgb(255, 0, 0),
        "green" => Color32::from_rgb(0, 128, 0),
        "lime" => Color32::from_rgb(0, 255, 0),
        "blue" => Color32::from_rgb(0, 0, 255),
        "yellow" => Color32::from_rgb(255, 255, 0),
        "cyan" => Color32::from_rgb(0, 255, 255),
        "magenta" => Color32::from_rgb(255, 0, 255),
        "gray" | "grey" => Color32::from_rgb(128, 128, 128),
        "orange" => Color32::from_rgb(255, 165, 0),
        "purple" => Color32::from_rgb(128, 0, 128),
        _ => return None,
    };
    Some(color)
}
