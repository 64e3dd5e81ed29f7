//coursecal/src/color_utils.rs

// Per-course display colors.
// Known courses get a preset; unseen courses get a random HSL color the first
// time they are looked up, and keep it for as long as the persisted map lives.
// This file has NO dependency on ratatui so it can be used from core logic and tests.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const PRESET_COURSE_COLORS: [(&str, &str); 4] = [
    ("CS101", "#4caf50"),
    ("MATH200", "#2196f3"),
    ("PHYS150", "#f44336"),
    ("ENG110", "#9c27b0"),
];

const GENERATED_SATURATION: u32 = 70;
const GENERATED_LIGHTNESS: u32 = 50;

/// Course tag -> color string (`#rrggbb` or `hsl(h, s%, l%)`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseColors {
    map: BTreeMap<String, String>,
}

impl CourseColors {
    /// The built-in presets only.
    pub fn with_presets() -> Self {
        let map = PRESET_COURSE_COLORS
            .iter()
            .map(|(c, col)| (c.to_string(), col.to_string()))
            .collect();
        Self { map }
    }

    /// Presets, then `extra` presets (from config), then `saved` assignments on top.
    pub fn layered<'a>(
        extra: impl IntoIterator<Item = (&'a String, &'a String)>,
        saved: CourseColors,
    ) -> Self {
        let mut colors = Self::with_presets();
        for (course, color) in extra {
            colors.map.insert(course.clone(), color.clone());
        }
        colors.map.extend(saved.map);
        colors
    }

    pub fn get(&self, course: &str) -> Option<&str> {
        self.map.get(course).map(String::as_str)
    }

    /// Returns the course's color, assigning a random one if it has none.
    /// The flag is true when a new color was recorded and the map needs saving.
    pub fn color_for(&mut self, course: &str) -> (String, bool) {
        if let Some(existing) = self.map.get(course) {
            return (existing.clone(), false);
        }
        let color = random_hsl();
        log::debug!("Assigned color {} to course '{}'", color, course);
        self.map.insert(course.to_string(), color.clone());
        (color, true)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// `hsl(H, 70%, 50%)` with H drawn uniformly from [0, 360).
pub fn random_hsl() -> String {
    let hue = fastrand::u32(0..360);
    format!(
        "hsl({}, {}%, {}%)",
        hue, GENERATED_SATURATION, GENERATED_LIGHTNESS
    )
}

/// Terminal-friendly RGB for either supported color notation.
pub fn parse_color(color: &str) -> Option<(u8, u8, u8)> {
    let color = color.trim();
    if color.starts_with('#') {
        return parse_hex_to_u8(color);
    }
    let (h, s, l) = parse_hsl(color)?;
    let (r, g, b) = hsl_to_rgb(h, s, l);
    Some((
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
    ))
}

/// Parses `hsl(h, s%, l%)` into (degrees, 0..1, 0..1).
fn parse_hsl(color: &str) -> Option<(f32, f32, f32)> {
    let inner = color
        .to_ascii_lowercase()
        .strip_prefix("hsl(")?
        .strip_suffix(')')?
        .to_string();
    let mut parts = inner.split(',').map(str::trim);
    let h = parts.next()?.parse::<f32>().ok()?;
    let s = parts.next()?.strip_suffix('%')?.parse::<f32>().ok()?;
    let l = parts.next()?.strip_suffix('%')?.parse::<f32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((h.rem_euclid(360.0), (s / 100.0).clamp(0.0, 1.0), (l / 100.0).clamp(0.0, 1.0)))
}

/// Helper: HSL to RGB conversion
fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (f32, f32, f32) {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r1, g1, b1) = if (0.0..60.0).contains(&h) {
        (c, x, 0.0)
    } else if (60.0..120.0).contains(&h) {
        (x, c, 0.0)
    } else if (120.0..180.0).contains(&h) {
        (0.0, c, x)
    } else if (180.0..240.0).contains(&h) {
        (0.0, x, c)
    } else if (240.0..300.0).contains(&h) {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    (r1 + m, g1 + m, b1 + m)
}

/// Determines if text on top of this color should be light.
pub fn is_dark(r: u8, g: u8, b: u8) -> bool {
    let brightness = (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32) / 255.0;
    brightness < 0.5
}

/// Parse a hex color string like "#RRGGBB" or "RRGGBB" into u8 tuple.
pub fn parse_hex_to_u8(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() < 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}
