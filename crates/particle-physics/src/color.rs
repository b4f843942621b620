//! Group colors

use serde::{Deserialize, Serialize};

/// Linear RGB color, components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl Color {
    pub const fn new(red: f32, green: f32, blue: f32) -> Self {
        Self { red, green, blue }
    }

    /// Evenly spaced fully saturated hue for group `id` out of `max_id`.
    pub fn from_id(id: usize, max_id: usize) -> Self {
        Self::from_hue(id as f32 / max_id.max(1) as f32, 1.0, 1.0)
    }

    /// HSV to RGB. Only the fractional part of `hue` is used.
    pub fn from_hue(hue: f32, saturation: f32, value: f32) -> Self {
        let hf = hue.rem_euclid(1.0) * 6.0;
        let sextant = (hf as u32).min(5);
        let f = hf - sextant as f32;

        let v = value;
        let p = value * (1.0 - saturation);
        let q = value * (1.0 - saturation * f);
        let t = value * (1.0 - saturation * (1.0 - f));

        match sextant {
            0 => Self::new(v, t, p),
            1 => Self::new(q, v, p),
            2 => Self::new(p, v, t),
            3 => Self::new(p, q, v),
            4 => Self::new(t, p, v),
            _ => Self::new(v, p, q),
        }
    }

    pub fn to_array(self, alpha: f32) -> [f32; 4] {
        [self.red, self.green, self.blue, alpha]
    }
}
