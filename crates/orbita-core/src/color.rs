//! Color model used for fills, strokes and glows.

/// A paint color as the scene expresses it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    /// Opaque RGB.
    Rgb(u8, u8, u8),
    /// RGB with an alpha in 0.0-1.0.
    Rgba(u8, u8, u8, f64),
    /// Hue in degrees, saturation and lightness in 0.0-1.0.
    Hsl(f64, f64, f64),
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Color = Color::Rgba(0, 0, 0, 0.0);

    /// Resolve to concrete channels. Alpha is clamped to 0.0-1.0.
    pub fn to_rgba(self) -> Rgba {
        match self {
            Color::Rgb(r, g, b) => Rgba { r, g, b, a: 1.0 },
            Color::Rgba(r, g, b, a) => Rgba {
                r,
                g,
                b,
                a: a.clamp(0.0, 1.0),
            },
            Color::Hsl(h, s, l) => {
                let (r, g, b) = hsl_to_rgb(h, s, l);
                Rgba { r, g, b, a: 1.0 }
            }
        }
    }
}

/// Resolved color channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

/// Convert HSL to RGB channels.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
    if s == 0.0 {
        let v = (l * 255.0) as u8;
        return (v, v, v);
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    let h = h.rem_euclid(360.0) / 360.0;

    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);

    ((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
