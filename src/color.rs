// Stroke color for a particle: fixed hue, full saturation, 60% lightness,
// with the alpha driven by where the particle is in its life

use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hsla {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
    pub alpha: f64,
}

impl Hsla {
    pub const SATURATION: f64 = 100.0;
    pub const LIGHTNESS: f64 = 60.0;

    pub fn particle(hue: f64, alpha: f64) -> Hsla {
        Hsla {
            hue,
            saturation: Hsla::SATURATION,
            lightness: Hsla::LIGHTNESS,
            alpha: alpha.max(0.0).min(1.0),
        }
    }
}

// Formats as a CSS color string, e.g. `hsla(20,100%,60%,0.5)`
impl fmt::Display for Hsla {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "hsla({},{}%,{}%,{})",
            self.hue, self.saturation, self.lightness, self.alpha
        )
    }
}

/// Triangular wave over `age / lifetime`: 0 at birth, 1 at half-life, back to
/// 0 at death. Keeps particles from popping in and out.
pub fn fade_alpha(age: f64, lifetime: f64) -> f64 {
    if lifetime <= 0.0 {
        return 0.0;
    }
    let half = lifetime * 0.5;
    (((age + half) % lifetime) - half).abs() / half
}
