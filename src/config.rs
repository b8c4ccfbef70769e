// Tunables for the vortex background. Every option has a default, so a
// plain `VortexConfig::default()` reproduces the stock header.

use wasm_bindgen::prelude::*;

// Below this viewport width (in CSS pixels) no canvas is created at all
pub const MOBILE_BREAKPOINT: f64 = 768.0;

// Scale applied to x, y and the frame counter before sampling the noise field
pub const NOISE_X_SCALE: f64 = 0.00125;
pub const NOISE_Y_SCALE: f64 = 0.00125;
pub const NOISE_Z_SCALE: f64 = 0.0005;
pub const NOISE_STEPS: f64 = 3.0;

pub const GLOW_FILTER: &str = "blur(6px) brightness(150%)";
pub const GLOW_COMPOSITE: &str = "lighter";

#[wasm_bindgen]
#[derive(Clone, Debug, PartialEq)]
pub struct VortexConfig {
    particle_count: usize,
    base_hue: f64,
    range_hue: f64,
    range_y: f64,
    base_speed: f64,
    range_speed: f64,
    base_radius: f64,
    range_radius: f64,
    base_ttl: f64,
    range_ttl: f64,
    background_color: String,
}

impl Default for VortexConfig {
    fn default() -> Self {
        VortexConfig {
            particle_count: 500,
            base_hue: 20.0,
            range_hue: 30.0,
            range_y: 150.0,
            base_speed: 0.1,
            range_speed: 1.0,
            base_radius: 0.8,
            range_radius: 1.5,
            base_ttl: 50.0,
            range_ttl: 150.0,
            background_color: String::from("#000000"),
        }
    }
}

#[wasm_bindgen]
impl VortexConfig {
    #[wasm_bindgen(constructor)]
    pub fn new() -> VortexConfig {
        VortexConfig::default()
    }

    #[wasm_bindgen(getter = particleCount)]
    pub fn particle_count(&self) -> usize {
        self.particle_count
    }

    #[wasm_bindgen(setter = particleCount)]
    pub fn set_particle_count(&mut self, count: usize) {
        self.particle_count = count;
    }

    #[wasm_bindgen(getter = baseHue)]
    pub fn base_hue(&self) -> f64 {
        self.base_hue
    }

    #[wasm_bindgen(setter = baseHue)]
    pub fn set_base_hue(&mut self, hue: f64) {
        self.base_hue = hue;
    }

    #[wasm_bindgen(getter = rangeHue)]
    pub fn range_hue(&self) -> f64 {
        self.range_hue
    }

    #[wasm_bindgen(setter = rangeHue)]
    pub fn set_range_hue(&mut self, range: f64) {
        self.range_hue = non_negative(range);
    }

    #[wasm_bindgen(getter = rangeY)]
    pub fn range_y(&self) -> f64 {
        self.range_y
    }

    #[wasm_bindgen(setter = rangeY)]
    pub fn set_range_y(&mut self, range: f64) {
        self.range_y = non_negative(range);
    }

    #[wasm_bindgen(getter = baseSpeed)]
    pub fn base_speed(&self) -> f64 {
        self.base_speed
    }

    #[wasm_bindgen(setter = baseSpeed)]
    pub fn set_base_speed(&mut self, speed: f64) {
        self.base_speed = non_negative(speed);
    }

    #[wasm_bindgen(getter = rangeSpeed)]
    pub fn range_speed(&self) -> f64 {
        self.range_speed
    }

    #[wasm_bindgen(setter = rangeSpeed)]
    pub fn set_range_speed(&mut self, range: f64) {
        self.range_speed = non_negative(range);
    }

    #[wasm_bindgen(getter = baseRadius)]
    pub fn base_radius(&self) -> f64 {
        self.base_radius
    }

    #[wasm_bindgen(setter = baseRadius)]
    pub fn set_base_radius(&mut self, radius: f64) {
        self.base_radius = non_negative(radius);
    }

    #[wasm_bindgen(getter = rangeRadius)]
    pub fn range_radius(&self) -> f64 {
        self.range_radius
    }

    #[wasm_bindgen(setter = rangeRadius)]
    pub fn set_range_radius(&mut self, range: f64) {
        self.range_radius = non_negative(range);
    }

    #[wasm_bindgen(getter = baseTtl)]
    pub fn base_ttl(&self) -> f64 {
        self.base_ttl
    }

    // A lifetime of zero would divide by zero in the fade curve
    #[wasm_bindgen(setter = baseTtl)]
    pub fn set_base_ttl(&mut self, ttl: f64) {
        self.base_ttl = ttl.max(1.0);
    }

    #[wasm_bindgen(getter = rangeTtl)]
    pub fn range_ttl(&self) -> f64 {
        self.range_ttl
    }

    #[wasm_bindgen(setter = rangeTtl)]
    pub fn set_range_ttl(&mut self, range: f64) {
        self.range_ttl = non_negative(range);
    }

    #[wasm_bindgen(getter = backgroundColor)]
    pub fn background_color(&self) -> String {
        self.background_color.clone()
    }

    #[wasm_bindgen(setter = backgroundColor)]
    pub fn set_background_color(&mut self, color: String) {
        self.background_color = color;
    }
}

impl VortexConfig {
    pub fn background_color_str(&self) -> &str {
        &self.background_color
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_header() {
        let config = VortexConfig::default();
        assert_eq!(config.particle_count(), 500);
        assert_eq!(config.base_hue(), 20.0);
        assert_eq!(config.range_y(), 150.0);
        assert_eq!(config.base_speed(), 0.1);
        assert_eq!(config.range_speed(), 1.0);
        assert_eq!(config.base_radius(), 0.8);
        assert_eq!(config.range_radius(), 1.5);
        assert_eq!(config.background_color_str(), "#000000");
    }

    #[test]
    fn setters_reject_negative_ranges() {
        let mut config = VortexConfig::new();
        config.set_range_speed(-2.0);
        config.set_range_y(f64::NAN);
        config.set_base_ttl(0.0);
        assert_eq!(config.range_speed(), 0.0);
        assert_eq!(config.range_y(), 0.0);
        assert_eq!(config.base_ttl(), 1.0);
    }
}
