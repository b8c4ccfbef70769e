// Single particle record. The pool keeps these back to back in a Vec, so
// the whole buffer is one contiguous block of `PARTICLE_PROP_COUNT` floats
// per particle.

use rand::Rng;

use crate::color::{fade_alpha, Hsla};
use crate::config::VortexConfig;

pub const PARTICLE_PROP_COUNT: usize = 9;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: [f64; 2],
    pub vel: [f64; 2],
    pub age: f64,
    pub lifetime: f64,
    pub speed: f64,
    pub radius: f64,
    pub hue: f64,
}

// Region new and respawned particles are placed in
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpawnBand {
    pub width: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl SpawnBand {
    // Full canvas width, `center_y ± range_y`, clamped to the canvas
    pub fn new(width: f64, height: f64, center_y: f64, range_y: f64) -> SpawnBand {
        let min_y = (center_y - range_y).max(0.0).min(height);
        let max_y = (center_y + range_y).max(0.0).min(height);
        SpawnBand {
            width: width.max(0.0),
            min_y,
            max_y,
        }
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> [f64; 2] {
        let x = rng.gen::<f64>() * self.width;
        let y = self.min_y + rng.gen::<f64>() * (self.max_y - self.min_y);
        [x, y]
    }
}

impl Particle {
    pub fn spawn<R: Rng>(band: &SpawnBand, config: &VortexConfig, rng: &mut R) -> Particle {
        let pos = band.sample(rng);
        Particle {
            pos,
            vel: [0.0, 0.0],
            age: 0.0,
            lifetime: config.base_ttl() + rng.gen::<f64>() * config.range_ttl(),
            speed: config.base_speed() + rng.gen::<f64>() * config.range_speed(),
            radius: config.base_radius() + rng.gen::<f64>() * config.range_radius(),
            hue: config.base_hue() + rng.gen::<f64>() * config.range_hue(),
        }
    }

    // Speed, radius and hue survive a respawn
    pub fn respawn<R: Rng>(&mut self, band: &SpawnBand, rng: &mut R) {
        self.pos = band.sample(rng);
        self.age = 0.0;
    }

    pub fn color(&self) -> Hsla {
        Hsla::particle(self.hue, fade_alpha(self.age, self.lifetime))
    }

    pub fn is_expired(&self) -> bool {
        self.age > self.lifetime
    }

    pub fn is_inside(&self, width: f64, height: f64) -> bool {
        let [x, y] = self.pos;
        x >= 0.0 && x <= width && y >= 0.0 && y <= height
    }

    // Flattened in the order of the packed layout
    #[cfg(test)]
    pub fn props(&self) -> [f64; PARTICLE_PROP_COUNT] {
        [
            self.pos[0],
            self.pos[1],
            self.vel[0],
            self.vel[1],
            self.age,
            self.lifetime,
            self.speed,
            self.radius,
            self.hue,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn spawn_band_is_clamped_to_canvas() {
        let band = SpawnBand::new(400.0, 200.0, 100.0, 150.0);
        assert_eq!(band.min_y, 0.0);
        assert_eq!(band.max_y, 200.0);

        let band = SpawnBand::new(400.0, 1000.0, 500.0, 150.0);
        assert_eq!(band.min_y, 350.0);
        assert_eq!(band.max_y, 650.0);
    }

    #[test]
    fn spawned_attributes_fall_in_configured_ranges() {
        let config = VortexConfig::default();
        let band = SpawnBand::new(1280.0, 720.0, 360.0, config.range_y());
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let p = Particle::spawn(&band, &config, &mut rng);
            assert!(p.is_inside(1280.0, 720.0));
            assert!(p.pos[1] >= 210.0 && p.pos[1] <= 510.0);
            assert!(p.lifetime >= 50.0 && p.lifetime <= 200.0);
            assert!(p.speed >= 0.1 && p.speed <= 1.1);
            assert!(p.radius >= 0.8 && p.radius <= 2.3);
            assert!(p.hue >= 20.0 && p.hue <= 50.0);
            assert_eq!(p.age, 0.0);
            assert_eq!(p.vel, [0.0, 0.0]);
        }
    }

    #[test]
    fn respawn_keeps_visual_attributes() {
        let config = VortexConfig::default();
        let band = SpawnBand::new(800.0, 600.0, 300.0, config.range_y());
        let mut rng = StdRng::seed_from_u64(11);
        let mut p = Particle::spawn(&band, &config, &mut rng);
        p.age = 42.0;
        p.pos = [-5.0, 900.0];
        let before = p;

        p.respawn(&band, &mut rng);

        assert_eq!(p.age, 0.0);
        assert!(p.is_inside(800.0, 600.0));
        assert_eq!(p.speed, before.speed);
        assert_eq!(p.radius, before.radius);
        assert_eq!(p.hue, before.hue);
        assert_eq!(p.lifetime, before.lifetime);
    }

    #[test]
    fn props_follow_packed_layout() {
        let p = Particle {
            pos: [1.0, 2.0],
            vel: [3.0, 4.0],
            age: 5.0,
            lifetime: 6.0,
            speed: 7.0,
            radius: 8.0,
            hue: 9.0,
        };
        assert_eq!(p.props(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
    }
}
