// Particle simulation behind the header.
//
// Every frame each particle samples a 3D noise field at its position and the
// current frame counter, turns the sample into an angle, and steers halfway
// towards it. The resulting segment is handed to a `Surface` for drawing.
// Nothing in here touches the DOM, so the whole update can run (and be
// tested) off the browser.

use std::f64::consts::PI;

use noise::{NoiseFn, OpenSimplex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vecmath::{vec2_add, vec2_scale, Vector2};

use crate::color::Hsla;
use crate::config::{VortexConfig, NOISE_STEPS, NOISE_X_SCALE, NOISE_Y_SCALE, NOISE_Z_SCALE};
use crate::particle::{Particle, SpawnBand};

const TAU: f64 = 2.0 * PI;

/// One line segment of a particle's trail for the current frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Stroke {
    pub from: Vector2<f64>,
    pub to: Vector2<f64>,
    pub width: f64,
    pub color: Hsla,
}

/// Anything a frame can be drawn onto.
pub trait Surface {
    fn clear(&mut self, background: &str);
    fn stroke(&mut self, stroke: &Stroke);
    /// Post-particle pass: blur and brighten the frame, added onto itself.
    fn glow(&mut self);
}

pub struct Vortex<N = OpenSimplex> {
    config: VortexConfig,
    particles: Vec<Particle>,
    width: f64,
    height: f64,
    center: Vector2<f64>,
    tick: u64,
    noise: N,
    rng: StdRng,
}

impl Vortex<OpenSimplex> {
    pub fn new(config: VortexConfig, width: f64, height: f64) -> Self {
        let mut rng = StdRng::from_entropy();
        let noise = OpenSimplex::new(rng.gen());
        Vortex::with_parts(config, width, height, noise, rng)
    }
}

impl<N: NoiseFn<f64, 3>> Vortex<N> {
    pub fn with_parts(config: VortexConfig, width: f64, height: f64, noise: N, rng: StdRng) -> Self {
        let mut vortex = Vortex {
            particles: Vec::with_capacity(config.particle_count()),
            config,
            width: 0.0,
            height: 0.0,
            center: [0.0, 0.0],
            tick: 0,
            noise,
            rng,
        };
        vortex.resize(width, height);
        vortex
    }

    /// Adopt new canvas dimensions and rebuild the whole pool. Nothing
    /// carries over from before the resize.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.center = [self.width * 0.5, self.height * 0.5];
        self.init_particles();
    }

    pub fn init_particles(&mut self) {
        self.tick = 0;
        let band = self.spawn_band();
        let config = &self.config;
        let rng = &mut self.rng;
        self.particles.clear();
        self.particles.extend(
            (0..config.particle_count()).map(|_| Particle::spawn(&band, config, &mut *rng)),
        );
    }

    /// Draw and advance one frame.
    pub fn draw_frame<S: Surface>(&mut self, surface: &mut S) {
        self.tick += 1;
        surface.clear(self.config.background_color_str());
        self.update_particles(surface);
        surface.glow();
    }

    fn update_particles<S: Surface>(&mut self, surface: &mut S) {
        let band = self.spawn_band();
        let z = self.tick as f64 * NOISE_Z_SCALE;
        let (width, height) = (self.width, self.height);

        for particle in self.particles.iter_mut() {
            let [x, y] = particle.pos;
            let n = self.noise.get([x * NOISE_X_SCALE, y * NOISE_Y_SCALE, z]) * NOISE_STEPS * TAU;
            let heading = [n.cos(), n.sin()];
            let vel = vec2_add(vec2_scale(particle.vel, 0.5), vec2_scale(heading, 0.5));
            let next = vec2_add(particle.pos, vec2_scale(vel, particle.speed));

            surface.stroke(&Stroke {
                from: particle.pos,
                to: next,
                width: particle.radius,
                color: particle.color(),
            });

            particle.pos = next;
            particle.vel = vel;
            particle.age += 1.0;

            if !particle.is_inside(width, height) || particle.is_expired() {
                particle.respawn(&band, &mut self.rng);
            }
        }
    }

    fn spawn_band(&self) -> SpawnBand {
        SpawnBand::new(self.width, self.height, self.center[1], self.config.range_y())
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn center(&self) -> Vector2<f64> {
        self.center
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vecmath::{vec2_len, vec2_sub};

    // Flat field pointing along a fixed angle
    struct Constant(f64);

    impl NoiseFn<f64, 3> for Constant {
        fn get(&self, _point: [f64; 3]) -> f64 {
            self.0
        }
    }

    #[derive(Default)]
    struct Recorder {
        clears: Vec<String>,
        strokes: Vec<Stroke>,
        glows: usize,
    }

    impl Surface for Recorder {
        fn clear(&mut self, background: &str) {
            self.clears.push(background.to_owned());
        }

        fn stroke(&mut self, stroke: &Stroke) {
            self.strokes.push(*stroke);
        }

        fn glow(&mut self) {
            self.glows += 1;
        }
    }

    fn seeded(config: VortexConfig, width: f64, height: f64, seed: u64) -> Vortex {
        let mut rng = StdRng::seed_from_u64(seed);
        let noise = OpenSimplex::new(rng.gen());
        Vortex::with_parts(config, width, height, noise, rng)
    }

    #[test]
    fn pool_is_populated_at_configured_size() {
        let vortex = seeded(VortexConfig::default(), 1280.0, 720.0, 1);
        assert_eq!(vortex.particles().len(), 500);
        assert_eq!(vortex.center(), [640.0, 360.0]);
        assert_eq!(vortex.tick(), 0);
    }

    #[test]
    fn age_stays_within_lifetime_every_frame() {
        let mut vortex = seeded(VortexConfig::default(), 1024.0, 768.0, 2);
        let mut surface = Recorder::default();
        for _ in 0..600 {
            vortex.draw_frame(&mut surface);
            for p in vortex.particles() {
                assert!(p.age >= 0.0 && p.age <= p.lifetime, "age {} ttl {}", p.age, p.lifetime);
            }
        }
    }

    #[test]
    fn particles_stay_inside_canvas_after_every_frame() {
        let mut config = VortexConfig::default();
        config.set_base_speed(4.0);
        config.set_range_speed(6.0);
        let mut vortex = seeded(config, 300.0, 200.0, 3);
        let mut surface = Recorder::default();
        for _ in 0..400 {
            vortex.draw_frame(&mut surface);
            for p in vortex.particles() {
                assert!(p.is_inside(300.0, 200.0), "escaped to {:?}", p.pos);
            }
        }
    }

    #[test]
    fn particle_count_is_invariant() {
        let mut vortex = seeded(VortexConfig::default(), 1280.0, 720.0, 4);
        let mut surface = Recorder::default();
        for frame in 1..=50 {
            vortex.draw_frame(&mut surface);
            assert_eq!(vortex.particles().len(), 500);
            assert_eq!(surface.strokes.len(), 500 * frame);
        }
        assert_eq!(vortex.tick(), 50);
        assert_eq!(surface.glows, 50);
        assert!(surface.clears.iter().all(|c| c == "#000000"));
    }

    #[test]
    fn escaping_particle_respawns_with_fresh_age() {
        let mut config = VortexConfig::default();
        config.set_particle_count(1);
        config.set_base_speed(50.0);
        config.set_range_speed(0.0);
        // Heading straight along +x
        let rng = StdRng::seed_from_u64(5);
        let mut vortex = Vortex::with_parts(config, 100.0, 400.0, Constant(0.0), rng);
        let mut surface = Recorder::default();

        let mut respawned = false;
        for _ in 0..10 {
            let before = vortex.particles()[0];
            vortex.draw_frame(&mut surface);
            let after = vortex.particles()[0];
            assert!(after.is_inside(100.0, 400.0));
            if after.age == 0.0 {
                respawned = true;
                assert_eq!(after.speed, before.speed);
                assert_eq!(after.hue, before.hue);
                assert_eq!(after.radius, before.radius);
            }
        }
        assert!(respawned);
    }

    #[test]
    fn expired_particle_respawns() {
        let mut config = VortexConfig::default();
        config.set_particle_count(1);
        config.set_base_speed(0.0);
        config.set_range_speed(0.0);
        config.set_base_ttl(3.0);
        config.set_range_ttl(0.0);
        let rng = StdRng::seed_from_u64(6);
        let mut vortex = Vortex::with_parts(config, 800.0, 600.0, Constant(0.3), rng);
        let mut surface = Recorder::default();

        let ages: Vec<f64> = (0..8)
            .map(|_| {
                vortex.draw_frame(&mut surface);
                vortex.particles()[0].age
            })
            .collect();
        assert_eq!(ages, vec![1.0, 2.0, 3.0, 0.0, 1.0, 2.0, 3.0, 0.0]);
    }

    #[test]
    fn stationary_particle_never_moves() {
        let mut config = VortexConfig::default();
        config.set_particle_count(1);
        config.set_base_speed(0.0);
        config.set_range_speed(0.0);
        let mut vortex = seeded(config, 1280.0, 720.0, 7);
        let mut surface = Recorder::default();
        for _ in 0..30 {
            let before = vortex.particles()[0];
            vortex.draw_frame(&mut surface);
            let after = vortex.particles()[0];
            if after.age != 0.0 {
                assert_eq!(before.pos, after.pos);
            }
        }
        for stroke in &surface.strokes {
            assert_eq!(stroke.from, stroke.to);
        }
    }

    #[test]
    fn each_step_is_bounded_by_speed() {
        let mut vortex = seeded(VortexConfig::default(), 1920.0, 1080.0, 8);
        let mut surface = Recorder::default();
        for _ in 0..100 {
            vortex.draw_frame(&mut surface);
        }
        for p in vortex.particles() {
            assert!(vec2_len(p.vel) <= 1.0 + 1e-9);
        }
        for stroke in &surface.strokes {
            // Longest possible step is base + range speed
            assert!(vec2_len(vec2_sub(stroke.to, stroke.from)) <= 1.1 + 1e-9);
        }
    }

    #[test]
    fn velocity_blends_half_of_previous_heading() {
        let mut config = VortexConfig::default();
        config.set_particle_count(1);
        config.set_base_speed(1.0);
        config.set_range_speed(0.0);
        let rng = StdRng::seed_from_u64(9);
        let mut vortex = Vortex::with_parts(config, 4000.0, 4000.0, Constant(0.0), rng);
        let mut surface = Recorder::default();

        vortex.draw_frame(&mut surface);
        assert_eq!(vortex.particles()[0].vel, [0.5, 0.0]);
        vortex.draw_frame(&mut surface);
        assert_eq!(vortex.particles()[0].vel, [0.75, 0.0]);
    }

    #[test]
    fn strokes_carry_radius_and_fading_color() {
        let mut config = VortexConfig::default();
        config.set_particle_count(1);
        config.set_base_speed(0.0);
        config.set_range_speed(0.0);
        let rng = StdRng::seed_from_u64(10);
        let mut vortex = Vortex::with_parts(config, 800.0, 600.0, Constant(0.1), rng);
        let p = vortex.particles()[0];
        let mut surface = Recorder::default();

        vortex.draw_frame(&mut surface);

        let stroke = surface.strokes[0];
        assert_eq!(stroke.width, p.radius);
        assert_eq!(stroke.color.hue, p.hue);
        assert_eq!(stroke.color.saturation, 100.0);
        assert_eq!(stroke.color.lightness, 60.0);
        // Drawn with the age from before the increment
        assert_eq!(stroke.color.alpha, 0.0);
    }

    #[test]
    fn resize_rebuilds_pool_inside_new_bounds() {
        let mut vortex = seeded(VortexConfig::default(), 1920.0, 1080.0, 12);
        let mut surface = Recorder::default();
        for _ in 0..20 {
            vortex.draw_frame(&mut surface);
        }

        vortex.resize(900.0, 250.0);

        assert_eq!(vortex.tick(), 0);
        assert_eq!(vortex.size(), (900.0, 250.0));
        assert_eq!(vortex.particles().len(), 500);
        for p in vortex.particles() {
            assert!(p.is_inside(900.0, 250.0));
            assert_eq!(p.age, 0.0);
        }
    }
}
