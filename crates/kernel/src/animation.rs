//! Per-frame update rules.
//!
//! Each rule is a fixed function of the object's own fields and the elapsed
//! time `t` in milliseconds; nothing else carries over between frames.

use crate::scene::Scene;
use std::time::Duration;

pub const BUILDING_SPIN: f32 = 0.001;
pub const ALTAR_SPIN: f32 = 0.005;
pub const SKULL_SPIN: f32 = 0.01;

pub const LIGHT_FREQUENCY: f64 = 0.001;
pub const LIGHT_AMPLITUDE: f32 = 5.0;
pub const LIGHT_BASELINE: f32 = 50.0;

pub const SKULL_FREQUENCY: f64 = 0.002;
pub const SKULL_AMPLITUDE: f32 = 2.0;
pub const SKULL_BASELINE: f32 = 7.0;

pub const PARTICLE_FALL: f32 = 0.1;

/// `sin(t * frequency + phase) * amplitude + baseline`, evaluated in f64 so
/// large `t` keeps its precision.
fn bob(t_ms: f64, frequency: f64, phase: f32, amplitude: f32, baseline: f32) -> f32 {
    (t_ms * frequency + f64::from(phase)).sin() as f32 * amplitude + baseline
}

/// Apply one tick of every update rule at elapsed time `t_ms`.
pub fn advance(scene: &mut Scene, t_ms: f64) {
    for b in &mut scene.buildings {
        b.rotation.y += BUILDING_SPIN;
    }

    for l in &mut scene.lights {
        l.position.y = bob(
            t_ms,
            LIGHT_FREQUENCY,
            l.position.x,
            LIGHT_AMPLITUDE,
            LIGHT_BASELINE,
        );
    }

    scene.altar.rotation.y += ALTAR_SPIN;

    for s in &mut scene.skulls {
        s.rotation.y += SKULL_SPIN;
        s.position.y = bob(
            t_ms,
            SKULL_FREQUENCY,
            s.position.x,
            SKULL_AMPLITUDE,
            SKULL_BASELINE,
        );
    }

    scene.particles.fall(PARTICLE_FALL);
}

/// Drives `advance` once per presented frame until stopped.
#[derive(Debug, Clone)]
pub struct AnimationLoop {
    ticks: u64,
    running: bool,
}

impl Default for AnimationLoop {
    fn default() -> Self {
        Self {
            ticks: 0,
            running: true,
        }
    }
}

impl AnimationLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ticks applied so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance the scene one tick. Returns false once the loop is stopped.
    pub fn tick(&mut self, scene: &mut Scene, elapsed: Duration) -> bool {
        if !self.running {
            return false;
        }
        let _span = tracing::trace_span!("animation_tick", tick = self.ticks).entered();
        advance(scene, elapsed.as_secs_f64() * 1000.0);
        self.ticks += 1;
        true
    }

    /// Tear the loop down. Later ticks leave the scene untouched.
    pub fn stop(&mut self) {
        if self.running {
            tracing::debug!(ticks = self.ticks, "animation loop stopped");
        }
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::SceneBuilder;
    use crate::particles::PARTICLE_CEILING;
    use crate::scene::{BUILDING_COUNT, LIGHT_COUNT, PARTICLE_COUNT, SKULL_COUNT};
    use ofrenda_common::ObjectKind;

    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn spins_accumulate_per_tick() {
        let mut scene = SceneBuilder::new(5).build();
        let mut anim = AnimationLoop::new();
        for i in 1..=10u32 {
            anim.tick(&mut scene, FRAME * i);
        }
        assert_eq!(anim.ticks(), 10);
        assert!((scene.buildings()[0].rotation.y - 10.0 * BUILDING_SPIN).abs() < 1e-6);
        assert!((scene.altar().rotation.y - 10.0 * ALTAR_SPIN).abs() < 1e-6);
        assert!((scene.skulls()[3].rotation.y - 10.0 * SKULL_SPIN).abs() < 1e-5);
    }

    #[test]
    fn lights_bob_around_fifty() {
        let mut scene = SceneBuilder::new(6).build();
        let t = 1234.0;
        advance(&mut scene, t);
        for l in scene.lights() {
            let expected = ((t * 0.001 + f64::from(l.position.x)).sin() * 5.0 + 50.0) as f32;
            assert!((l.position.y - expected).abs() < 1e-4);
            assert!(l.position.y >= 45.0 - 1e-4 && l.position.y <= 55.0 + 1e-4);
        }
    }

    #[test]
    fn skulls_bob_around_seven() {
        let mut scene = SceneBuilder::new(7).build();
        advance(&mut scene, 0.0);
        for s in scene.skulls() {
            let expected = f64::from(s.position.x).sin() as f32 * 2.0 + 7.0;
            assert!((s.position.y - expected).abs() < 1e-5);
        }
    }

    #[test]
    fn bob_depends_only_on_time_and_x() {
        let mut a = SceneBuilder::new(8).build();
        let mut b = a.clone();
        advance(&mut a, 500.0);
        advance(&mut b, 100.0);
        advance(&mut b, 500.0);
        for (la, lb) in a.lights().iter().zip(b.lights()) {
            assert_eq!(la.position.y, lb.position.y);
        }
    }

    #[test]
    fn particles_stay_within_bounds_over_many_ticks() {
        let mut scene = SceneBuilder::new(9).build();
        let mut anim = AnimationLoop::new();
        for i in 0..2500u32 {
            anim.tick(&mut scene, FRAME * i);
            if i % 250 == 0 {
                for p in scene.particles().iter() {
                    assert!((0.0..=PARTICLE_CEILING).contains(&p.y), "y={}", p.y);
                }
            }
        }
        for p in scene.particles().iter() {
            assert!((0.0..=PARTICLE_CEILING).contains(&p.y));
        }
    }

    #[test]
    fn counts_constant_across_ticks() {
        let mut scene = SceneBuilder::new(10).build();
        let mut anim = AnimationLoop::new();
        for i in 0..100u32 {
            anim.tick(&mut scene, FRAME * i);
        }
        assert_eq!(scene.count(ObjectKind::Building), BUILDING_COUNT);
        assert_eq!(scene.count(ObjectKind::Light), LIGHT_COUNT);
        assert_eq!(scene.count(ObjectKind::Altar), 1);
        assert_eq!(scene.count(ObjectKind::Skull), SKULL_COUNT);
        assert_eq!(scene.count(ObjectKind::Particle), PARTICLE_COUNT);
    }

    #[test]
    fn stopped_loop_is_inert() {
        let mut scene = SceneBuilder::new(1).build();
        let mut anim = AnimationLoop::new();
        anim.stop();
        let before = scene.state_hash();
        assert!(!anim.tick(&mut scene, FRAME));
        assert_eq!(scene.state_hash(), before);
        assert_eq!(anim.ticks(), 0);
        assert!(!anim.is_running());
    }

    #[test]
    fn identical_runs_match() {
        let mut a = SceneBuilder::new(77).build();
        let mut b = SceneBuilder::new(77).build();
        let (mut la, mut lb) = (AnimationLoop::new(), AnimationLoop::new());
        for i in 0..60u32 {
            la.tick(&mut a, FRAME * i);
            lb.tick(&mut b, FRAME * i);
        }
        assert_eq!(a.state_hash(), b.state_hash());
    }
}
