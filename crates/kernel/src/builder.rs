use crate::particles::ParticleField;
use crate::scene::{
    BUILDING_COUNT, LIGHT_COUNT, Lighting, PARTICLE_COUNT, SKULL_COUNT, Scene, SceneObject,
};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;

/// Half-width of the city block on X and Z.
pub const CITY_HALF_EXTENT: f32 = 100.0;
/// Range of building base heights.
pub const BUILDING_BASE_Y: Range<f32> = 0.0..50.0;
/// Range of building footprint scale on X and Z.
pub const BUILDING_FOOTPRINT: Range<f32> = 1.0..11.0;
/// Range of building heights (Y scale).
pub const BUILDING_HEIGHT: Range<f32> = 10.0..110.0;
/// Range of initial light heights.
pub const LIGHT_Y: Range<f32> = 0.0..100.0;
/// Fixed altar placement and size.
pub const ALTAR_POSITION: Vec3 = Vec3::new(0.0, 2.5, -20.0);
pub const ALTAR_SIZE: Vec3 = Vec3::new(10.0, 5.0, 3.0);
/// Half-width of the plaza the skulls float over.
pub const SKULL_HALF_EXTENT: f32 = 20.0;
pub const SKULL_Y: Range<f32> = 5.0..15.0;
/// Half-width of the particle volume on X and Z.
pub const PARTICLE_HALF_EXTENT: f32 = 50.0;
pub const PARTICLE_Y: Range<f32> = 0.0..100.0;

/// Builds a `Scene` from a seed.
///
/// Every random draw comes from one `StdRng`, in a fixed order (buildings,
/// lights, skulls, particles), so a seed fully determines the scene.
pub struct SceneBuilder {
    seed: u64,
    lighting: Lighting,
}

impl SceneBuilder {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            lighting: Lighting::default(),
        }
    }

    pub fn with_lighting(mut self, lighting: Lighting) -> Self {
        self.lighting = lighting;
        self
    }

    pub fn build(self) -> Scene {
        let _span = tracing::debug_span!("scene_build", seed = self.seed).entered();
        let mut rng = StdRng::seed_from_u64(self.seed);

        let buildings: Vec<SceneObject> = (0..BUILDING_COUNT)
            .map(|_| {
                let position = Vec3::new(
                    symmetric(&mut rng, CITY_HALF_EXTENT),
                    rng.random_range(BUILDING_BASE_Y),
                    symmetric(&mut rng, CITY_HALF_EXTENT),
                );
                let scale = Vec3::new(
                    rng.random_range(BUILDING_FOOTPRINT),
                    rng.random_range(BUILDING_HEIGHT),
                    rng.random_range(BUILDING_FOOTPRINT),
                );
                SceneObject {
                    position,
                    scale,
                    ..SceneObject::default()
                }
            })
            .collect();

        let lights: Vec<SceneObject> = (0..LIGHT_COUNT)
            .map(|_| {
                SceneObject::from_position(Vec3::new(
                    symmetric(&mut rng, CITY_HALF_EXTENT),
                    rng.random_range(LIGHT_Y),
                    symmetric(&mut rng, CITY_HALF_EXTENT),
                ))
            })
            .collect();

        let altar = SceneObject {
            position: ALTAR_POSITION,
            scale: ALTAR_SIZE,
            ..SceneObject::default()
        };

        let skulls: Vec<SceneObject> = (0..SKULL_COUNT)
            .map(|_| {
                SceneObject::from_position(Vec3::new(
                    symmetric(&mut rng, SKULL_HALF_EXTENT),
                    rng.random_range(SKULL_Y),
                    symmetric(&mut rng, SKULL_HALF_EXTENT),
                ))
            })
            .collect();

        let particles = ParticleField::from_points((0..PARTICLE_COUNT).map(|_| {
            Vec3::new(
                symmetric(&mut rng, PARTICLE_HALF_EXTENT),
                rng.random_range(PARTICLE_Y),
                symmetric(&mut rng, PARTICLE_HALF_EXTENT),
            )
        }));

        tracing::debug!(
            buildings = buildings.len(),
            lights = lights.len(),
            skulls = skulls.len(),
            particles = particles.len(),
            "scene built"
        );

        Scene {
            seed: self.seed,
            buildings,
            lights,
            altar,
            skulls,
            particles,
            lighting: self.lighting,
        }
    }
}

/// Uniform draw in `[-half, half)`.
fn symmetric(rng: &mut StdRng, half: f32) -> f32 {
    rng.random_range(-half..half)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn in_range(v: f32, r: &Range<f32>) -> bool {
        v >= r.start && v < r.end
    }

    #[test]
    fn buildings_within_bounds() {
        let scene = SceneBuilder::new(11).build();
        for b in scene.buildings() {
            assert!(b.position.x.abs() <= CITY_HALF_EXTENT);
            assert!(b.position.z.abs() <= CITY_HALF_EXTENT);
            assert!(in_range(b.position.y, &BUILDING_BASE_Y));
            assert!(in_range(b.scale.x, &BUILDING_FOOTPRINT));
            assert!(in_range(b.scale.y, &BUILDING_HEIGHT));
            assert!(in_range(b.scale.z, &BUILDING_FOOTPRINT));
            assert_eq!(b.rotation, Vec3::ZERO);
        }
    }

    #[test]
    fn lights_and_skulls_within_bounds() {
        let scene = SceneBuilder::new(12).build();
        for l in scene.lights() {
            assert!(l.position.x.abs() <= CITY_HALF_EXTENT);
            assert!(in_range(l.position.y, &LIGHT_Y));
            assert_eq!(l.scale, Vec3::ONE);
        }
        for s in scene.skulls() {
            assert!(s.position.x.abs() <= SKULL_HALF_EXTENT);
            assert!(s.position.z.abs() <= SKULL_HALF_EXTENT);
            assert!(in_range(s.position.y, &SKULL_Y));
        }
    }

    #[test]
    fn altar_is_fixed() {
        let a = SceneBuilder::new(1).build();
        let b = SceneBuilder::new(2).build();
        assert_eq!(a.altar(), b.altar());
        assert_eq!(a.altar().position, ALTAR_POSITION);
        assert_eq!(a.altar().scale, ALTAR_SIZE);
    }

    #[test]
    fn particles_within_volume() {
        let scene = SceneBuilder::new(13).build();
        for p in scene.particles().iter() {
            assert!(p.x.abs() <= PARTICLE_HALF_EXTENT);
            assert!(p.z.abs() <= PARTICLE_HALF_EXTENT);
            assert!(in_range(p.y, &PARTICLE_Y));
        }
    }

    #[test]
    fn same_seed_same_scene() {
        let a = SceneBuilder::new(42).build();
        let b = SceneBuilder::new(42).build();
        assert_eq!(a, b);
        assert_eq!(a.state_hash(), b.state_hash());
    }

    #[test]
    fn different_seeds_diverge() {
        let a = SceneBuilder::new(1).build();
        let b = SceneBuilder::new(2).build();
        assert_ne!(a.state_hash(), b.state_hash());
    }

    #[test]
    fn custom_lighting_is_kept() {
        let mut lighting = Lighting::default();
        lighting.directional.intensity = 1.0;
        let scene = SceneBuilder::new(0).with_lighting(lighting).build();
        assert_eq!(scene.lighting().directional.intensity, 1.0);
    }
}
