use crate::particles::ParticleField;
use glam::Vec3;
use ofrenda_common::{ObjectKind, Rgb, Transform};
use serde::{Deserialize, Serialize};

/// A mesh instance in the scene. Particles are stored separately.
pub type SceneObject = Transform;

pub const BUILDING_COUNT: usize = 500;
pub const LIGHT_COUNT: usize = 200;
pub const SKULL_COUNT: usize = 20;
pub const PARTICLE_COUNT: usize = 1000;

/// Scene-wide ambient term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmbientLight {
    pub color: Rgb,
}

/// Directional light shining from `position` toward the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    pub color: Rgb,
    pub intensity: f32,
    pub position: Vec3,
}

impl DirectionalLight {
    /// Unit vector pointing from the surface toward the light.
    pub fn direction(&self) -> Vec3 {
        self.position.normalize_or(Vec3::Y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lighting {
    pub ambient: AmbientLight,
    pub directional: DirectionalLight,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient: AmbientLight {
                color: Rgb::hex(0x404040),
            },
            directional: DirectionalLight {
                color: Rgb::hex(0xffffff),
                intensity: 0.5,
                position: Vec3::ONE,
            },
        }
    }
}

/// Base geometry drawn for each instance before its transform is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Unit cube centred on the origin.
    Box,
    Sphere { radius: f32 },
    Point { size: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shading {
    /// Ambient + directional light.
    Lit,
    /// Flat color, ignores lights.
    Unlit,
    /// Flat color blended additively.
    Additive,
}

/// How a collection is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    pub shape: Shape,
    pub color: Rgb,
    pub shading: Shading,
}

impl Appearance {
    pub fn of(kind: ObjectKind) -> Self {
        match kind {
            ObjectKind::Building => Self {
                shape: Shape::Box,
                color: Rgb::hex(0x00ffff),
                shading: Shading::Lit,
            },
            ObjectKind::Light => Self {
                shape: Shape::Sphere { radius: 0.5 },
                color: Rgb::hex(0xff00ff),
                shading: Shading::Unlit,
            },
            ObjectKind::Altar => Self {
                shape: Shape::Box,
                color: Rgb::hex(0xffaa00),
                shading: Shading::Lit,
            },
            ObjectKind::Skull => Self {
                shape: Shape::Sphere { radius: 1.0 },
                color: Rgb::hex(0xffffff),
                shading: Shading::Lit,
            },
            ObjectKind::Particle => Self {
                shape: Shape::Point { size: 0.1 },
                color: Rgb::hex(0xffa500),
                shading: Shading::Additive,
            },
        }
    }
}

/// The full set of scene objects.
///
/// Collections are sized once by `SceneBuilder`; nothing can add or remove
/// objects afterwards, only mutate them in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub(crate) seed: u64,
    pub(crate) buildings: Vec<SceneObject>,
    pub(crate) lights: Vec<SceneObject>,
    pub(crate) altar: SceneObject,
    pub(crate) skulls: Vec<SceneObject>,
    pub(crate) particles: ParticleField,
    pub(crate) lighting: Lighting,
}

impl Scene {
    /// Seed the scene was built from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn buildings(&self) -> &[SceneObject] {
        &self.buildings
    }

    pub fn lights(&self) -> &[SceneObject] {
        &self.lights
    }

    pub fn altar(&self) -> &SceneObject {
        &self.altar
    }

    pub fn skulls(&self) -> &[SceneObject] {
        &self.skulls
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn lighting(&self) -> &Lighting {
        &self.lighting
    }

    /// Mesh instances of one kind. Empty for particles.
    pub fn objects(&self, kind: ObjectKind) -> &[SceneObject] {
        match kind {
            ObjectKind::Building => &self.buildings,
            ObjectKind::Light => &self.lights,
            ObjectKind::Altar => std::slice::from_ref(&self.altar),
            ObjectKind::Skull => &self.skulls,
            ObjectKind::Particle => &[],
        }
    }

    pub fn count(&self, kind: ObjectKind) -> usize {
        match kind {
            ObjectKind::Particle => self.particles.len(),
            _ => self.objects(kind).len(),
        }
    }

    /// Total mesh instances across all collections.
    pub fn instance_count(&self) -> usize {
        self.buildings.len() + self.lights.len() + 1 + self.skulls.len()
    }

    /// Deterministic FNV-1a hash over every float in the scene.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325;
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        let mix_vec = |h: &mut u64, v: Vec3| {
            for c in v.to_array() {
                mix(h, &c.to_le_bytes());
            }
        };
        mix(&mut h, &self.seed.to_le_bytes());
        for kind in ObjectKind::ALL {
            for obj in self.objects(kind) {
                mix_vec(&mut h, obj.position);
                mix_vec(&mut h, obj.rotation);
                mix_vec(&mut h, obj.scale);
            }
        }
        for c in self.particles.positions() {
            mix(&mut h, &c.to_le_bytes());
        }
        h
    }
}
