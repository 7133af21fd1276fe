//! Scene kernel: the owned scene context shared by the frame loop and the
//! input handlers.
//!
//! # Invariants
//! - Object counts are fixed at construction (500/200/1/20/1000).
//! - Every particle y stays within `[0, 100]`.
//! - The same seed builds the same scene.
//! - All state mutations flow through `SceneContext`; there are no globals.

pub mod animation;
pub mod builder;
pub mod config;
pub mod context;
pub mod loading;
pub mod particles;
pub mod scene;

pub use animation::AnimationLoop;
pub use builder::SceneBuilder;
pub use config::{ConfigError, SceneConfig};
pub use context::{FrameReport, SceneContext};
pub use loading::LoadingGate;
pub use particles::ParticleField;
pub use scene::{
    AmbientLight, Appearance, DirectionalLight, Lighting, Scene, SceneObject, Shading, Shape,
};
