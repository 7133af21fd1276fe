//! wgpu render backend for the ofrenda scene.
//!
//! Draws buildings and the altar as instanced boxes, lights and skulls as
//! instanced spheres, and the marigold petals as an additive point cloud.
//! The camera orbits the origin with damped drag rotation.
//!
//! # Invariants
//! - Renderer never mutates scene state.
//! - Camera motion is not part of the scene context.

mod camera;
mod gpu;
mod shaders;

pub use camera::OrbitCamera;
pub use gpu::WgpuRenderer;
