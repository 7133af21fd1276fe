//! Rendering adapter: renderer-agnostic interface plus viewport handling.
//!
//! # Invariants
//! - Renderers read the scene context; they never mutate it.
//! - Projection parameters are recomputed only from viewport events.

mod renderer;
mod viewport;

pub use renderer::{DebugTextRenderer, RenderView, Renderer};
pub use viewport::{Projection, Viewport, ViewportManager};

pub fn crate_info() -> &'static str {
    concat!("ofrenda-render v", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
