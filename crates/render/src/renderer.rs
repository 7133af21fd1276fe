use glam::Vec3;
use ofrenda_common::ObjectKind;
use ofrenda_kernel::SceneContext;
use std::fmt::Write as _;

/// Camera placement for a frame.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 50.0),
            target: Vec3::ZERO,
            fov_degrees: 75.0,
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads the scene context and a view, then produces output.
/// It never mutates the scene.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&self, ctx: &SceneContext, view: &RenderView) -> Self::Output;
}

/// Text renderer for the CLI, logs and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    /// How many objects of each collection to list.
    pub sample: usize,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self { sample: 3 }
    }

    pub fn with_sample(sample: usize) -> Self {
        Self { sample }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, ctx: &SceneContext, view: &RenderView) -> String {
        let scene = ctx.scene();
        let player = ctx.player();
        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Scene (seed={}, tick={}) ===",
            scene.seed(),
            ctx.animation().ticks()
        );
        let _ = writeln!(
            out,
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}",
            view.eye.x, view.eye.y, view.eye.z, view.target.x, view.target.y, view.target.z,
            view.fov_degrees
        );
        let _ = writeln!(
            out,
            "Player: energy={} offerings={} loading={}",
            player.energy(),
            player.offerings(),
            ctx.is_loading()
        );
        if !player.dialog_text().is_empty() {
            let _ = writeln!(out, "Dialog: {}", player.dialog_text());
        }

        for kind in ObjectKind::ALL {
            let _ = writeln!(out, "{}: {}", kind.label(), scene.count(kind));
            if kind == ObjectKind::Particle {
                for p in scene.particles().iter().take(self.sample) {
                    let _ = writeln!(out, "  pos=({:.2}, {:.2}, {:.2})", p.x, p.y, p.z);
                }
                continue;
            }
            for obj in scene.objects(kind).iter().take(self.sample) {
                let p = obj.position;
                let _ = writeln!(
                    out,
                    "  pos=({:.2}, {:.2}, {:.2}) rot.y={:.3}",
                    p.x, p.y, p.z, obj.rotation.y
                );
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ofrenda_input::Action;
    use ofrenda_kernel::SceneConfig;
    use std::time::Duration;

    fn ctx() -> SceneContext {
        SceneContext::new(&SceneConfig::default())
    }

    #[test]
    fn lists_counts_for_every_collection() {
        let output = DebugTextRenderer::new().render(&ctx(), &RenderView::default());
        assert!(output.contains("tick=0"));
        assert!(output.contains("buildings: 500"));
        assert!(output.contains("lights: 200"));
        assert!(output.contains("altar: 1"));
        assert!(output.contains("skulls: 20"));
        assert!(output.contains("particles: 1000"));
        assert!(output.contains("loading=true"));
        assert!(!output.contains("Dialog:"));
    }

    #[test]
    fn shows_player_dialog_after_action() {
        let mut c = ctx();
        c.dispatch(Action::Interact);
        c.frame(Duration::from_millis(16));
        let output = DebugTextRenderer::new().render(&c, &RenderView::default());
        assert!(output.contains("energy=90"));
        assert!(output.contains("Dialog: You've connected with the spirit world."));
        assert!(output.contains("tick=1"));
    }

    #[test]
    fn sample_size_limits_rows() {
        let output = DebugTextRenderer::with_sample(0).render(&ctx(), &RenderView::default());
        assert!(!output.contains("pos="));
    }

    #[test]
    fn render_view_default() {
        let view = RenderView::default();
        assert_eq!(view.fov_degrees, 75.0);
        assert_eq!(view.eye, Vec3::new(0.0, 0.0, 50.0));
    }
}
