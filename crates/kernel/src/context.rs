use crate::animation::AnimationLoop;
use crate::builder::SceneBuilder;
use crate::config::SceneConfig;
use crate::loading::LoadingGate;
use crate::scene::Scene;
use ofrenda_input::{Action, PlayerState};
use std::time::Duration;

/// What happened during one call to `SceneContext::frame`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// The animation advanced this frame.
    pub animated: bool,
    /// The loading cover was lifted this frame.
    pub finished_loading: bool,
}

/// Everything the frame loop and the input handlers share.
///
/// Owned by the host and passed by `&mut` to both; there is no other state.
#[derive(Debug, Clone)]
pub struct SceneContext {
    scene: Scene,
    player: PlayerState,
    animation: AnimationLoop,
    loading: LoadingGate,
}

impl SceneContext {
    pub fn new(config: &SceneConfig) -> Self {
        tracing::info!(seed = config.seed, "building scene context");
        Self {
            scene: SceneBuilder::new(config.seed).build(),
            player: PlayerState::new(),
            animation: AnimationLoop::new(),
            loading: LoadingGate::new(config.loading_delay()),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn animation(&self) -> &AnimationLoop {
        &self.animation
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    /// Run one frame at `elapsed` time since start.
    pub fn frame(&mut self, elapsed: Duration) -> FrameReport {
        let finished_loading = self.loading.update(elapsed);
        let animated = self.animation.tick(&mut self.scene, elapsed);
        FrameReport {
            animated,
            finished_loading,
        }
    }

    /// Route a player action to the player state.
    pub fn dispatch(&mut self, action: Action) {
        self.player.apply(action);
    }

    /// Stop animating. The scene keeps its last pose.
    pub fn teardown(&mut self) {
        self.animation.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ofrenda_common::ObjectKind;

    fn ctx() -> SceneContext {
        SceneContext::new(&SceneConfig {
            seed: 5,
            loading_delay_ms: 50,
            ..SceneConfig::default()
        })
    }

    #[test]
    fn new_context_is_loading_with_full_energy() {
        let c = ctx();
        assert!(c.is_loading());
        assert_eq!(c.player().energy(), 100);
        assert_eq!(c.scene().seed(), 5);
        assert_eq!(c.animation().ticks(), 0);
    }

    #[test]
    fn frames_animate_and_finish_loading_once() {
        let mut c = ctx();
        let r0 = c.frame(Duration::from_millis(16));
        assert!(r0.animated);
        assert!(!r0.finished_loading);
        let r1 = c.frame(Duration::from_millis(64));
        assert!(r1.finished_loading);
        let r2 = c.frame(Duration::from_millis(80));
        assert!(!r2.finished_loading);
        assert!(!c.is_loading());
        assert_eq!(c.animation().ticks(), 3);
    }

    #[test]
    fn dispatch_updates_player_only() {
        let mut c = ctx();
        let hash = c.scene().state_hash();
        c.dispatch(Action::Dance);
        c.dispatch(Action::Collect);
        assert_eq!(c.player().offerings(), 3);
        assert_eq!(c.player().energy(), 100);
        assert_eq!(c.scene().state_hash(), hash);
    }

    #[test]
    fn teardown_freezes_scene() {
        let mut c = ctx();
        c.frame(Duration::from_millis(16));
        c.teardown();
        let hash = c.scene().state_hash();
        let r = c.frame(Duration::from_millis(32));
        assert!(!r.animated);
        assert_eq!(c.scene().state_hash(), hash);
        assert_eq!(c.scene().count(ObjectKind::Particle), 1000);
    }
}
