use ofrenda_common::ObjectKind;
use ofrenda_kernel::{Scene, SceneContext};
use serde::Serialize;

/// Scene inspector for developer tooling.
///
/// Read-only queries against the scene context for the CLI, logs and the
/// overlay debug panel.
pub struct SceneInspector;

impl SceneInspector {
    /// Produce a summary of the scene context.
    pub fn summary(ctx: &SceneContext) -> SceneSummary {
        let scene = ctx.scene();
        let player = ctx.player();
        SceneSummary {
            seed: scene.seed(),
            tick: ctx.animation().ticks(),
            running: ctx.animation().is_running(),
            loading: ctx.is_loading(),
            energy: player.energy(),
            offerings: player.offerings(),
            dialog: player.dialog_text().to_string(),
            collections: ObjectKind::ALL
                .iter()
                .map(|&kind| Self::collection(scene, kind))
                .collect(),
            state_hash: scene.state_hash(),
        }
    }

    /// Count and vertical extent of one collection.
    pub fn collection(scene: &Scene, kind: ObjectKind) -> CollectionStats {
        let heights: Vec<f32> = if kind == ObjectKind::Particle {
            scene.particles().iter().map(|p| p.y).collect()
        } else {
            scene.objects(kind).iter().map(|o| o.position.y).collect()
        };
        let min_y = heights.iter().copied().fold(f32::INFINITY, f32::min);
        let max_y = heights.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        CollectionStats {
            kind,
            count: heights.len(),
            min_y: if heights.is_empty() { 0.0 } else { min_y },
            max_y: if heights.is_empty() { 0.0 } else { max_y },
        }
    }

    /// Transform of one mesh object, by collection and index.
    pub fn inspect_object(scene: &Scene, kind: ObjectKind, index: usize) -> Option<ObjectInfo> {
        if kind == ObjectKind::Particle {
            return scene.particles().point(index).map(|p| ObjectInfo {
                kind,
                index,
                position: p.to_array(),
                rotation: [0.0; 3],
                scale: [1.0; 3],
            });
        }
        scene.objects(kind).get(index).map(|o| ObjectInfo {
            kind,
            index,
            position: o.position.to_array(),
            rotation: o.rotation.to_array(),
            scale: o.scale.to_array(),
        })
    }
}

/// Per-collection statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionStats {
    pub kind: ObjectKind,
    pub count: usize,
    pub min_y: f32,
    pub max_y: f32,
}

/// Summary of the scene context for the inspector.
#[derive(Debug, Clone, Serialize)]
pub struct SceneSummary {
    pub seed: u64,
    pub tick: u64,
    pub running: bool,
    pub loading: bool,
    pub energy: u32,
    pub offerings: u64,
    pub dialog: String,
    pub collections: Vec<CollectionStats>,
    pub state_hash: u64,
}

impl SceneSummary {
    pub fn count(&self, kind: ObjectKind) -> usize {
        self.collections
            .iter()
            .find(|c| c.kind == kind)
            .map_or(0, |c| c.count)
    }
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Scene: seed={} tick={} loading={} energy={} offerings={} hash={:#018x}",
            self.seed, self.tick, self.loading, self.energy, self.offerings, self.state_hash
        )?;
        for c in &self.collections {
            write!(
                f,
                "\n  {:<10} {:>5}  y=[{:.2}, {:.2}]",
                c.kind.label(),
                c.count,
                c.min_y,
                c.max_y
            )?;
        }
        Ok(())
    }
}

/// Detailed info about a single object.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectInfo {
    pub kind: ObjectKind,
    pub index: usize,
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
}

impl std::fmt::Display for ObjectInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}[{}] pos=({:.2}, {:.2}, {:.2}) rot=({:.3}, {:.3}, {:.3}) scale=({:.2}, {:.2}, {:.2})",
            self.kind.label(),
            self.index,
            self.position[0],
            self.position[1],
            self.position[2],
            self.rotation[0],
            self.rotation[1],
            self.rotation[2],
            self.scale[0],
            self.scale[1],
            self.scale[2],
        )
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
    fn summary_fresh_context() {
        let summary = SceneInspector::summary(&ctx());
        assert_eq!(summary.tick, 0);
        assert!(summary.loading);
        assert_eq!(summary.energy, 100);
        assert_eq!(summary.count(ObjectKind::Building), 500);
        assert_eq!(summary.count(ObjectKind::Light), 200);
        assert_eq!(summary.count(ObjectKind::Altar), 1);
        assert_eq!(summary.count(ObjectKind::Skull), 20);
        assert_eq!(summary.count(ObjectKind::Particle), 1000);
    }

    #[test]
    fn summary_after_frames_and_actions() {
        let mut c = ctx();
        for i in 1..=5u32 {
            c.frame(Duration::from_millis(16) * i);
        }
        c.dispatch(Action::Dance);
        let summary = SceneInspector::summary(&c);
        assert_eq!(summary.tick, 5);
        assert_eq!(summary.offerings, 2);
        assert_eq!(summary.dialog, "You dance to honor the dead.");
    }

    #[test]
    fn light_heights_after_a_tick() {
        let mut c = ctx();
        c.frame(Duration::from_millis(16));
        let stats = SceneInspector::collection(c.scene(), ObjectKind::Light);
        assert!(stats.min_y >= 45.0 - 1e-3);
        assert!(stats.max_y <= 55.0 + 1e-3);
    }

    #[test]
    fn inspect_object_found_and_missing() {
        let c = ctx();
        let altar = SceneInspector::inspect_object(c.scene(), ObjectKind::Altar, 0).unwrap();
        assert_eq!(altar.position, [0.0, 2.5, -20.0]);
        assert_eq!(altar.scale, [10.0, 5.0, 3.0]);
        assert!(SceneInspector::inspect_object(c.scene(), ObjectKind::Skull, 20).is_none());
        assert!(SceneInspector::inspect_object(c.scene(), ObjectKind::Particle, 999).is_some());
    }

    #[test]
    fn summary_display_and_json() {
        let summary = SceneInspector::summary(&ctx());
        let s = format!("{summary}");
        assert!(s.contains("tick=0"));
        assert!(s.contains("buildings"));
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["energy"], 100);
        assert_eq!(json["collections"][4]["kind"], "Particle");
    }
}
