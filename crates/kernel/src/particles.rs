use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Height particles respawn at after falling below the ground.
pub const PARTICLE_CEILING: f32 = 100.0;

/// Marigold petals: a flat `[x0, y0, z0, x1, y1, z1, ...]` position buffer.
///
/// The layout matches what the GPU point pipeline uploads, so the renderer
/// can cast it straight into a vertex buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleField {
    positions: Vec<f32>,
}

impl ParticleField {
    pub(crate) fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        let positions = points
            .into_iter()
            .flat_map(|p| [p.x, p.y, p.z])
            .collect();
        Self { positions }
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// The raw flat position buffer.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn point(&self, index: usize) -> Option<Vec3> {
        let base = index.checked_mul(3)?;
        self.positions
            .get(base..base + 3)
            .map(|p| Vec3::new(p[0], p[1], p[2]))
    }

    pub fn iter(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.positions
            .chunks_exact(3)
            .map(|p| Vec3::new(p[0], p[1], p[2]))
    }

    /// Drop every particle by `dy`, wrapping those below zero back to the ceiling.
    pub(crate) fn fall(&mut self, dy: f32) {
        for p in self.positions.chunks_exact_mut(3) {
            p[1] -= dy;
            if p[1] < 0.0 {
                p[1] = PARTICLE_CEILING;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> ParticleField {
        ParticleField::from_points([
            Vec3::new(1.0, 0.05, 2.0),
            Vec3::new(-3.0, 50.0, 4.0),
            Vec3::new(0.0, 100.0, 0.0),
        ])
    }

    #[test]
    fn flat_layout() {
        let f = field();
        assert_eq!(f.len(), 3);
        assert_eq!(f.positions().len(), 9);
        assert_eq!(f.point(1), Some(Vec3::new(-3.0, 50.0, 4.0)));
        assert_eq!(f.point(3), None);
    }

    #[test]
    fn fall_wraps_below_zero() {
        let mut f = field();
        f.fall(0.1);
        assert_eq!(f.point(0).unwrap().y, PARTICLE_CEILING);
        assert!((f.point(1).unwrap().y - 49.9).abs() < 1e-4);
        assert!((f.point(2).unwrap().y - 99.9).abs() < 1e-4);
    }

    #[test]
    fn fall_leaves_x_and_z_alone() {
        let mut f = field();
        f.fall(0.1);
        let p = f.point(1).unwrap();
        assert_eq!((p.x, p.z), (-3.0, 4.0));
    }

    #[test]
    fn exactly_zero_does_not_wrap() {
        let mut f = ParticleField::from_points([Vec3::new(0.0, 0.5, 0.0)]);
        f.fall(0.5);
        assert_eq!(f.point(0).unwrap().y, 0.0);
    }
}
