//! Developer tooling: read-only scene inspection.
//!
//! # Invariants
//! - Tools never mutate the scene context.

mod inspector;

pub use inspector::{CollectionStats, ObjectInfo, SceneInspector, SceneSummary};

pub fn crate_info() -> &'static str {
    concat!("ofrenda-tools v", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("tools"));
    }
}
