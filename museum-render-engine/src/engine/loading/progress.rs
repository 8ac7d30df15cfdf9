use bevy::prelude::*;

/// Startup milestones reported to the host page while the entrance loads.
#[derive(Resource, Default, Debug, Clone, PartialEq)]
pub struct LoadingProgress {
    pub settings_resolved: bool,
    pub corridor_textures_ready: bool,
    /// Set once the first catalog request finishes, successfully or not.
    pub catalog_resolved: bool,
}

impl LoadingProgress {
    pub fn stages(&self) -> [(&'static str, bool); 3] {
        [
            ("Settings", self.settings_resolved),
            ("Corridor textures", self.corridor_textures_ready),
            ("Catalog", self.catalog_resolved),
        ]
    }

    pub fn fraction(&self) -> f32 {
        let stages = self.stages();
        let done = stages.iter().filter(|(_, done)| *done).count();
        done as f32 / stages.len() as f32
    }

    pub fn is_complete(&self) -> bool {
        self.stages().iter().all(|(_, done)| *done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_counts_finished_stages() {
        let mut progress = LoadingProgress::default();
        assert_eq!(progress.fraction(), 0.0);
        assert!(!progress.is_complete());

        progress.settings_resolved = true;
        progress.catalog_resolved = true;
        assert!((progress.fraction() - 2.0 / 3.0).abs() < 1e-6);

        progress.corridor_textures_ready = true;
        assert!(progress.is_complete());
    }
}
