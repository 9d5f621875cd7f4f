//! Temporary workspaces holding CLI input files.

use camino::Utf8PathBuf;
use tempfile::TempDir;

/// Trails for a beginner: only the first is short and easy.
pub(super) const TRAILS_JSON: &str = r#"[
    {"id": 1, "name": "Lakeside stroll", "difficulty": 2.0, "distance_km": 3.0,
     "duration_minutes": 40, "elevation_gain_m": 100.0, "location": {"x": 7.1, "y": 46.0}},
    {"id": 2, "name": "Steep climb", "difficulty": 5.0, "distance_km": 3.0,
     "duration_minutes": 40, "elevation_gain_m": 400.0, "location": {"x": 7.2, "y": 46.0}},
    {"id": 3, "name": "Long valley", "difficulty": 2.0, "distance_km": 3.0,
     "duration_minutes": 120, "elevation_gain_m": 400.0, "location": {"x": 7.3, "y": 46.0}}
]"#;

/// A beginner with low fitness, 45 minutes and sunshine.
pub(super) const REQUEST_JSON: &str = r#"{
    "user": {"experience": "beginner", "fitness": "low"},
    "context": {"time_available": 45, "weather": "sunny"}
}"#;

/// Three short, easy outings.
pub(super) const CASUAL_TRAILS_JSON: &str = r#"[
    {"id": 11, "name": "Park loop", "difficulty": 1.5, "distance_km": 3.0,
     "duration_minutes": 60, "elevation_gain_m": 80.0, "landscapes": ["forest"],
     "safety_risks": ["scree"], "popularity": 0.5, "location": {"x": 7.0, "y": 46.0}},
    {"id": 12, "name": "River walk", "difficulty": 2.0, "distance_km": 4.0,
     "duration_minutes": 70, "elevation_gain_m": 100.0, "landscapes": ["forest"],
     "safety_risks": ["scree"], "popularity": 0.5, "location": {"x": 7.1, "y": 46.0}},
    {"id": 13, "name": "Meadow circuit", "difficulty": 2.5, "distance_km": 5.0,
     "duration_minutes": 80, "elevation_gain_m": 120.0, "landscapes": ["forest"],
     "safety_risks": ["scree"], "popularity": 0.5, "location": {"x": 7.2, "y": 46.0}}
]"#;

pub(super) const CASUAL_ACTIVITIES_JSON: &str = r#"[
    {"trail_id": 11, "completed_on": "2024-05-01"},
    {"trail_id": 12, "completed_on": "2024-05-08"},
    {"trail_id": 13, "completed_on": "2024-05-15"}
]"#;

/// A scratch directory with UTF-8 paths.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    pub(super) root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn write(&self, name: &str, contents: &str) -> Utf8PathBuf {
        let path = self.root.join(name);
        std::fs::write(&path, contents).expect("write input file");
        path
    }
}
