// Copyright 2025 the Lithos Engine authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Engine settings, persisted as JSON next to the executable.

use std::path::Path;

use anyhow::{Context, Result};
use lithos_core::voxel::Generator;
use serde::{Deserialize, Serialize};

/// Everything the engine reads at startup and the debug window edits at
/// runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Window title.
    pub window_title: String,
    /// Initial window width in logical pixels.
    pub window_width: u32,
    /// Initial window height in logical pixels.
    pub window_height: u32,

    /// World size in chunks per axis.
    pub world_size: [u32; 3],
    /// Chunk fill strategy.
    pub generator: Generator,

    /// Background clear color (linear RGBA).
    pub clear_color: [f32; 4],
    /// Draw the scene as wireframe when the GPU supports it.
    pub wireframe: bool,
    /// Perspective projection; orthographic when false.
    pub perspective: bool,
    /// Vertical field of view in degrees (perspective only).
    pub fov_y_degrees: f32,

    /// Free-fly movement speed in units per second.
    pub camera_speed: f32,
    /// Mouse-look sensitivity per axis (x, y).
    pub camera_sensitivity: [f32; 2],

    /// Texture atlas path, relative to the asset root.
    pub atlas_path: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            window_title: "Lithos Engine".to_string(),
            window_width: 640,
            window_height: 480,
            world_size: [1, 1, 3],
            generator: Generator::Terrain { id: 1, floor_id: 2 },
            clear_color: [0.45, 0.55, 0.60, 1.0],
            wireframe: false,
            perspective: true,
            fov_y_degrees: 90.0,
            camera_speed: 20.0,
            camera_sensitivity: [100.0, 100.0],
            atlas_path: "res/atlas.png".to_string(),
        }
    }
}

impl EngineSettings {
    /// Loads settings from `path`.
    ///
    /// A missing file is not an error: first launches run on defaults. A file
    /// that exists but fails to parse is, so a typo doesn't silently wipe the
    /// user's configuration.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!(
                "No settings file at {}, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        let settings = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse settings file {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Writes the settings to `path` as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)
            .with_context(|| format!("failed to write settings file {}", path.display()))?;
        log::info!("Saved settings to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = EngineSettings::load(&dir.path().join("nope.json")).unwrap();
        assert_eq!(settings.window_width, 640);
        assert_eq!(settings.world_size, [1, 1, 3]);
        assert_eq!(settings.camera_speed, 20.0);
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = EngineSettings::default();
        settings.world_size = [2, 1, 2];
        settings.wireframe = true;
        settings.fov_y_degrees = 75.0;
        settings.save(&path).unwrap();

        let loaded = EngineSettings::load(&path).unwrap();
        assert_eq!(loaded.world_size, [2, 1, 2]);
        assert!(loaded.wireframe);
        assert_eq!(loaded.fov_y_degrees, 75.0);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(EngineSettings::load(&path).is_err());
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "camera_speed": 5.0 }"#).unwrap();

        let loaded = EngineSettings::load(&path).unwrap();
        assert_eq!(loaded.camera_speed, 5.0);
        assert_eq!(loaded.window_title, "Lithos Engine");
    }
}
