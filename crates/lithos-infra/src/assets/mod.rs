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

//! Filesystem asset loading: textures decoded through `image`, cached in CPU
//! memory under caller-chosen names.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use lithos_core::asset::CpuTexture;
use thiserror::Error;

/// Errors from asset loading.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The file could not be read.
    #[error("failed to read asset '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file was read but could not be decoded as an image.
    #[error("failed to decode image '{path}': {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// No asset is cached under the requested name.
    #[error("no asset loaded under the name '{name}'")]
    NotFound { name: String },
}

/// Loads and caches assets relative to a root directory.
pub struct AssetServer {
    root: PathBuf,
    textures: HashMap<String, CpuTexture>,
}

impl AssetServer {
    /// Creates a server resolving paths relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        log::info!("Asset root: {}", root.display());
        Self {
            root,
            textures: HashMap::new(),
        }
    }

    /// Creates a server rooted next to the running executable, falling back
    /// to the current directory when the executable path is unavailable.
    pub fn from_exe_path() -> Self {
        let root = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(root)
    }

    /// The directory asset paths are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reads a text file relative to the asset root.
    pub fn read_text(&self, relative: impl AsRef<Path>) -> Result<String, AssetError> {
        let path = self.root.join(relative);
        std::fs::read_to_string(&path).map_err(|source| AssetError::Io { path, source })
    }

    /// Loads the image at `relative`, converts it to RGBA8, and caches it
    /// under `name`. Reloading an existing name replaces the cached texture.
    pub fn load_texture(
        &mut self,
        name: impl Into<String>,
        relative: impl AsRef<Path>,
    ) -> Result<&CpuTexture, AssetError> {
        let name = name.into();
        let path = self.root.join(relative);

        let bytes = std::fs::read(&path).map_err(|source| AssetError::Io {
            path: path.clone(),
            source,
        })?;
        let decoded = image::load_from_memory(&bytes).map_err(|source| AssetError::Decode {
            path: path.clone(),
            source,
        })?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        log::info!(
            "Loaded texture '{name}' from {} ({width}x{height})",
            path.display()
        );

        let texture = CpuTexture {
            pixels: rgba.into_raw(),
            width,
            height,
        };
        self.textures.insert(name.clone(), texture);
        self.texture(&name)
    }

    /// Stores an already-decoded texture under `name`.
    pub fn insert_texture(&mut self, name: impl Into<String>, texture: CpuTexture) {
        self.textures.insert(name.into(), texture);
    }

    /// Looks up a cached texture by name.
    pub fn texture(&self, name: &str) -> Result<&CpuTexture, AssetError> {
        self.textures.get(name).ok_or_else(|| AssetError::NotFound {
            name: name.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([255, 0, 0, 255]));
        img.save_with_format(&path, image::ImageFormat::Png)
            .unwrap();
        path
    }

    #[test]
    fn test_load_texture_caches_rgba8() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "atlas.png", 4, 2);

        let mut server = AssetServer::new(dir.path());
        server.load_texture("atlas", "atlas.png").unwrap();

        let tex = server.texture("atlas").unwrap();
        assert_eq!((tex.width, tex.height), (4, 2));
        assert_eq!(tex.pixels.len(), 4 * 2 * 4);
        assert_eq!(&tex.pixels[0..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut server = AssetServer::new(dir.path());
        let err = server.load_texture("atlas", "nope.png").unwrap_err();
        assert!(matches!(err, AssetError::Io { .. }));
    }

    #[test]
    fn test_garbage_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.png");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"not an image").unwrap();

        let mut server = AssetServer::new(dir.path());
        let err = server.load_texture("bad", "bad.png").unwrap_err();
        assert!(matches!(err, AssetError::Decode { .. }));
    }

    #[test]
    fn test_unknown_name_is_not_found() {
        let server = AssetServer::new(".");
        let err = server.texture("ghost").unwrap_err();
        assert!(matches!(err, AssetError::NotFound { .. }));
    }

    #[test]
    fn test_read_text() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("hello.txt"), "voxels").unwrap();
        let server = AssetServer::new(dir.path());
        assert_eq!(server.read_text("hello.txt").unwrap(), "voxels");
    }
}
