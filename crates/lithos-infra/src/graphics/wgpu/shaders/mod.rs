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

//! Compile-time embedded WGSL shader sources.

/// The voxel shader: transforms `view_proj * model * position`, samples the
/// texture atlas, and multiplies by the per-face light factor and the
/// per-object tint. Used for chunk meshes and scene cubes alike.
pub const VOXEL_WGSL: &str = include_str!("voxel.wgsl");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voxel_shader_valid() {
        assert!(VOXEL_WGSL.contains("@vertex"));
        assert!(VOXEL_WGSL.contains("@fragment"));
    }

    #[test]
    fn test_voxel_shader_bind_groups() {
        // The pipeline layout counts on these three groups.
        assert!(VOXEL_WGSL.contains("@group(0) @binding(0)"));
        assert!(VOXEL_WGSL.contains("@group(1) @binding(0)"));
        assert!(VOXEL_WGSL.contains("@group(2) @binding(1)"));
    }
}
