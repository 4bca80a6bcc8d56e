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

//! The wgpu rendering backend: device/surface plumbing, GPU resource
//! wrappers, the voxel pipeline, and the frame renderer.

pub mod context;
pub mod mesh;
pub mod pipeline;
pub mod renderer;
pub mod shaders;
pub mod texture;

pub use context::WgpuContext;
pub use mesh::{GpuMesh, ModelUniform};
pub use pipeline::VoxelPipeline;
pub use renderer::{MeshId, RenderError, RenderFrame, Renderer, SceneDraw};
pub use texture::{DepthTexture, GpuTexture};
