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

//! GPU-side mesh buffers and the per-object uniform binding.

use bytemuck::{Pod, Zeroable};
use lithos_core::math::{LinearRgba, Mat4};
use lithos_core::voxel::MeshData;
use wgpu::util::DeviceExt;

/// Vertex and index buffers for one uploaded mesh.
#[derive(Debug)]
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl GpuMesh {
    /// Uploads `mesh` into device-local buffers.
    ///
    /// Callers should skip empty meshes; uploading one produces zero-sized
    /// buffers that a render pass cannot bind.
    pub fn upload(device: &wgpu::Device, mesh: &MeshData, label: &str) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertex Buffer")),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Index Buffer")),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.index_count(),
        }
    }
}

/// Per-object shader uniform: model matrix plus a color tint.
///
/// Layout mirrors `ModelUniform` in `voxel.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct ModelUniform {
    pub model: [[f32; 4]; 4],
    pub tint: [f32; 4],
}

impl ModelUniform {
    /// Builds the uniform from a model matrix and tint color.
    pub fn new(model: &Mat4, tint: LinearRgba) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            tint: tint.to_array(),
        }
    }
}

impl Default for ModelUniform {
    fn default() -> Self {
        Self::new(&Mat4::IDENTITY, LinearRgba::WHITE)
    }
}

/// A uniform buffer plus bind group holding one object's [`ModelUniform`].
///
/// Each drawable (chunk or scene cube) owns one, rewritten per frame when its
/// transform or tint changes.
#[derive(Debug)]
pub struct ModelBinding {
    buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl ModelBinding {
    /// Creates the uniform buffer and binds it against the model layout.
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, label: &str) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Model Uniform")),
            contents: bytemuck::bytes_of(&ModelUniform::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label} Model Bind Group")),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Self { buffer, bind_group }
    }

    /// Writes a new uniform value into the buffer.
    pub fn write(&self, queue: &wgpu::Queue, uniform: &ModelUniform) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(uniform));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lithos_core::math::Vec3;

    #[test]
    fn test_model_uniform_layout() {
        // mat4 (64 bytes) + vec4 (16 bytes), no padding.
        assert_eq!(std::mem::size_of::<ModelUniform>(), 80);
    }

    #[test]
    fn test_model_uniform_columns() {
        let uniform = ModelUniform::new(
            &Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)),
            LinearRgba::WHITE,
        );
        assert_eq!(uniform.model[3][0], 1.0);
        assert_eq!(uniform.model[3][1], 2.0);
        assert_eq!(uniform.model[3][2], 3.0);
        assert_eq!(uniform.tint, [1.0, 1.0, 1.0, 1.0]);
    }
}
