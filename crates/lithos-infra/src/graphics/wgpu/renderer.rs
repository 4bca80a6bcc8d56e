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

//! The frame renderer: owns the GPU resources for chunks, scene meshes, and
//! textures, and records one render pass per frame.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use lithos_core::asset::CpuTexture;
use lithos_core::math::{LinearRgba, Mat4};
use lithos_core::voxel::{ChunkPos, MeshData};
use thiserror::Error;
use wgpu::util::DeviceExt;
use winit::window::Window;

use super::context::WgpuContext;
use super::mesh::{GpuMesh, ModelBinding, ModelUniform};
use super::pipeline::VoxelPipeline;
use super::texture::{DepthTexture, GpuTexture};

/// Errors surfaced by the renderer.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Graphics context initialization failed.
    #[error("graphics initialization failed: {0}")]
    Init(#[from] anyhow::Error),
    /// The device is out of memory; the application cannot continue rendering.
    #[error("the graphics device is out of memory")]
    OutOfMemory,
}

/// Handle to a mesh registered with [`Renderer::register_mesh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(u64);

impl MeshId {
    /// Builds a handle from its raw id. Useful for tests and serialization;
    /// a handle not produced by [`Renderer::register_mesh`] draws nothing.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// One scene object to draw this frame.
#[derive(Debug, Clone)]
pub struct SceneDraw<'a> {
    /// Mesh previously registered with the renderer.
    pub mesh: MeshId,
    /// Object-to-world transform.
    pub model: Mat4,
    /// Multiplied with the sampled texture color.
    pub tint: LinearRgba,
    /// Name of a texture registered with the renderer.
    pub texture: &'a str,
}

/// Everything the renderer needs to draw one frame.
#[derive(Debug)]
pub struct RenderFrame<'a> {
    pub clear_color: LinearRgba,
    pub view_proj: Mat4,
    pub wireframe: bool,
    /// Texture applied to all chunk meshes.
    pub atlas: &'a str,
    pub draws: &'a [SceneDraw<'a>],
}

/// Owns the graphics context and all GPU-side scene resources.
pub struct Renderer {
    context: WgpuContext,
    depth: DepthTexture,
    pipeline: VoxelPipeline,

    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,

    textures: HashMap<String, GpuTexture>,
    chunks: HashMap<ChunkPos, (GpuMesh, ModelBinding)>,
    meshes: HashMap<MeshId, (GpuMesh, ModelBinding)>,
    next_mesh_id: u64,

    wireframe_warned: bool,
    missing_textures_warned: HashSet<String>,
}

impl Renderer {
    /// Initializes the graphics context and pipeline for `window`.
    pub fn new(window: Arc<Window>) -> Result<Self, RenderError> {
        let context = WgpuContext::new(window)?;
        let (width, height) = context.size();
        let depth = DepthTexture::new(&context.device, width, height);
        let pipeline = VoxelPipeline::new(
            &context.device,
            context.surface_format(),
            context.wireframe_supported(),
        );

        let frame_buffer = context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Frame Uniform Buffer"),
                contents: bytemuck::cast_slice(&Mat4::IDENTITY.to_cols_array_2d()),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let frame_bind_group = context
            .device
            .create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Frame Bind Group"),
                layout: &pipeline.frame_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: frame_buffer.as_entire_binding(),
                }],
            });

        Ok(Self {
            context,
            depth,
            pipeline,
            frame_buffer,
            frame_bind_group,
            textures: HashMap::new(),
            chunks: HashMap::new(),
            meshes: HashMap::new(),
            next_mesh_id: 0,
            wireframe_warned: false,
            missing_textures_warned: HashSet::new(),
        })
    }

    /// Access to the underlying graphics context, mainly for the UI layer.
    pub fn context(&self) -> &WgpuContext {
        &self.context
    }

    /// Resizes the swapchain and recreates the depth buffer.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
        let (w, h) = self.context.size();
        self.depth = DepthTexture::new(&self.context.device, w, h);
    }

    /// Uploads a texture under `name`, replacing any previous one.
    pub fn register_texture(&mut self, name: &str, cpu: &CpuTexture) {
        let gpu = GpuTexture::from_cpu(
            &self.context.device,
            &self.context.queue,
            &self.pipeline.texture_layout,
            cpu,
            name,
        );
        self.textures.insert(name.to_owned(), gpu);
    }

    /// Uploads a mesh for scene drawing and returns its handle.
    pub fn register_mesh(&mut self, mesh: &MeshData) -> MeshId {
        let id = MeshId(self.next_mesh_id);
        self.next_mesh_id += 1;
        let gpu = GpuMesh::upload(&self.context.device, mesh, &format!("Scene Mesh {}", id.0));
        let binding = ModelBinding::new(
            &self.context.device,
            &self.pipeline.model_layout,
            &format!("Scene Mesh {}", id.0),
        );
        self.meshes.insert(id, (gpu, binding));
        id
    }

    /// Uploads (or replaces) the mesh for the chunk at `pos`.
    ///
    /// Empty meshes remove the chunk's GPU resources instead; a fully carved
    /// out chunk costs nothing at draw time.
    pub fn upload_chunk_mesh(&mut self, pos: ChunkPos, mesh: &MeshData) {
        if mesh.is_empty() {
            if self.chunks.remove(&pos).is_some() {
                log::debug!("Chunk {pos:?}: mesh emptied, GPU buffers released");
            }
            return;
        }

        let label = format!("Chunk ({}, {}, {})", pos.x, pos.y, pos.z);
        let gpu = GpuMesh::upload(&self.context.device, mesh, &label);
        let binding = ModelBinding::new(&self.context.device, &self.pipeline.model_layout, &label);

        // Chunk vertices are chunk-local; the model matrix places the chunk
        // on the world grid. Written once, chunks do not move.
        let uniform = ModelUniform::new(
            &Mat4::from_translation(pos.world_origin()),
            LinearRgba::WHITE,
        );
        binding.write(&self.context.queue, &uniform);

        self.chunks.insert(pos, (gpu, binding));
    }

    /// Removes all chunk meshes, e.g. before regenerating the world.
    pub fn clear_chunks(&mut self) {
        self.chunks.clear();
    }

    /// Number of chunks currently holding GPU buffers.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Renders one frame, then hands the encoder to `overlay` so the UI layer
    /// can paint on top before the frame is presented.
    pub fn render<F>(&mut self, frame: &RenderFrame<'_>, overlay: F) -> Result<(), RenderError>
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        let surface_texture = match self.context.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.context.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface frame acquire timed out, skipping frame");
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(wgpu::SurfaceError::Other) => {
                log::error!("Surface returned an unknown error, skipping frame");
                return Ok(());
            }
        };
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        if frame.wireframe && !self.pipeline.has_wireframe() && !self.wireframe_warned {
            log::warn!("Wireframe requested but POLYGON_MODE_LINE is unavailable, drawing filled");
            self.wireframe_warned = true;
        }

        self.warn_if_missing(frame.atlas);
        for draw in frame.draws {
            self.warn_if_missing(draw.texture);
        }

        self.context.queue.write_buffer(
            &self.frame_buffer,
            0,
            bytemuck::cast_slice(&frame.view_proj.to_cols_array_2d()),
        );
        for draw in frame.draws {
            if let Some((_, binding)) = self.meshes.get(&draw.mesh) {
                binding.write(
                    &self.context.queue,
                    &ModelUniform::new(&draw.model, draw.tint),
                );
            }
        }

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let clear = frame.clear_color;
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Voxel Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear.r as f64,
                            g: clear.g as f64,
                            b: clear.b as f64,
                            a: clear.a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_pipeline(self.pipeline.select(frame.wireframe));
            pass.set_bind_group(0, &self.frame_bind_group, &[]);

            if let Some(atlas) = self.textures.get(frame.atlas) {
                pass.set_bind_group(2, &atlas.bind_group, &[]);
                for (gpu, binding) in self.chunks.values() {
                    pass.set_bind_group(1, &binding.bind_group, &[]);
                    pass.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
                    pass.set_index_buffer(gpu.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                    pass.draw_indexed(0..gpu.index_count, 0, 0..1);
                }
            }

            for draw in frame.draws {
                let Some((gpu, binding)) = self.meshes.get(&draw.mesh) else {
                    continue;
                };
                let Some(texture) = self.textures.get(draw.texture) else {
                    continue;
                };
                pass.set_bind_group(1, &binding.bind_group, &[]);
                pass.set_bind_group(2, &texture.bind_group, &[]);
                pass.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
                pass.set_index_buffer(gpu.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..gpu.index_count, 0, 0..1);
            }
        }

        overlay(
            &self.context.device,
            &self.context.queue,
            &mut encoder,
            &view,
        );

        self.context.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    // Logged once per name; a missing texture would otherwise warn on every
    // frame.
    fn warn_if_missing(&mut self, name: &str) {
        if !self.textures.contains_key(name) && self.missing_textures_warned.insert(name.to_owned())
        {
            log::warn!("Texture '{name}' is not registered, skipping draws that use it");
        }
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("chunks", &self.chunks.len())
            .field("meshes", &self.meshes.len())
            .field("textures", &self.textures.len())
            .finish()
    }
}
