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

//! Glue between egui, winit, and wgpu: event capture, UI construction, and
//! painting into the frame's command encoder.

use winit::event::WindowEvent;
use winit::window::Window;

/// Tessellated UI output for one frame, produced by [`EguiLayer::run`] and
/// consumed by [`EguiLayer::paint`].
pub struct PreparedUi {
    textures_delta: egui::TexturesDelta,
    paint_jobs: Vec<egui::ClippedPrimitive>,
    pixels_per_point: f32,
}

/// The egui overlay: owns the egui context, the winit event bridge, and the
/// wgpu paint renderer.
pub struct EguiLayer {
    context: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

impl EguiLayer {
    /// Creates the overlay for `window`, rendering into `surface_format`.
    ///
    /// The overlay draws after the 3D pass with depth testing off, so no
    /// depth format is passed to the egui renderer.
    pub fn new(window: &Window, device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let context = egui::Context::default();
        let state = egui_winit::State::new(
            context.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let renderer = egui_wgpu::Renderer::new(device, surface_format, None, 1, false);
        Self {
            context,
            state,
            renderer,
        }
    }

    /// Feeds a window event to egui. Returns `true` when egui consumed it,
    /// in which case it must not reach the game's input state.
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// Runs the UI closure for this frame and tessellates the result.
    pub fn run(&mut self, window: &Window, ui: impl FnMut(&egui::Context)) -> PreparedUi {
        let raw_input = self.state.take_egui_input(window);
        let output = self.context.run(raw_input, ui);
        self.state
            .handle_platform_output(window, output.platform_output);
        let paint_jobs = self
            .context
            .tessellate(output.shapes, output.pixels_per_point);
        PreparedUi {
            textures_delta: output.textures_delta,
            paint_jobs,
            pixels_per_point: output.pixels_per_point,
        }
    }

    /// Uploads this frame's texture deltas and paints the UI into `view`.
    ///
    /// Runs as a second render pass loading the existing color attachment,
    /// so the 3D scene stays underneath.
    pub fn paint(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        size_in_pixels: (u32, u32),
        prepared: PreparedUi,
    ) {
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [size_in_pixels.0, size_in_pixels.1],
            pixels_per_point: prepared.pixels_per_point,
        };

        for (id, delta) in &prepared.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, delta);
        }
        self.renderer
            .update_buffers(device, queue, encoder, &prepared.paint_jobs, &screen);

        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Overlay Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                })
                .forget_lifetime();
            self.renderer.render(&mut pass, &prepared.paint_jobs, &screen);
        }

        for id in &prepared.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}
