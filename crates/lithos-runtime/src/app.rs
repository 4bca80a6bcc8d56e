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

//! The running engine: winit application handler and the per-frame loop.

use std::time::Instant;

use lithos_core::asset::CpuTexture;
use lithos_core::camera::ProjectionMode;
use lithos_core::input::{InputState, KeyCode, MouseButton};
use lithos_core::math::{Vec2, Vec3};
use lithos_core::physics::{BodyRegistry, PhysicsProvider};
use lithos_core::voxel::build_chunk_mesh;
use lithos_core::{Camera, VoxelWorld};
use lithos_infra::assets::AssetServer;
use lithos_infra::graphics::wgpu::{RenderError, RenderFrame, Renderer};
use lithos_infra::physics::RapierPhysicsWorld;
use lithos_infra::platform::input::translate_winit_input;
use lithos_infra::platform::window::{WinitWindow, WinitWindowBuilder};
use lithos_infra::ui::EguiLayer;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

use crate::debug_ui::{self, FrameStats};
use crate::scene::DemoScene;
use crate::settings::EngineSettings;

/// Name the texture atlas is registered under.
const ATLAS: &str = "atlas";

/// The internal state of the running engine, driven by the winit event loop.
///
/// Everything that needs a live window stays `None` until `resumed` fires;
/// winit only hands out windows from inside the event loop.
pub struct EngineState {
    settings: EngineSettings,

    window: Option<WinitWindow>,
    renderer: Option<Renderer>,
    ui: Option<EguiLayer>,
    scene: Option<DemoScene>,

    world: Option<VoxelWorld>,
    physics: RapierPhysicsWorld,
    bodies: BodyRegistry,
    camera: Camera,
    input: InputState,

    last_frame: Instant,
    smoothed_fps: f32,
}

impl EngineState {
    /// Creates the pre-window engine state from loaded settings.
    pub fn new(settings: EngineSettings) -> Self {
        let mut camera = Camera::new(
            Vec3::new(8.0, 20.0, 48.0),
            Vec3::ZERO,
            if settings.perspective {
                ProjectionMode::Perspective
            } else {
                ProjectionMode::Orthographic
            },
        );
        camera.set_fov_y_degrees(settings.fov_y_degrees);

        Self {
            settings,
            window: None,
            renderer: None,
            ui: None,
            scene: None,
            world: None,
            physics: RapierPhysicsWorld::new(),
            bodies: BodyRegistry::new(),
            camera,
            input: InputState::new(),
            last_frame: Instant::now(),
            smoothed_fps: 0.0,
        }
    }

    fn world_size(&self) -> (u32, u32, u32) {
        let [x, y, z] = self.settings.world_size;
        (x, y, z)
    }

    fn rebuild_world(&mut self) {
        log::info!(
            "Rebuilding world: {:?} chunks, generator {:?}",
            self.settings.world_size,
            self.settings.generator
        );
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.clear_chunks();
        }
        self.world = Some(VoxelWorld::generate(self.world_size(), &self.settings.generator));
    }

    fn load_atlas(&mut self) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        let mut assets = AssetServer::from_exe_path();
        let atlas_path = self.settings.atlas_path.clone();
        match assets.load_texture(ATLAS, &atlas_path) {
            Ok(texture) => renderer.register_texture(ATLAS, texture),
            Err(err) => {
                log::warn!("Falling back to the built-in atlas: {err}");
                renderer.register_texture(ATLAS, &fallback_atlas());
            }
        }
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        if exit_requested(&self.input) {
            log::info!("Escape pressed, exiting event loop...");
            event_loop.exit();
            return;
        }

        let now = Instant::now();
        // Clamp pathological gaps (breakpoints, suspend) so physics and
        // movement don't leap.
        let dt = now.duration_since(self.last_frame).as_secs_f32().min(0.1);
        self.last_frame = now;
        if dt > 0.0 {
            self.smoothed_fps = 0.95 * self.smoothed_fps + 0.05 / dt;
        }

        // Camera movement and mouse look.
        let speed = self.settings.camera_speed;
        if self.input.is_key_pressed(KeyCode::KeyW) {
            self.camera.move_forward(speed, dt);
        }
        if self.input.is_key_pressed(KeyCode::KeyS) {
            self.camera.move_forward(-speed, dt);
        }
        if self.input.is_key_pressed(KeyCode::KeyD) {
            self.camera.move_right(speed, dt);
        }
        if self.input.is_key_pressed(KeyCode::KeyA) {
            self.camera.move_right(-speed, dt);
        }
        if self.input.is_key_pressed(KeyCode::Space) {
            self.camera.move_up(speed, dt);
        }
        if self.input.is_key_pressed(KeyCode::ShiftLeft) {
            self.camera.move_up(-speed, dt);
        }
        if self.input.is_mouse_button_pressed(MouseButton::Right) {
            let [sx, sy] = self.settings.camera_sensitivity;
            self.camera
                .rotate_by(self.input.mouse_delta(), dt, Vec2::new(sx, sy));
        }

        // Physics, gated on awake bodies so a settled scene costs nothing.
        let physics_active = self.physics.has_active_bodies();
        if physics_active {
            self.physics.step(dt);
        }
        if let Some(scene) = self.scene.as_mut() {
            scene.sync(&self.physics, &self.bodies);
        }

        // Re-mesh chunks that changed.
        if let (Some(world), Some(renderer)) = (self.world.as_mut(), self.renderer.as_mut()) {
            for pos in world.take_dirty() {
                let mesh = build_chunk_mesh(&world.neighborhood(pos));
                renderer.upload_chunk_mesh(pos, &mesh);
            }
        }

        let (Some(window), Some(renderer), Some(ui), Some(scene)) = (
            self.window.as_ref(),
            self.renderer.as_mut(),
            self.ui.as_mut(),
            self.scene.as_mut(),
        ) else {
            return;
        };

        let stats = FrameStats {
            fps: self.smoothed_fps,
            chunk_count: renderer.chunk_count(),
            physics_active,
        };
        let settings = &mut self.settings;
        let camera = &mut self.camera;
        let mut response = debug_ui::DebugUiResponse::default();
        let prepared = ui.run(window.winit_window(), |ctx| {
            response = debug_ui::draw_debug_window(ctx, settings, camera, scene, &stats);
        });

        let draws = scene.draws();
        let frame = RenderFrame {
            clear_color: lithos_core::math::LinearRgba::new(
                settings.clear_color[0],
                settings.clear_color[1],
                settings.clear_color[2],
                settings.clear_color[3],
            ),
            view_proj: camera.view_projection_matrix(),
            wireframe: settings.wireframe,
            atlas: ATLAS,
            draws: &draws,
        };
        let size = window.inner_size();
        let result = renderer.render(&frame, |device, queue, encoder, view| {
            ui.paint(device, queue, encoder, view, size, prepared);
        });
        match result {
            Ok(()) => {}
            Err(RenderError::OutOfMemory) => {
                log::error!("Graphics device out of memory, shutting down");
                event_loop.exit();
            }
            Err(err) => log::error!("Render error: {err}"),
        }

        if response.rebuild_world {
            self.rebuild_world();
        }
        self.input.end_frame();
    }
}

impl ApplicationHandler for EngineState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized; mobile-style resume cycles.
        }
        log::info!("Application resumed, initializing window and engine systems...");

        let window = match WinitWindowBuilder::new()
            .with_title(self.settings.window_title.clone())
            .with_dimensions(self.settings.window_width, self.settings.window_height)
            .build(event_loop)
        {
            Ok(window) => window,
            Err(err) => {
                log::error!("Window creation failed: {err}");
                event_loop.exit();
                return;
            }
        };

        let renderer = match Renderer::new(window.winit_window().clone()) {
            Ok(renderer) => renderer,
            Err(err) => {
                log::error!("Renderer initialization failed: {err}");
                event_loop.exit();
                return;
            }
        };

        let ui = EguiLayer::new(
            window.winit_window(),
            &renderer.context().device,
            renderer.context().surface_format(),
        );

        self.camera.set_aspect_ratio(window.aspect_ratio());

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.ui = Some(ui);

        self.load_atlas();
        self.rebuild_world();

        let scene = DemoScene::build(
            self.renderer.as_mut().expect("renderer just initialized"),
            &mut self.physics,
            &mut self.bodies,
        );
        self.scene = Some(scene);
        log::info!("Engine systems initialized.");
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        if window.winit_window().id() != id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Shutdown requested, exiting event loop...");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                log::info!("Window resized to: {}x{}", size.width, size.height);
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size.width, size.height);
                }
                self.camera.set_aspect_ratio(window.aspect_ratio());
            }
            WindowEvent::RedrawRequested => self.frame(event_loop),
            event => {
                // The overlay gets first refusal; only unconsumed events
                // reach the game's input state.
                let consumed = match (self.ui.as_mut(), self.window.as_ref()) {
                    (Some(ui), Some(window)) => ui.on_window_event(window.winit_window(), &event),
                    _ => false,
                };
                if !consumed {
                    if let Some(input_event) = translate_winit_input(&event) {
                        self.input.apply(&input_event);
                    }
                }
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl Drop for EngineState {
    fn drop(&mut self) {
        log::info!("EngineState dropped, engine shutdown complete.");
    }
}

/// Escape quits, same as closing the window.
fn exit_requested(input: &InputState) -> bool {
    input.is_key_pressed(KeyCode::Escape)
}

/// A 256x256 magenta/black checkerboard in the atlas tile layout, so a
/// missing atlas file is loudly visible instead of fatal.
fn fallback_atlas() -> CpuTexture {
    const SIZE: u32 = 256;
    const TILE: u32 = 16;
    let mut pixels = Vec::with_capacity((SIZE * SIZE * 4) as usize);
    for y in 0..SIZE {
        for x in 0..SIZE {
            let checker = ((x / TILE) + (y / TILE)) % 2 == 0;
            if checker {
                pixels.extend_from_slice(&[255, 0, 255, 255]);
            } else {
                pixels.extend_from_slice(&[20, 20, 20, 255]);
            }
        }
    }
    CpuTexture {
        pixels,
        width: SIZE,
        height: SIZE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lithos_core::input::InputEvent;

    #[test]
    fn test_escape_requests_exit() {
        let mut input = InputState::new();
        assert!(!exit_requested(&input));

        input.apply(&InputEvent::KeyPressed {
            key: KeyCode::Escape,
        });
        assert!(exit_requested(&input));

        input.apply(&InputEvent::KeyReleased {
            key: KeyCode::Escape,
        });
        assert!(!exit_requested(&input));
    }

    #[test]
    fn test_movement_keys_do_not_request_exit() {
        let mut input = InputState::new();
        input.apply(&InputEvent::KeyPressed { key: KeyCode::KeyW });
        input.apply(&InputEvent::KeyPressed { key: KeyCode::Space });
        assert!(!exit_requested(&input));
    }
}
