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

//! The egui debug window: live tweaks for rendering, scene, and camera.

use lithos_core::camera::ProjectionMode;
use lithos_core::math::Vec3;
use lithos_core::Camera;

use crate::scene::DemoScene;
use crate::settings::EngineSettings;

/// Per-frame numbers shown in the debug window.
pub struct FrameStats {
    /// Frames per second, smoothed by the caller.
    pub fps: f32,
    /// Chunks currently holding GPU meshes.
    pub chunk_count: usize,
    /// Whether the physics simulation still has awake bodies.
    pub physics_active: bool,
}

/// What the frame loop needs to act on after the window ran.
#[derive(Debug, Default)]
pub struct DebugUiResponse {
    /// The world size changed and "Rebuild" was clicked.
    pub rebuild_world: bool,
    /// The camera widgets changed position or rotation.
    pub camera_overridden: bool,
}

/// Draws the debug window and applies edits in place.
pub fn draw_debug_window(
    ctx: &egui::Context,
    settings: &mut EngineSettings,
    camera: &mut Camera,
    scene: &mut DemoScene,
    stats: &FrameStats,
) -> DebugUiResponse {
    let mut response = DebugUiResponse::default();

    egui::Window::new("Debug window").show(ctx, |ui| {
        ui.label(format!(
            "{:.1} fps | {} chunks | physics {}",
            stats.fps,
            stats.chunk_count,
            if stats.physics_active { "active" } else { "asleep" }
        ));
        ui.separator();

        ui.horizontal(|ui| {
            ui.label("Clear color");
            ui.color_edit_button_rgba_unmultiplied(&mut settings.clear_color);
        });
        ui.checkbox(&mut settings.wireframe, "Draw lines");
        ui.separator();

        for block in &mut scene.blocks {
            ui.collapsing(block.name.clone(), |ui| {
                ui.horizontal(|ui| {
                    ui.label("Position");
                    drag_vec3(ui, &mut block.position, 0.1);
                });
                ui.horizontal(|ui| {
                    ui.label("Scale");
                    drag_vec3(ui, &mut block.scale, 0.01);
                });
                ui.horizontal(|ui| {
                    ui.label("Rotation");
                    if drag_vec3(ui, &mut block.rotation_degrees, 1.0) {
                        // Hand-edited rotation beats the physics pose until
                        // the next sync.
                        block.rotation_override = None;
                    }
                });
            });
        }
        ui.separator();

        ui.label("Camera");
        let mut position = camera.position();
        let mut rotation = camera.rotation();
        let mut changed = false;
        ui.horizontal(|ui| {
            ui.label("Position");
            changed |= drag_vec3(ui, &mut position, 0.1);
        });
        ui.horizontal(|ui| {
            ui.label("Rotation");
            changed |= drag_vec3(ui, &mut rotation, 1.0);
        });
        if changed {
            camera.set_position_rotation(position, rotation);
            response.camera_overridden = true;
        }

        let mut perspective = settings.perspective;
        ui.checkbox(&mut perspective, "Perspective");
        if perspective != settings.perspective {
            settings.perspective = perspective;
            camera.set_projection_mode(if perspective {
                ProjectionMode::Perspective
            } else {
                ProjectionMode::Orthographic
            });
        }
        if ui
            .add(egui::Slider::new(&mut settings.fov_y_degrees, 30.0..=120.0).text("FOV"))
            .changed()
        {
            camera.set_fov_y_degrees(settings.fov_y_degrees);
        }
        ui.add(
            egui::DragValue::new(&mut settings.camera_speed)
                .speed(0.5)
                .prefix("Speed "),
        );
        ui.horizontal(|ui| {
            ui.label("Sensitivity");
            ui.add(egui::DragValue::new(&mut settings.camera_sensitivity[0]).speed(1.0));
            ui.add(egui::DragValue::new(&mut settings.camera_sensitivity[1]).speed(1.0));
        });
        let position = camera.position();
        let direction = camera.direction();
        ui.label(format!(
            "at ({:.1}, {:.1}, {:.1}) looking ({:.2}, {:.2}, {:.2})",
            position.x, position.y, position.z, direction.x, direction.y, direction.z
        ));
        ui.separator();

        ui.horizontal(|ui| {
            ui.label("World size");
            for axis in &mut settings.world_size {
                ui.add(egui::DragValue::new(axis).range(1..=16));
            }
            if ui.button("Rebuild").clicked() {
                response.rebuild_world = true;
            }
        });
    });

    response
}

fn drag_vec3(ui: &mut egui::Ui, v: &mut Vec3, speed: f64) -> bool {
    let mut changed = false;
    changed |= ui.add(egui::DragValue::new(&mut v.x).speed(speed)).changed();
    changed |= ui.add(egui::DragValue::new(&mut v.y).speed(speed)).changed();
    changed |= ui.add(egui::DragValue::new(&mut v.z).speed(speed)).changed();
    changed
}
