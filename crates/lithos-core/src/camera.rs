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

//! The free-fly Euler camera.

use serde::{Deserialize, Serialize};

use crate::math::{degrees_to_radians, Mat4, Vec2, Vec3};

/// How the camera projects the scene onto the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectionMode {
    /// Perspective projection with a configurable vertical field of view.
    Perspective,
    /// Orthographic projection with a fixed half-height of 2 units.
    Orthographic,
}

const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 10_000.0;
const ORTHO_HALF_HEIGHT: f32 = 2.0;

const WORLD_FORWARD: Vec3 = Vec3::new(0.0, 0.0, -1.0);
const WORLD_RIGHT: Vec3 = Vec3::X;
const WORLD_UP: Vec3 = Vec3::Y;

/// A free-fly camera driven by Euler angles.
///
/// Rotation is stored in **degrees** as `(pitch, yaw, roll)`. The basis
/// vectors are rebuilt from the angles on every change by applying the
/// transposed `Rx * Rz * Ry` rotation to the world axes, and movement
/// follows the basis, so "forward" is wherever the camera looks.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    rotation: Vec3,
    projection_mode: ProjectionMode,
    fov_y_degrees: f32,
    aspect_ratio: f32,

    view_matrix: Mat4,
    projection_matrix: Mat4,

    direction: Vec3,
    right: Vec3,
    up: Vec3,
}

impl Camera {
    /// Creates a camera at `position` with Euler `rotation` in degrees.
    ///
    /// Starts with a 90° perspective projection at aspect 1; callers set the
    /// real aspect ratio once the window size is known.
    pub fn new(position: Vec3, rotation: Vec3, projection_mode: ProjectionMode) -> Self {
        let mut camera = Self {
            position,
            rotation,
            projection_mode,
            fov_y_degrees: 90.0,
            aspect_ratio: 1.0,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
            direction: WORLD_FORWARD,
            right: WORLD_RIGHT,
            up: WORLD_UP,
        };
        camera.update_view_matrix();
        camera.update_projection_matrix();
        camera
    }

    /// The camera's position.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// The camera's Euler rotation `(pitch, yaw, roll)`, in degrees.
    #[inline]
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// The normalized look direction.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// The current projection mode.
    #[inline]
    pub fn projection_mode(&self) -> ProjectionMode {
        self.projection_mode
    }

    /// The vertical field of view, in degrees.
    #[inline]
    pub fn fov_y_degrees(&self) -> f32 {
        self.fov_y_degrees
    }

    /// The cached view matrix.
    #[inline]
    pub fn view_matrix(&self) -> Mat4 {
        self.view_matrix
    }

    /// The cached projection matrix.
    #[inline]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }

    /// The combined `projection * view` matrix handed to shaders.
    #[inline]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    /// Moves the camera to `position`.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.update_view_matrix();
    }

    /// Sets the Euler rotation `(pitch, yaw, roll)` in degrees.
    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
        self.update_view_matrix();
    }

    /// Sets position and rotation together with a single matrix refresh.
    pub fn set_position_rotation(&mut self, position: Vec3, rotation: Vec3) {
        self.position = position;
        self.rotation = rotation;
        self.update_view_matrix();
    }

    /// Switches between perspective and orthographic projection.
    pub fn set_projection_mode(&mut self, projection_mode: ProjectionMode) {
        self.projection_mode = projection_mode;
        self.update_projection_matrix();
    }

    /// Sets the viewport aspect ratio (width / height).
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio.max(f32::MIN_POSITIVE);
        self.update_projection_matrix();
    }

    /// Sets the vertical field of view in degrees (perspective mode only).
    pub fn set_fov_y_degrees(&mut self, fov_y_degrees: f32) {
        self.fov_y_degrees = fov_y_degrees;
        self.update_projection_matrix();
    }

    /// Applies a mouse-look delta.
    ///
    /// Yaw follows the horizontal delta, pitch the vertical one, both scaled
    /// by `dt` and the per-axis `sensitivity`. Pitch is clamped to ±90° so
    /// the camera can't flip over the top.
    pub fn rotate_by(&mut self, delta: Vec2, dt: f32, sensitivity: Vec2) {
        self.rotation.x -= delta.y * dt * sensitivity.y;
        self.rotation.y -= delta.x * dt * sensitivity.x;
        self.rotation.x = self.rotation.x.clamp(-90.0, 90.0);
        self.update_view_matrix();
    }

    /// Moves along the look direction by `amount * dt`.
    pub fn move_forward(&mut self, amount: f32, dt: f32) {
        self.position = self.position + self.direction * amount * dt;
        self.update_view_matrix();
    }

    /// Strafes along the right vector by `amount * dt`.
    pub fn move_right(&mut self, amount: f32, dt: f32) {
        self.position = self.position + self.right * amount * dt;
        self.update_view_matrix();
    }

    /// Moves along the up vector by `amount * dt`.
    pub fn move_up(&mut self, amount: f32, dt: f32) {
        self.position = self.position + self.up * amount * dt;
        self.update_view_matrix();
    }

    fn update_view_matrix(&mut self) {
        let pitch = degrees_to_radians(self.rotation.x);
        let yaw = degrees_to_radians(self.rotation.y);
        let roll = degrees_to_radians(self.rotation.z);

        let euler = (Mat4::from_rotation_x(pitch)
            * Mat4::from_rotation_z(roll)
            * Mat4::from_rotation_y(yaw))
        .transpose();

        self.direction = euler.transform_point3(WORLD_FORWARD).normalize();
        self.right = euler.transform_point3(WORLD_RIGHT).normalize();
        self.up = euler.transform_point3(WORLD_UP).normalize();

        // Degenerate only if up becomes parallel to direction, which the
        // pitch clamp prevents; keep the previous view in that case.
        if let Some(view) =
            Mat4::look_at_rh(self.position, self.position + self.direction, self.up)
        {
            self.view_matrix = view;
        }
    }

    fn update_projection_matrix(&mut self) {
        self.projection_matrix = match self.projection_mode {
            ProjectionMode::Perspective => Mat4::perspective_rh_zo(
                degrees_to_radians(self.fov_y_degrees),
                self.aspect_ratio,
                Z_NEAR,
                Z_FAR,
            ),
            ProjectionMode::Orthographic => {
                let half_width = ORTHO_HALF_HEIGHT * self.aspect_ratio;
                Mat4::orthographic_rh_zo(
                    -half_width,
                    half_width,
                    -ORTHO_HALF_HEIGHT,
                    ORTHO_HALF_HEIGHT,
                    Z_NEAR,
                    Z_FAR,
                )
            }
        };
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::ZERO, ProjectionMode::Perspective)
    }
}
