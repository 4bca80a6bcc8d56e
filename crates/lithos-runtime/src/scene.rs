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

//! Scene objects drawn on top of the voxel world, and the demo scene that
//! exercises the physics provider.

use lithos_core::math::{degrees_to_radians, LinearRgba, Mat4, Quaternion, Vec3};
use lithos_core::physics::{
    BodyRegistry, BodyType, ColliderDesc, ColliderShape, PhysicsProvider, RigidBodyDesc,
};
use lithos_core::voxel::unit_cube;
use lithos_infra::graphics::wgpu::{MeshId, Renderer, SceneDraw};

/// A textured cube instance placed in the world.
///
/// Rotation is stored as Euler degrees for the debug window; a body synced
/// from physics overrides it with the simulation's quaternion instead.
#[derive(Debug, Clone)]
pub struct Block {
    /// Name shown in the debug window.
    pub name: String,
    /// Texture registered with the renderer.
    pub texture: String,
    /// Mesh registered with the renderer.
    pub mesh: MeshId,
    /// World-space position of the cube center.
    pub position: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
    /// Euler rotation `(x, y, z)` in degrees.
    pub rotation_degrees: Vec3,
    /// Physics-driven rotation, taking precedence over the Euler angles.
    pub rotation_override: Option<Quaternion>,
    /// Color multiplied with the texture.
    pub tint: LinearRgba,
    /// Name of the rigid body driving this block, if any.
    pub body: Option<String>,
}

impl Block {
    /// Creates a unit block at `position` using `mesh` and `texture`.
    pub fn new(name: impl Into<String>, mesh: MeshId, texture: impl Into<String>, position: Vec3) -> Self {
        Self {
            name: name.into(),
            texture: texture.into(),
            mesh,
            position,
            scale: Vec3::new(1.0, 1.0, 1.0),
            rotation_degrees: Vec3::ZERO,
            rotation_override: None,
            tint: LinearRgba::WHITE,
            body: None,
        }
    }

    /// The object-to-world matrix: translation, then rotation, then scale.
    pub fn model_matrix(&self) -> Mat4 {
        let rotation = match self.rotation_override {
            Some(q) => Mat4::from_quat(q),
            None => {
                Mat4::from_rotation_x(degrees_to_radians(self.rotation_degrees.x))
                    * Mat4::from_rotation_y(degrees_to_radians(self.rotation_degrees.y))
                    * Mat4::from_rotation_z(degrees_to_radians(self.rotation_degrees.z))
            }
        };
        Mat4::from_translation(self.position) * rotation * Mat4::from_scale(self.scale)
    }
}

/// A point light. Carried through to the debug window; the voxel shader
/// currently bakes lighting per face instead of sampling lights.
#[derive(Debug, Clone)]
pub struct LightSource {
    /// World-space position.
    pub position: Vec3,
    /// Light color.
    pub color: LinearRgba,
}

/// The built-in demo scene: a static slab and a dynamic cube dropped onto
/// it, both registered as named physics bodies.
pub struct DemoScene {
    /// Scene blocks in draw order.
    pub blocks: Vec<Block>,
    /// Scene lights.
    pub lights: Vec<LightSource>,
}

impl DemoScene {
    /// Name of the dynamic cube's physics body.
    pub const CUBE_BODY: &'static str = "cube";
    /// Name of the static floor's physics body.
    pub const FLOOR_BODY: &'static str = "floor";

    /// Builds the demo scene: uploads its meshes, creates its physics bodies,
    /// and registers them by name.
    pub fn build(
        renderer: &mut Renderer,
        physics: &mut dyn PhysicsProvider,
        bodies: &mut BodyRegistry,
    ) -> Self {
        let cube_mesh = renderer.register_mesh(&unit_cube(1));
        let floor_mesh = renderer.register_mesh(&unit_cube(2));

        // A wide static floor slab below the voxel world; chunks have no
        // colliders, so this is what falling bodies land on.
        let floor_position = Vec3::new(8.0, -2.0, 24.0);
        let floor_scale = Vec3::new(64.0, 1.0, 64.0);
        let floor_body = physics.add_body(RigidBodyDesc {
            position: floor_position,
            body_type: BodyType::Static,
            ..Default::default()
        });
        physics.add_collider(ColliderDesc::attached(
            floor_body,
            ColliderShape::Box(floor_scale * 0.5),
        ));
        bodies.insert(Self::FLOOR_BODY, floor_body);

        let mut floor = Block::new("floor", floor_mesh, "atlas", floor_position);
        floor.scale = floor_scale;
        floor.body = Some(Self::FLOOR_BODY.to_string());

        // The dynamic cube starts above the world and falls onto the floor.
        let cube_position = Vec3::new(8.0, 24.0, 24.0);
        let cube_body = physics.add_body(RigidBodyDesc {
            position: cube_position,
            rotation: Quaternion::from_axis_angle(Vec3::new(1.0, 0.0, 1.0), 0.5),
            ..Default::default()
        });
        physics.add_collider(ColliderDesc::attached(
            cube_body,
            ColliderShape::Box(Vec3::new(0.5, 0.5, 0.5)),
        ));
        bodies.insert(Self::CUBE_BODY, cube_body);

        let mut cube = Block::new("cube", cube_mesh, "atlas", cube_position);
        cube.body = Some(Self::CUBE_BODY.to_string());

        let light = LightSource {
            position: Vec3::new(8.0, 40.0, 24.0),
            color: LinearRgba::WHITE,
        };
        // The light draws as a small tinted cube so it can be seen and
        // dragged around in the debug window.
        let mut marker = Block::new("light", cube_mesh, "atlas", light.position);
        marker.scale = Vec3::new(0.25, 0.25, 0.25);
        marker.tint = light.color;

        Self {
            blocks: vec![floor, cube, marker],
            lights: vec![light],
        }
    }

    /// Pulls each body-driven block's transform out of the simulation.
    pub fn sync(&mut self, physics: &dyn PhysicsProvider, bodies: &BodyRegistry) {
        for block in &mut self.blocks {
            let Some(name) = block.body.as_deref() else {
                continue;
            };
            let Some(handle) = bodies.get(name) else {
                log::warn!("Block '{}' references unknown body '{name}'", block.name);
                continue;
            };
            let (position, rotation) = physics.get_body_transform(handle);
            block.position = position;
            block.rotation_override = Some(rotation);
        }
    }

    /// The draw list for this frame.
    pub fn draws(&self) -> Vec<SceneDraw<'_>> {
        self.blocks
            .iter()
            .map(|block| SceneDraw {
                mesh: block.mesh,
                model: block.model_matrix(),
                tint: block.tint,
                texture: &block.texture,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lithos_core::math::Vec4;

    fn test_block() -> Block {
        Block::new("test", MeshId::from_raw(0), "atlas", Vec3::ZERO)
    }

    #[test]
    fn test_model_matrix_translates() {
        let mut block = test_block();
        block.position = Vec3::new(1.0, 2.0, 3.0);
        let m = block.model_matrix();
        let p = m.transform_point3(Vec3::ZERO);
        assert_eq!(p, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_model_matrix_scales_before_translation() {
        let mut block = test_block();
        block.position = Vec3::new(10.0, 0.0, 0.0);
        block.scale = Vec3::new(2.0, 2.0, 2.0);
        let m = block.model_matrix();
        let p = m.transform_point3(Vec3::new(0.5, 0.0, 0.0));
        assert_eq!(p, Vec3::new(11.0, 0.0, 0.0));
    }

    #[test]
    fn test_quaternion_override_wins() {
        let mut block = test_block();
        block.rotation_degrees = Vec3::new(0.0, 90.0, 0.0);
        block.rotation_override = Some(Quaternion::IDENTITY);
        let m = block.model_matrix();
        // Identity override: +X maps to +X, the Euler yaw is ignored.
        let p = m.transform_point3(Vec3::new(1.0, 0.0, 0.0));
        assert!((p.x - 1.0).abs() < 1e-5 && p.z.abs() < 1e-5);
    }

    #[test]
    fn test_euler_yaw_rotates_x_into_z() {
        let mut block = test_block();
        block.rotation_degrees = Vec3::new(0.0, 90.0, 0.0);
        let m = block.model_matrix();
        let p = m * Vec4::new(1.0, 0.0, 0.0, 0.0);
        assert!(p.x.abs() < 1e-5);
        assert!((p.z - -1.0).abs() < 1e-5);
    }
}
