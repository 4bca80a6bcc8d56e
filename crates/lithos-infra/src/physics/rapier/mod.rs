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

//! Rapier implementation of the physics provider.

mod conversions;

use std::collections::HashMap;

use lithos_core::math::{Quaternion, Vec3};
use lithos_core::physics::{
    BodyType, ColliderDesc, ColliderHandle, ColliderShape, PhysicsProvider, RigidBodyDesc,
    RigidBodyHandle,
};
use rapier3d::prelude::*;

use self::conversions::{from_rapier_quat, from_rapier_vec, to_rapier_quat, to_rapier_vec};

/// Implementation of the `PhysicsProvider` trait using the Rapier3D physics
/// engine.
///
/// Engine-facing handles are opaque `u64` ids mapped to Rapier's generational
/// handles internally, so a handle for a removed body simply stops resolving
/// instead of aliasing a reused slot.
pub struct RapierPhysicsWorld {
    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: BroadPhaseMultiSap,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,

    bodies: HashMap<u64, rapier3d::dynamics::RigidBodyHandle>,
    colliders: HashMap<u64, rapier3d::geometry::ColliderHandle>,
    next_id: u64,
}

impl Default for RapierPhysicsWorld {
    fn default() -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            gravity: vector![0.0, -9.81, 0.0],
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhaseMultiSap::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            bodies: HashMap::new(),
            colliders: HashMap::new(),
            next_id: 0,
        }
    }
}

impl RapierPhysicsWorld {
    /// Creates a world with default gravity (`0, -9.81, 0`).
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl PhysicsProvider for RapierPhysicsWorld {
    fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
    }

    fn set_gravity(&mut self, gravity: Vec3) {
        self.gravity = to_rapier_vec(gravity);
    }

    fn add_body(&mut self, desc: RigidBodyDesc) -> RigidBodyHandle {
        let rb_type = match desc.body_type {
            BodyType::Dynamic => RigidBodyType::Dynamic,
            BodyType::Static => RigidBodyType::Fixed,
            BodyType::Kinematic => RigidBodyType::KinematicVelocityBased,
        };

        let rigid_body = RigidBodyBuilder::new(rb_type)
            .translation(to_rapier_vec(desc.position))
            .rotation(to_rapier_quat(desc.rotation).scaled_axis())
            .linvel(to_rapier_vec(desc.linear_velocity))
            .angvel(to_rapier_vec(desc.angular_velocity))
            .additional_mass(desc.mass)
            .build();

        let handle = self.rigid_body_set.insert(rigid_body);
        let id = self.alloc_id();
        self.bodies.insert(id, handle);
        log::debug!("Physics body {id} added ({:?})", desc.body_type);
        RigidBodyHandle(id)
    }

    fn remove_body(&mut self, handle: RigidBodyHandle) {
        let Some(rb_handle) = self.bodies.remove(&handle.0) else {
            log::warn!("remove_body: unknown handle {}", handle.0);
            return;
        };
        self.rigid_body_set.remove(
            rb_handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
        // Attached colliders went with the body; drop their ids too.
        self.colliders
            .retain(|_, ch| self.collider_set.get(*ch).is_some());
    }

    fn add_collider(&mut self, desc: ColliderDesc) -> ColliderHandle {
        let shape = match desc.shape {
            ColliderShape::Box(half) => SharedShape::cuboid(half.x, half.y, half.z),
            ColliderShape::Sphere(r) => SharedShape::ball(r),
        };

        let collider = ColliderBuilder::new(shape)
            .translation(to_rapier_vec(desc.position))
            .rotation(to_rapier_quat(desc.rotation).scaled_axis())
            .friction(desc.friction)
            .restitution(desc.restitution)
            .build();

        let handle = match desc.parent_body.and_then(|p| self.bodies.get(&p.0)) {
            Some(&rb_handle) => {
                self.collider_set
                    .insert_with_parent(collider, rb_handle, &mut self.rigid_body_set)
            }
            None => self.collider_set.insert(collider),
        };

        let id = self.alloc_id();
        self.colliders.insert(id, handle);
        ColliderHandle(id)
    }

    fn get_body_transform(&self, handle: RigidBodyHandle) -> (Vec3, Quaternion) {
        match self
            .bodies
            .get(&handle.0)
            .and_then(|h| self.rigid_body_set.get(*h))
        {
            Some(rb) => (
                from_rapier_vec(*rb.translation()),
                from_rapier_quat(*rb.rotation()),
            ),
            None => (Vec3::ZERO, Quaternion::IDENTITY),
        }
    }

    fn is_body_active(&self, handle: RigidBodyHandle) -> bool {
        self.bodies
            .get(&handle.0)
            .and_then(|h| self.rigid_body_set.get(*h))
            .is_some_and(|rb| !rb.is_sleeping())
    }

    fn has_active_bodies(&self) -> bool {
        self.rigid_body_set
            .iter()
            .any(|(_, rb)| rb.body_type() != RigidBodyType::Fixed && !rb.is_sleeping())
    }
}
