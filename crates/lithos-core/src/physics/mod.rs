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

//! # Physics Abstractions
//!
//! Universal traits and types for physics simulation providers, plus the
//! named-body registry the scene layer uses to find its bodies again.

use std::collections::HashMap;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::math::{Quaternion, Vec3};

/// Opaque handle to a rigid body in the physics engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RigidBodyHandle(pub u64);

/// Opaque handle to a collider in the physics engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColliderHandle(pub u64);

/// Defines the type of a rigid body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyType {
    /// Responds to forces and collisions.
    Dynamic,
    /// Fixed in place, does not move.
    Static,
    /// Controlled by the user, not by forces.
    Kinematic,
}

/// Description for creating a rigid body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigidBodyDesc {
    /// Initial position.
    pub position: Vec3,
    /// Initial rotation.
    pub rotation: Quaternion,
    /// Body type.
    pub body_type: BodyType,
    /// Linear velocity.
    pub linear_velocity: Vec3,
    /// Angular velocity.
    pub angular_velocity: Vec3,
    /// Mass of the body in kg (dynamic only).
    pub mass: f32,
}

impl Default for RigidBodyDesc {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quaternion::IDENTITY,
            body_type: BodyType::Dynamic,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            mass: 1.0,
        }
    }
}

/// Supported collider shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ColliderShape {
    /// Box with half-extents.
    Box(Vec3),
    /// Sphere with radius.
    Sphere(f32),
}

/// Description for creating a collider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColliderDesc {
    /// Associated rigid body if any.
    pub parent_body: Option<RigidBodyHandle>,
    /// Relative position to parent/world.
    pub position: Vec3,
    /// Relative rotation to parent/world.
    pub rotation: Quaternion,
    /// Shape of the collider.
    pub shape: ColliderShape,
    /// Friction coefficient.
    pub friction: f32,
    /// Restitution (bounciness) coefficient.
    pub restitution: f32,
}

impl ColliderDesc {
    /// A collider of `shape` attached to `parent_body` at its origin.
    pub fn attached(parent_body: RigidBodyHandle, shape: ColliderShape) -> Self {
        Self {
            parent_body: Some(parent_body),
            position: Vec3::ZERO,
            rotation: Quaternion::IDENTITY,
            shape,
            friction: 0.5,
            restitution: 0.0,
        }
    }
}

/// Interface contract for any physics engine implementation (e.g., Rapier).
pub trait PhysicsProvider: Send + Sync {
    /// Advances the simulation by `dt` seconds.
    fn step(&mut self, dt: f32);

    /// Sets the global gravity vector.
    fn set_gravity(&mut self, gravity: Vec3);

    /// Adds a rigid body to the simulation.
    fn add_body(&mut self, desc: RigidBodyDesc) -> RigidBodyHandle;

    /// Removes a rigid body (and its attached colliders) from the simulation.
    fn remove_body(&mut self, handle: RigidBodyHandle);

    /// Adds a collider to the simulation.
    fn add_collider(&mut self, desc: ColliderDesc) -> ColliderHandle;

    /// Reads the position and rotation of a rigid body.
    fn get_body_transform(&self, handle: RigidBodyHandle) -> (Vec3, Quaternion);

    /// Returns `true` while the body exists and has not gone to sleep.
    fn is_body_active(&self, handle: RigidBodyHandle) -> bool;

    /// Returns `true` while any non-static body is awake. The frame loop
    /// skips stepping entirely once everything has settled.
    fn has_active_bodies(&self) -> bool;
}

/// Maps scene-level names to rigid body handles.
///
/// Lookup of a missing name is the caller's problem: it gets `None` and
/// decides whether that is an error.
#[derive(Debug, Default)]
pub struct BodyRegistry {
    bodies: HashMap<String, RigidBodyHandle>,
}

impl BodyRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handle` under `name`, replacing (with a warning) any body
    /// previously registered under the same name.
    pub fn insert(&mut self, name: impl Into<String>, handle: RigidBodyHandle) {
        let name = name.into();
        if self.bodies.contains_key(&name) {
            warn!("Physics body named '{name}' already exists, replacing it");
        }
        self.bodies.insert(name, handle);
    }

    /// Looks up the body registered under `name`.
    #[inline]
    pub fn get(&self, name: &str) -> Option<RigidBodyHandle> {
        self.bodies.get(name).copied()
    }

    /// Removes and returns the body registered under `name`.
    pub fn remove(&mut self, name: &str) -> Option<RigidBodyHandle> {
        self.bodies.remove(name)
    }

    /// The number of registered bodies.
    #[inline]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Returns `true` when no bodies are registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Iterates over `(name, handle)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, RigidBodyHandle)> {
        self.bodies.iter().map(|(name, h)| (name.as_str(), *h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_insert_get() {
        let mut registry = BodyRegistry::new();
        registry.insert("floor", RigidBodyHandle(1));
        registry.insert("cube", RigidBodyHandle(2));
        assert_eq!(registry.get("floor"), Some(RigidBodyHandle(1)));
        assert_eq!(registry.get("cube"), Some(RigidBodyHandle(2)));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_registry_missing_name_is_none() {
        let registry = BodyRegistry::new();
        assert_eq!(registry.get("ghost"), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_registry_duplicate_replaces() {
        let mut registry = BodyRegistry::new();
        registry.insert("cube", RigidBodyHandle(1));
        registry.insert("cube", RigidBodyHandle(9));
        assert_eq!(registry.get("cube"), Some(RigidBodyHandle(9)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_remove() {
        let mut registry = BodyRegistry::new();
        registry.insert("cube", RigidBodyHandle(4));
        assert_eq!(registry.remove("cube"), Some(RigidBodyHandle(4)));
        assert_eq!(registry.get("cube"), None);
    }

    #[test]
    fn test_body_desc_defaults() {
        let desc = RigidBodyDesc::default();
        assert_eq!(desc.body_type, BodyType::Dynamic);
        assert_eq!(desc.position, Vec3::ZERO);
        assert_eq!(desc.mass, 1.0);
    }
}
