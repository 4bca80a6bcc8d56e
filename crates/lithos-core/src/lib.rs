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

//! # Lithos Core
//!
//! Foundational crate for the Lithos voxel engine: math primitives, the
//! voxel world and its mesher, the free-fly camera, backend-agnostic input
//! state, and the physics contract that infrastructure crates implement.

#![warn(missing_docs)]

pub mod asset;
pub mod camera;
pub mod input;
pub mod math;
pub mod physics;
pub mod voxel;

pub use camera::Camera;
pub use voxel::world::VoxelWorld;
