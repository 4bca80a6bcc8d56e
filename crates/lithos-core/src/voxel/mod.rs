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

//! The voxel world: chunks of voxels, generation strategies, and the mesher
//! that turns chunks into renderable geometry.

pub mod chunk;
pub mod generator;
pub mod mesher;
pub mod voxel;
pub mod world;

pub use chunk::{Chunk, ChunkPos, CHUNK_SIZE, CHUNK_VOLUME};
pub use generator::Generator;
pub use mesher::{build_chunk_mesh, unit_cube, ChunkVertex, MeshData};
pub use voxel::Voxel;
pub use world::{Neighborhood, VoxelWorld};
