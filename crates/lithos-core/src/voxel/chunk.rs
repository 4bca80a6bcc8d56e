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

//! Fixed-size cubic chunks of voxels.

use super::voxel::Voxel;
use crate::math::Vec3;

/// Edge length of a chunk, in voxels, along every axis.
pub const CHUNK_SIZE: i32 = 16;
/// Number of voxels in one chunk.
pub const CHUNK_VOLUME: usize = (CHUNK_SIZE * CHUNK_SIZE * CHUNK_SIZE) as usize;

/// Flat storage index for in-bounds chunk-local coordinates.
#[inline]
fn idx(x: i32, y: i32, z: i32) -> usize {
    (x + CHUNK_SIZE * (y + CHUNK_SIZE * z)) as usize
}

/// A 16x16x16 block of voxels, stored X-fastest, then Y, then Z.
#[derive(Clone)]
pub struct Chunk {
    voxels: Vec<Voxel>,
}

impl Chunk {
    /// Creates a chunk filled entirely with air.
    pub fn new() -> Self {
        Self {
            voxels: vec![Voxel::AIR; CHUNK_VOLUME],
        }
    }

    /// Creates a chunk with every voxel set to `id`.
    pub fn filled(id: u16) -> Self {
        Self {
            voxels: vec![Voxel::new(id); CHUNK_VOLUME],
        }
    }

    /// Returns `true` if the coordinates lie inside the chunk.
    #[inline]
    pub fn in_bounds(x: i32, y: i32, z: i32) -> bool {
        x >= 0 && y >= 0 && z >= 0 && x < CHUNK_SIZE && y < CHUNK_SIZE && z < CHUNK_SIZE
    }

    /// Returns the block id at chunk-local coordinates.
    /// Out-of-bounds coordinates read as air.
    #[inline]
    pub fn get(&self, x: i32, y: i32, z: i32) -> u16 {
        if !Self::in_bounds(x, y, z) {
            return 0;
        }
        self.voxels[idx(x, y, z)].id
    }

    /// Sets the block id at chunk-local coordinates.
    /// Returns `false` without writing when the coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, z: i32, id: u16) -> bool {
        if !Self::in_bounds(x, y, z) {
            return false;
        }
        self.voxels[idx(x, y, z)].id = id;
        true
    }

    /// Returns `true` when every voxel in the chunk is air.
    pub fn is_empty(&self) -> bool {
        self.voxels.iter().all(|v| v.is_air())
    }
}

impl Default for Chunk {
    fn default() -> Self {
        Self::new()
    }
}

/// The position of a chunk on the world's chunk grid.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkPos {
    /// Grid x coordinate.
    pub x: i32,
    /// Grid y coordinate.
    pub y: i32,
    /// Grid z coordinate.
    pub z: i32,
}

impl ChunkPos {
    /// Creates a new chunk grid position.
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The world-space position of this chunk's minimum corner, in voxels.
    #[inline]
    pub fn world_origin(&self) -> Vec3 {
        Vec3::new(
            (self.x * CHUNK_SIZE) as f32,
            (self.y * CHUNK_SIZE) as f32,
            (self.z * CHUNK_SIZE) as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_chunk_is_air() {
        let chunk = Chunk::new();
        assert!(chunk.is_empty());
        assert_eq!(chunk.get(0, 0, 0), 0);
        assert_eq!(chunk.get(15, 15, 15), 0);
    }

    #[test]
    fn test_filled_chunk() {
        let chunk = Chunk::filled(1);
        assert!(!chunk.is_empty());
        assert_eq!(chunk.get(0, 0, 0), 1);
        assert_eq!(chunk.get(7, 3, 12), 1);
    }

    #[test]
    fn test_set_get_roundtrip() {
        let mut chunk = Chunk::new();
        assert!(chunk.set(3, 4, 5, 7));
        assert_eq!(chunk.get(3, 4, 5), 7);
        // Neighbors untouched.
        assert_eq!(chunk.get(2, 4, 5), 0);
        assert_eq!(chunk.get(3, 5, 5), 0);
    }

    #[test]
    fn test_out_of_bounds_reads_air() {
        let chunk = Chunk::filled(1);
        assert_eq!(chunk.get(-1, 0, 0), 0);
        assert_eq!(chunk.get(0, -1, 0), 0);
        assert_eq!(chunk.get(16, 0, 0), 0);
        assert_eq!(chunk.get(0, 0, 16), 0);
    }

    #[test]
    fn test_out_of_bounds_write_rejected() {
        let mut chunk = Chunk::new();
        assert!(!chunk.set(-1, 0, 0, 5));
        assert!(!chunk.set(0, 16, 0, 5));
        assert!(chunk.is_empty());
    }

    #[test]
    fn test_storage_order_is_x_fastest() {
        // (1, 0, 0) and (0, 1, 0) must not alias: x strides by 1, y by 16.
        let mut chunk = Chunk::new();
        chunk.set(1, 0, 0, 1);
        chunk.set(0, 1, 0, 2);
        chunk.set(0, 0, 1, 3);
        assert_eq!(chunk.get(1, 0, 0), 1);
        assert_eq!(chunk.get(0, 1, 0), 2);
        assert_eq!(chunk.get(0, 0, 1), 3);
    }

    #[test]
    fn test_world_origin() {
        let pos = ChunkPos::new(1, 0, 2);
        let origin = pos.world_origin();
        assert_eq!((origin.x, origin.y, origin.z), (16.0, 0.0, 32.0));
    }
}
