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

//! A finite grid of chunks with world-space voxel access and dirty tracking.

use std::collections::BTreeSet;

use super::chunk::{Chunk, ChunkPos, CHUNK_SIZE};
use super::generator::Generator;

/// A finite voxel world: a dense grid of chunks.
///
/// Chunks are stored X-fastest, then Y, then Z. Chunks whose contents have
/// changed since the last [`take_dirty`](Self::take_dirty) call are tracked
/// so the renderer only re-meshes what moved.
pub struct VoxelWorld {
    size: (i32, i32, i32),
    chunks: Vec<Chunk>,
    dirty: BTreeSet<ChunkPos>,
}

impl VoxelWorld {
    /// Builds a world of `size` chunks per axis using `generator`.
    ///
    /// Every chunk starts dirty, so the first frame meshes the whole world.
    pub fn generate(size: (u32, u32, u32), generator: &Generator) -> Self {
        let size = (size.0.max(1) as i32, size.1.max(1) as i32, size.2.max(1) as i32);
        let mut chunks = Vec::with_capacity((size.0 * size.1 * size.2) as usize);
        let mut dirty = BTreeSet::new();
        for z in 0..size.2 {
            for y in 0..size.1 {
                for x in 0..size.0 {
                    dirty.insert(ChunkPos::new(x, y, z));
                }
            }
        }
        // Storage order: x + sx * (y + sy * z).
        for z in 0..size.2 {
            for y in 0..size.1 {
                for x in 0..size.0 {
                    chunks.push(generator.generate(ChunkPos::new(x, y, z)));
                }
            }
        }
        Self {
            size,
            chunks,
            dirty,
        }
    }

    /// The world size in chunks per axis.
    #[inline]
    pub fn size(&self) -> (i32, i32, i32) {
        self.size
    }

    /// The total number of chunks.
    #[inline]
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Iterates over every chunk position in storage order.
    pub fn positions(&self) -> impl Iterator<Item = ChunkPos> + '_ {
        let (sx, sy, sz) = self.size;
        (0..sz).flat_map(move |z| {
            (0..sy).flat_map(move |y| (0..sx).map(move |x| ChunkPos::new(x, y, z)))
        })
    }

    #[inline]
    fn chunk_index(&self, pos: ChunkPos) -> Option<usize> {
        let (sx, sy, sz) = self.size;
        if pos.x < 0 || pos.y < 0 || pos.z < 0 || pos.x >= sx || pos.y >= sy || pos.z >= sz {
            return None;
        }
        Some((pos.x + sx * (pos.y + sy * pos.z)) as usize)
    }

    /// Returns the chunk at a grid position, or `None` outside the world.
    #[inline]
    pub fn chunk(&self, pos: ChunkPos) -> Option<&Chunk> {
        self.chunk_index(pos).map(|i| &self.chunks[i])
    }

    /// Reads the block id at world-space voxel coordinates.
    /// Anything outside the world reads as air.
    pub fn voxel(&self, x: i32, y: i32, z: i32) -> u16 {
        let pos = ChunkPos::new(
            x.div_euclid(CHUNK_SIZE),
            y.div_euclid(CHUNK_SIZE),
            z.div_euclid(CHUNK_SIZE),
        );
        match self.chunk(pos) {
            Some(chunk) => chunk.get(
                x.rem_euclid(CHUNK_SIZE),
                y.rem_euclid(CHUNK_SIZE),
                z.rem_euclid(CHUNK_SIZE),
            ),
            None => 0,
        }
    }

    /// Writes the block id at world-space voxel coordinates.
    ///
    /// Marks the owning chunk dirty, along with any chunk sharing a face
    /// with the touched voxel. Returns `false` outside the world.
    pub fn set_voxel(&mut self, x: i32, y: i32, z: i32, id: u16) -> bool {
        let pos = ChunkPos::new(
            x.div_euclid(CHUNK_SIZE),
            y.div_euclid(CHUNK_SIZE),
            z.div_euclid(CHUNK_SIZE),
        );
        let (lx, ly, lz) = (
            x.rem_euclid(CHUNK_SIZE),
            y.rem_euclid(CHUNK_SIZE),
            z.rem_euclid(CHUNK_SIZE),
        );
        let Some(index) = self.chunk_index(pos) else {
            return false;
        };
        if !self.chunks[index].set(lx, ly, lz, id) {
            return false;
        }
        self.dirty.insert(pos);
        // Border voxels change the neighbor's culled faces too.
        for (local, axis) in [(lx, 0), (ly, 1), (lz, 2)] {
            let mut neighbor = pos;
            if local == 0 {
                match axis {
                    0 => neighbor.x -= 1,
                    1 => neighbor.y -= 1,
                    _ => neighbor.z -= 1,
                }
            } else if local == CHUNK_SIZE - 1 {
                match axis {
                    0 => neighbor.x += 1,
                    1 => neighbor.y += 1,
                    _ => neighbor.z += 1,
                }
            } else {
                continue;
            }
            if self.chunk_index(neighbor).is_some() {
                self.dirty.insert(neighbor);
            }
        }
        true
    }

    /// Drains the set of chunks that changed since the last call.
    pub fn take_dirty(&mut self) -> Vec<ChunkPos> {
        std::mem::take(&mut self.dirty).into_iter().collect()
    }

    /// Returns `true` when at least one chunk needs re-meshing.
    #[inline]
    pub fn has_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Builds the 3x3x3 chunk view centered on `pos` that the mesher
    /// samples when culling faces across chunk borders.
    pub fn neighborhood(&self, pos: ChunkPos) -> Neighborhood<'_> {
        let mut chunks = [None; 27];
        for dy in -1..=1 {
            for dz in -1..=1 {
                for dx in -1..=1 {
                    let i = neighborhood_index(dx, dy, dz);
                    chunks[i] = self.chunk(ChunkPos::new(pos.x + dx, pos.y + dy, pos.z + dz));
                }
            }
        }
        Neighborhood { chunks }
    }
}

/// Index into the 27-slot neighborhood array: X fastest, then Z, then Y.
#[inline]
fn neighborhood_index(dx: i32, dy: i32, dz: i32) -> usize {
    ((dx + 1) + 3 * (dz + 1) + 9 * (dy + 1)) as usize
}

/// A view of a chunk and its 26 neighbors, addressed in coordinates local
/// to the center chunk.
///
/// Coordinates in `[0, 16)` hit the center chunk; coordinates one step
/// outside resolve into the adjacent chunk. The mesher needs the
/// distinction between "air inside an existing chunk" and "no chunk there":
/// faces against missing chunks are still drawn, which is what closes the
/// world at its outer borders.
pub struct Neighborhood<'a> {
    chunks: [Option<&'a Chunk>; 27],
}

impl<'a> Neighborhood<'a> {
    /// A neighborhood of a lone chunk with nothing around it.
    pub fn single(chunk: &'a Chunk) -> Self {
        let mut chunks = [None; 27];
        chunks[neighborhood_index(0, 0, 0)] = Some(chunk);
        Self { chunks }
    }

    #[inline]
    fn chunk_at(&self, x: i32, y: i32, z: i32) -> Option<&'a Chunk> {
        let cx = x.div_euclid(CHUNK_SIZE);
        let cy = y.div_euclid(CHUNK_SIZE);
        let cz = z.div_euclid(CHUNK_SIZE);
        if !(-1..=1).contains(&cx) || !(-1..=1).contains(&cy) || !(-1..=1).contains(&cz) {
            return None;
        }
        self.chunks[neighborhood_index(cx, cy, cz)]
    }

    /// Returns `true` if a chunk exists at the coordinates.
    #[inline]
    pub fn is_chunk(&self, x: i32, y: i32, z: i32) -> bool {
        self.chunk_at(x, y, z).is_some()
    }

    /// Reads the block id at center-local coordinates, crossing chunk
    /// borders as needed. Missing chunks read as air.
    #[inline]
    pub fn voxel(&self, x: i32, y: i32, z: i32) -> u16 {
        match self.chunk_at(x, y, z) {
            Some(chunk) => chunk.get(
                x.rem_euclid(CHUNK_SIZE),
                y.rem_euclid(CHUNK_SIZE),
                z.rem_euclid(CHUNK_SIZE),
            ),
            None => 0,
        }
    }

    /// Returns `true` when a face pointing at these coordinates should be
    /// culled: a chunk exists there and its voxel is solid.
    #[inline]
    pub fn is_blocked(&self, x: i32, y: i32, z: i32) -> bool {
        self.is_chunk(x, y, z) && self.voxel(x, y, z) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_world(size: (u32, u32, u32)) -> VoxelWorld {
        VoxelWorld::generate(size, &Generator::Solid { id: 1 })
    }

    #[test]
    fn test_generate_sizes() {
        let world = solid_world((1, 1, 3));
        assert_eq!(world.size(), (1, 1, 3));
        assert_eq!(world.chunk_count(), 3);
        assert_eq!(world.positions().count(), 3);
    }

    #[test]
    fn test_chunk_lookup_bounds() {
        let world = solid_world((1, 1, 3));
        assert!(world.chunk(ChunkPos::new(0, 0, 0)).is_some());
        assert!(world.chunk(ChunkPos::new(0, 0, 2)).is_some());
        assert!(world.chunk(ChunkPos::new(0, 0, 3)).is_none());
        assert!(world.chunk(ChunkPos::new(-1, 0, 0)).is_none());
        assert!(world.chunk(ChunkPos::new(1, 0, 0)).is_none());
    }

    #[test]
    fn test_world_voxel_access() {
        let world = solid_world((1, 1, 2));
        assert_eq!(world.voxel(0, 0, 0), 1);
        assert_eq!(world.voxel(15, 15, 31), 1);
        // Outside the world reads as air.
        assert_eq!(world.voxel(16, 0, 0), 0);
        assert_eq!(world.voxel(0, -1, 0), 0);
        assert_eq!(world.voxel(0, 0, 32), 0);
    }

    #[test]
    fn test_set_voxel_and_bounds() {
        let mut world = solid_world((1, 1, 1));
        assert!(world.set_voxel(3, 4, 5, 9));
        assert_eq!(world.voxel(3, 4, 5), 9);
        assert!(!world.set_voxel(-1, 0, 0, 9));
        assert!(!world.set_voxel(0, 16, 0, 9));
    }

    #[test]
    fn test_all_chunks_start_dirty() {
        let mut world = solid_world((2, 1, 2));
        let dirty = world.take_dirty();
        assert_eq!(dirty.len(), 4);
        assert!(world.take_dirty().is_empty());
    }

    #[test]
    fn test_interior_edit_marks_one_chunk() {
        let mut world = solid_world((1, 1, 3));
        world.take_dirty();
        world.set_voxel(8, 8, 24, 0); // interior of chunk (0, 0, 1)
        let dirty = world.take_dirty();
        assert_eq!(dirty, vec![ChunkPos::new(0, 0, 1)]);
    }

    #[test]
    fn test_border_edit_marks_neighbor() {
        let mut world = solid_world((1, 1, 3));
        world.take_dirty();
        // Local z = 0 of chunk (0, 0, 1): the face shared with (0, 0, 0).
        world.set_voxel(8, 8, 16, 0);
        let dirty = world.take_dirty();
        assert_eq!(dirty, vec![ChunkPos::new(0, 0, 0), ChunkPos::new(0, 0, 1)]);
    }

    #[test]
    fn test_corner_edit_marks_all_touching_chunks() {
        let mut world = solid_world((2, 2, 2));
        world.take_dirty();
        // Corner voxel of chunk (0, 0, 0) adjacent to three neighbors.
        world.set_voxel(15, 15, 15, 0);
        let dirty = world.take_dirty();
        assert_eq!(
            dirty,
            vec![
                ChunkPos::new(0, 0, 0),
                ChunkPos::new(0, 0, 1),
                ChunkPos::new(0, 1, 0),
                ChunkPos::new(1, 0, 0),
            ]
        );
    }

    #[test]
    fn test_border_edit_at_world_edge_stays_inside() {
        let mut world = solid_world((1, 1, 1));
        world.take_dirty();
        world.set_voxel(0, 0, 0, 0);
        // No chunks outside the world to mark.
        assert_eq!(world.take_dirty(), vec![ChunkPos::new(0, 0, 0)]);
    }

    #[test]
    fn test_neighborhood_crosses_borders() {
        let mut world = solid_world((1, 1, 2));
        world.set_voxel(3, 3, 16, 7); // chunk (0, 0, 1), local z = 0
        let hood = world.neighborhood(ChunkPos::new(0, 0, 0));
        assert_eq!(hood.voxel(3, 3, 16), 7);
        assert_eq!(hood.voxel(3, 3, 15), 1);
    }

    #[test]
    fn test_neighborhood_blocking_rules() {
        let world = solid_world((1, 1, 2));
        let hood = world.neighborhood(ChunkPos::new(0, 0, 0));
        // Across the seam into the existing neighbor: blocked.
        assert!(hood.is_blocked(0, 0, 16));
        // Off the world edge: no chunk, never blocked.
        assert!(!hood.is_chunk(0, 0, -1));
        assert!(!hood.is_blocked(0, 0, -1));
        assert!(!hood.is_blocked(-1, 0, 0));
        // Inside the center chunk: solid.
        assert!(hood.is_blocked(5, 5, 5));
    }

    #[test]
    fn test_neighborhood_single() {
        let chunk = Chunk::filled(1);
        let hood = Neighborhood::single(&chunk);
        assert!(hood.is_blocked(0, 0, 0));
        assert!(!hood.is_chunk(-1, 0, 0));
        assert_eq!(hood.voxel(16, 0, 0), 0);
    }
}
