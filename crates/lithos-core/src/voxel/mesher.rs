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

//! The face-culling chunk mesher.
//!
//! Walks every solid voxel of a chunk and emits one textured quad per face
//! whose neighbor is not blocked, sampling across chunk borders through a
//! [`Neighborhood`]. The output is an indexed triangle list ready for GPU
//! upload.

use bytemuck::{Pod, Zeroable};

use super::chunk::{Chunk, CHUNK_SIZE};
use super::world::Neighborhood;

/// Side length of one tile on the texture atlas, in UV space (16x16 tiles).
pub const UV_SIZE: f32 = 1.0 / 16.0;

/// A single mesher output vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ChunkVertex {
    /// Position in chunk-local space. A voxel at integer center `(x, y, z)`
    /// spans ±0.5 along each axis.
    pub position: [f32; 3],
    /// Texture atlas coordinates.
    pub uv: [f32; 2],
    /// Per-face light factor, multiplied into the sampled color.
    pub light: f32,
}

impl ChunkVertex {
    #[inline]
    fn new(x: f32, y: f32, z: f32, u: f32, v: f32, light: f32) -> Self {
        Self {
            position: [x, y, z],
            uv: [u, v],
            light,
        }
    }
}

/// CPU-side mesh produced by the mesher: an indexed triangle list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Deduplicated quad corners, four per emitted face.
    pub vertices: Vec<ChunkVertex>,
    /// Triangle indices into `vertices`, six per emitted face.
    pub indices: Vec<u32>,
}

impl MeshData {
    /// The number of indices to draw.
    #[inline]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Returns `true` when the mesh has nothing to draw.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Appends one quad: four vertices and the two triangles covering them.
#[inline]
fn push_face(
    mesh: &mut MeshData,
    a: ChunkVertex,
    b: ChunkVertex,
    c: ChunkVertex,
    d: ChunkVertex,
) {
    let base = mesh.vertices.len() as u32;
    mesh.vertices.extend_from_slice(&[a, b, c, d]);
    mesh.indices
        .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
}

/// The atlas UV origin of a block id's tile: id `n` is tile
/// `(n % 16, n / 16)`, counted from the top-left of the sheet.
#[inline]
fn tile_uv(id: u16) -> (f32, f32) {
    let u = (id % 16) as f32 * UV_SIZE;
    let v = 1.0 - (1 + id / 16) as f32 * UV_SIZE;
    (u, v)
}

/// Builds the mesh for the center chunk of `hood`.
///
/// A face is emitted when the voxel on its far side is not blocked: either
/// air, or past the edge of the world. Faces between two solid voxels are
/// culled, including across chunk borders.
pub fn build_chunk_mesh(hood: &Neighborhood<'_>) -> MeshData {
    let mut mesh = MeshData::default();

    for y in 0..CHUNK_SIZE {
        for z in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                let id = hood.voxel(x, y, z);
                if id == 0 {
                    continue;
                }
                emit_voxel(&mut mesh, hood, x, y, z, id);
            }
        }
    }

    mesh
}

/// Builds a standalone one-voxel cube: 6 faces, 24 vertices, 36 indices.
///
/// Scene blocks and light markers draw this through the same vertex layout
/// and pipeline as chunk meshes.
pub fn unit_cube(id: u16) -> MeshData {
    let mut chunk = Chunk::new();
    chunk.set(0, 0, 0, id);
    let hood = Neighborhood::single(&chunk);

    let mut mesh = MeshData::default();
    emit_voxel(&mut mesh, &hood, 0, 0, 0, id);
    mesh
}

fn emit_voxel(mesh: &mut MeshData, hood: &Neighborhood<'_>, x: i32, y: i32, z: i32, id: u16) {
    let (u, v) = tile_uv(id);
    let (fx, fy, fz) = (x as f32, y as f32, z as f32);
    let mk = ChunkVertex::new;

    // TOP (+Y)
    if !hood.is_blocked(x, y + 1, z) {
        let l = 1.0;
        push_face(
            mesh,
            mk(fx - 0.5, fy + 0.5, fz - 0.5, u + UV_SIZE, v, l),
            mk(fx - 0.5, fy + 0.5, fz + 0.5, u + UV_SIZE, v + UV_SIZE, l),
            mk(fx + 0.5, fy + 0.5, fz + 0.5, u, v + UV_SIZE, l),
            mk(fx + 0.5, fy + 0.5, fz - 0.5, u, v, l),
        );
    }

    // BOTTOM (-Y)
    if !hood.is_blocked(x, y - 1, z) {
        let l = 0.75;
        push_face(
            mesh,
            mk(fx - 0.5, fy - 0.5, fz - 0.5, u, v, l),
            mk(fx + 0.5, fy - 0.5, fz - 0.5, u + UV_SIZE, v, l),
            mk(fx + 0.5, fy - 0.5, fz + 0.5, u + UV_SIZE, v + UV_SIZE, l),
            mk(fx - 0.5, fy - 0.5, fz + 0.5, u, v + UV_SIZE, l),
        );
    }

    // +X
    if !hood.is_blocked(x + 1, y, z) {
        let l = 0.95;
        push_face(
            mesh,
            mk(fx + 0.5, fy - 0.5, fz - 0.5, u + UV_SIZE, v, l),
            mk(fx + 0.5, fy + 0.5, fz - 0.5, u + UV_SIZE, v + UV_SIZE, l),
            mk(fx + 0.5, fy + 0.5, fz + 0.5, u, v + UV_SIZE, l),
            mk(fx + 0.5, fy - 0.5, fz + 0.5, u, v, l),
        );
    }

    // -X
    if !hood.is_blocked(x - 1, y, z) {
        let l = 0.85;
        push_face(
            mesh,
            mk(fx - 0.5, fy - 0.5, fz - 0.5, u, v, l),
            mk(fx - 0.5, fy - 0.5, fz + 0.5, u + UV_SIZE, v, l),
            mk(fx - 0.5, fy + 0.5, fz + 0.5, u + UV_SIZE, v + UV_SIZE, l),
            mk(fx - 0.5, fy + 0.5, fz - 0.5, u, v + UV_SIZE, l),
        );
    }

    // +Z
    if !hood.is_blocked(x, y, z + 1) {
        let l = 0.9;
        push_face(
            mesh,
            mk(fx - 0.5, fy - 0.5, fz + 0.5, u, v, l),
            mk(fx + 0.5, fy - 0.5, fz + 0.5, u + UV_SIZE, v, l),
            mk(fx + 0.5, fy + 0.5, fz + 0.5, u + UV_SIZE, v + UV_SIZE, l),
            mk(fx - 0.5, fy + 0.5, fz + 0.5, u, v + UV_SIZE, l),
        );
    }

    // -Z
    if !hood.is_blocked(x, y, z - 1) {
        let l = 0.8;
        push_face(
            mesh,
            mk(fx - 0.5, fy - 0.5, fz - 0.5, u + UV_SIZE, v, l),
            mk(fx + 0.5, fy - 0.5, fz - 0.5, u, v, l),
            mk(fx + 0.5, fy + 0.5, fz - 0.5, u, v + UV_SIZE, l),
            mk(fx - 0.5, fy + 0.5, fz - 0.5, u + UV_SIZE, v + UV_SIZE, l),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxel::generator::Generator;
    use crate::voxel::chunk::ChunkPos;
    use crate::voxel::world::VoxelWorld;

    #[test]
    fn test_empty_chunk_empty_mesh() {
        let chunk = Chunk::new();
        let mesh = build_chunk_mesh(&Neighborhood::single(&chunk));
        assert!(mesh.is_empty());
        assert_eq!(mesh.index_count(), 0);
    }

    #[test]
    fn test_single_voxel_is_full_cube() {
        let mut chunk = Chunk::new();
        chunk.set(5, 5, 5, 1);
        let mesh = build_chunk_mesh(&Neighborhood::single(&chunk));
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
    }

    #[test]
    fn test_unit_cube_matches_mesher_output() {
        let mesh = unit_cube(1);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        // Spans ±0.5 around the origin.
        for vert in &mesh.vertices {
            for c in vert.position {
                assert!(c == 0.5 || c == -0.5);
            }
        }
    }

    #[test]
    fn test_two_voxels_share_a_culled_face() {
        let mut chunk = Chunk::new();
        chunk.set(5, 5, 5, 1);
        chunk.set(6, 5, 5, 1);
        let mesh = build_chunk_mesh(&Neighborhood::single(&chunk));
        // 12 faces minus the 2 touching ones.
        assert_eq!(mesh.vertices.len(), 10 * 4);
        assert_eq!(mesh.indices.len(), 10 * 6);
    }

    #[test]
    fn test_lone_chunk_emits_only_border_hull() {
        // A full chunk with no neighbors: only the 6 * 16 * 16 outer faces.
        let chunk = Chunk::filled(1);
        let mesh = build_chunk_mesh(&Neighborhood::single(&chunk));
        let expected_faces = 6 * (CHUNK_SIZE * CHUNK_SIZE) as usize;
        assert_eq!(mesh.vertices.len(), expected_faces * 4);
        assert_eq!(mesh.indices.len(), expected_faces * 6);
    }

    #[test]
    fn test_interior_chunk_of_solid_world_is_empty() {
        let world = VoxelWorld::generate((3, 3, 3), &Generator::Solid { id: 1 });
        let hood = world.neighborhood(ChunkPos::new(1, 1, 1));
        let mesh = build_chunk_mesh(&hood);
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_world_border_faces_emitted() {
        // Corner chunk of a solid world: the three faces against neighbors
        // are culled, the three on the world border are drawn.
        let world = VoxelWorld::generate((2, 2, 2), &Generator::Solid { id: 1 });
        let hood = world.neighborhood(ChunkPos::new(0, 0, 0));
        let mesh = build_chunk_mesh(&hood);
        let expected_faces = 3 * (CHUNK_SIZE * CHUNK_SIZE) as usize;
        assert_eq!(mesh.indices.len(), expected_faces * 6);
    }

    #[test]
    fn test_tile_uv_values() {
        // Id 1 is the second tile of the top row.
        assert_eq!(tile_uv(1), (UV_SIZE, 1.0 - UV_SIZE));
        // Id 16 wraps to the first tile of the second row.
        assert_eq!(tile_uv(16), (0.0, 1.0 - 2.0 * UV_SIZE));
        assert_eq!(tile_uv(0), (0.0, 1.0 - UV_SIZE));
    }

    #[test]
    fn test_face_lights() {
        let mut chunk = Chunk::new();
        chunk.set(0, 0, 0, 1);
        let mesh = build_chunk_mesh(&Neighborhood::single(&chunk));
        let mut lights: Vec<f32> = mesh.vertices.iter().map(|v| v.light).collect();
        lights.dedup();
        // Face emission order: +Y, -Y, +X, -X, +Z, -Z.
        assert_eq!(lights, vec![1.0, 0.75, 0.95, 0.85, 0.9, 0.8]);
    }

    #[test]
    fn test_index_winding_per_face() {
        let mesh = unit_cube(1);
        let quad = &mesh.indices[0..6];
        assert_eq!(quad, &[0, 1, 2, 2, 3, 0]);
        let quad = &mesh.indices[6..12];
        assert_eq!(quad, &[4, 5, 6, 6, 7, 4]);
    }
}
