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

//! Chunk fill strategies.

use serde::{Deserialize, Serialize};

use super::chunk::{Chunk, ChunkPos, CHUNK_SIZE};

/// A strategy for filling chunks with voxels.
///
/// Terrain height is evaluated in world-space voxel coordinates so that
/// adjacent chunks line up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Generator {
    /// Every voxel of every chunk set to `id`.
    Solid {
        /// Block id to fill with.
        id: u16,
    },
    /// A rolling sine-wave terrain: voxels at or below
    /// `(sin(x * 0.3) * 0.5 + 0.5) * 10` are `id`, and the two lowest
    /// layers of the world are `floor_id`.
    Terrain {
        /// Block id of the terrain body.
        id: u16,
        /// Block id of the world floor (world y <= 1).
        floor_id: u16,
    },
    /// A sphere of radius half a chunk, centered in each chunk.
    Sphere {
        /// Block id of the sphere body.
        id: u16,
    },
}

impl Generator {
    /// Builds the chunk at `pos`.
    pub fn generate(&self, pos: ChunkPos) -> Chunk {
        match *self {
            Generator::Solid { id } => Chunk::filled(id),
            Generator::Terrain { id, floor_id } => {
                let mut chunk = Chunk::new();
                let origin = pos.world_origin();
                for z in 0..CHUNK_SIZE {
                    for y in 0..CHUNK_SIZE {
                        let gy = origin.y + y as f32;
                        for x in 0..CHUNK_SIZE {
                            let gx = origin.x + x as f32;
                            let height = ((gx * 0.3).sin() * 0.5 + 0.5) * 10.0;
                            let mut voxel_id = if gy <= height { id } else { 0 };
                            if gy <= 1.0 {
                                voxel_id = floor_id;
                            }
                            chunk.set(x, y, z, voxel_id);
                        }
                    }
                }
                chunk
            }
            Generator::Sphere { id } => {
                let mut chunk = Chunk::new();
                let half = CHUNK_SIZE / 2;
                for z in 0..CHUNK_SIZE {
                    for y in 0..CHUNK_SIZE {
                        for x in 0..CHUNK_SIZE {
                            let dx = x - half;
                            let dy = y - half;
                            let dz = z - half;
                            let dist_sq = (dx * dx + dy * dy + dz * dz) as f32;
                            if dist_sq.sqrt() < half as f32 {
                                chunk.set(x, y, z, id);
                            }
                        }
                    }
                }
                chunk
            }
        }
    }
}

impl Default for Generator {
    /// A solid world of block id 1.
    fn default() -> Self {
        Generator::Solid { id: 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_fills_everything() {
        let chunk = Generator::Solid { id: 1 }.generate(ChunkPos::new(0, 0, 0));
        assert_eq!(chunk.get(0, 0, 0), 1);
        assert_eq!(chunk.get(15, 15, 15), 1);
        assert!(!chunk.is_empty());
    }

    #[test]
    fn test_terrain_floor_layers() {
        let gen = Generator::Terrain { id: 1, floor_id: 2 };
        let chunk = gen.generate(ChunkPos::new(0, 0, 0));
        // World y 0 and 1 are always floor, whatever the sine says.
        for x in 0..CHUNK_SIZE {
            assert_eq!(chunk.get(x, 0, 0), 2);
            assert_eq!(chunk.get(x, 1, 0), 2);
        }
    }

    #[test]
    fn test_terrain_height_bounded() {
        let gen = Generator::Terrain { id: 1, floor_id: 2 };
        let chunk = gen.generate(ChunkPos::new(0, 0, 0));
        // The wave peaks at 10, so nothing sits above y = 10.
        for x in 0..CHUNK_SIZE {
            for z in 0..CHUNK_SIZE {
                assert_eq!(chunk.get(x, 11, z), 0);
                assert_eq!(chunk.get(x, 15, z), 0);
            }
        }
    }

    #[test]
    fn test_terrain_is_column_shaped() {
        let gen = Generator::Terrain { id: 1, floor_id: 2 };
        let chunk = gen.generate(ChunkPos::new(0, 0, 0));
        // Walking a column upward, once air starts nothing above is solid.
        for x in 0..CHUNK_SIZE {
            let mut seen_air = false;
            for y in 0..CHUNK_SIZE {
                let solid = chunk.get(x, y, 0) != 0;
                assert!(
                    !(solid && seen_air),
                    "hole in terrain column at x={x} y={y}"
                );
                if !solid {
                    seen_air = true;
                }
            }
        }
    }

    #[test]
    fn test_terrain_continuous_across_chunks() {
        let gen = Generator::Terrain { id: 1, floor_id: 2 };
        let a = gen.generate(ChunkPos::new(0, 0, 0));
        let b = gen.generate(ChunkPos::new(0, 0, 1));
        // Height depends on x only, so columns match across the z border.
        for x in 0..CHUNK_SIZE {
            for y in 0..CHUNK_SIZE {
                assert_eq!(a.get(x, y, 15), b.get(x, y, 0));
            }
        }
    }

    #[test]
    fn test_sphere_center_solid_corners_air() {
        let chunk = Generator::Sphere { id: 1 }.generate(ChunkPos::new(0, 0, 0));
        assert_eq!(chunk.get(8, 8, 8), 1);
        assert_eq!(chunk.get(0, 0, 0), 0);
        assert_eq!(chunk.get(15, 15, 15), 0);
    }
}
