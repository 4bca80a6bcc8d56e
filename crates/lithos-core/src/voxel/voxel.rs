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

//! The smallest unit of the world: a single voxel.

/// A single voxel, identified by a numeric block id.
///
/// Id `0` is air. Non-zero ids index into the texture atlas: id `n` uses
/// tile `(n % 16, n / 16)` of a 16x16 tile sheet.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Voxel {
    /// The block id of this voxel.
    pub id: u16,
}

impl Voxel {
    /// The empty voxel.
    pub const AIR: Self = Self { id: 0 };

    /// Creates a voxel with the given block id.
    #[inline]
    pub const fn new(id: u16) -> Self {
        Self { id }
    }

    /// Returns `true` if this voxel is air.
    #[inline]
    pub const fn is_air(self) -> bool {
        self.id == 0
    }

    /// Returns `true` if this voxel is anything other than air.
    #[inline]
    pub const fn is_solid(self) -> bool {
        self.id != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_air_is_zero() {
        assert_eq!(Voxel::AIR, Voxel::new(0));
        assert!(Voxel::AIR.is_air());
        assert!(!Voxel::AIR.is_solid());
        assert_eq!(Voxel::default(), Voxel::AIR);
    }

    #[test]
    fn test_solid() {
        let v = Voxel::new(3);
        assert!(v.is_solid());
        assert!(!v.is_air());
    }
}
