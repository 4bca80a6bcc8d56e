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

//! CPU-side asset data, decoupled from any GPU backend.

/// A decoded image held in CPU memory as tightly packed RGBA8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuTexture {
    /// The raw pixel data, 4 bytes per pixel, rows top to bottom.
    pub pixels: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl CpuTexture {
    /// Wraps raw RGBA8 pixel data.
    ///
    /// Returns `None` when `pixels` is not exactly `width * height * 4`
    /// bytes long.
    pub fn from_rgba8(pixels: Vec<u8>, width: u32, height: u32) -> Option<Self> {
        if pixels.len() != (width as usize) * (height as usize) * 4 {
            return None;
        }
        Some(Self {
            pixels,
            width,
            height,
        })
    }

    /// The size of one row of pixels, in bytes.
    #[inline]
    pub fn row_size(&self) -> u32 {
        self.width * 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgba8_validates_length() {
        assert!(CpuTexture::from_rgba8(vec![0; 2 * 2 * 4], 2, 2).is_some());
        assert!(CpuTexture::from_rgba8(vec![0; 15], 2, 2).is_none());
        assert!(CpuTexture::from_rgba8(Vec::new(), 0, 0).is_some());
    }

    #[test]
    fn test_row_size() {
        let tex = CpuTexture::from_rgba8(vec![0; 8 * 3 * 4], 8, 3).unwrap();
        assert_eq!(tex.row_size(), 32);
    }
}
