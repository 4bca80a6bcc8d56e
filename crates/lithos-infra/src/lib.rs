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

//! # Lithos Infra
//!
//! Concrete backends behind the contracts of `lithos-core`: wgpu rendering,
//! winit windowing and input translation, rapier physics, egui overlay, and
//! filesystem asset loading.

pub mod assets;

#[cfg(feature = "graphics")]
pub mod graphics;

#[cfg(feature = "physics")]
pub mod physics;

#[cfg(feature = "platform")]
pub mod platform;

#[cfg(all(feature = "graphics", feature = "platform"))]
pub mod ui;
