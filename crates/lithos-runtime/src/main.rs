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

//! The Lithos engine binary: loads settings, builds the engine state, and
//! runs the winit event loop until the window closes.

mod app;
mod debug_ui;
mod scene;
mod settings;

use std::path::Path;

use anyhow::Result;
use winit::event_loop::EventLoop;

use crate::app::EngineState;
use crate::settings::EngineSettings;

const SETTINGS_PATH: &str = "settings.json";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        // wgpu's validation layers repeat everything on their own loggers.
        .filter_module("wgpu_hal", log::LevelFilter::Error)
        .filter_module("wgpu_core", log::LevelFilter::Error)
        .init();

    log::info!("Lithos Engine starting...");
    let settings = EngineSettings::load(Path::new(SETTINGS_PATH))?;

    let event_loop = EventLoop::new()?;
    let mut state = EngineState::new(settings);
    event_loop.run_app(&mut state)?;

    log::info!("Lithos Engine exited cleanly.");
    Ok(())
}
