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

//! Holds the core WGPU state objects required for rendering: instance,
//! surface, adapter, device, queue, and the surface configuration.

use std::sync::Arc;

use anyhow::Result;
use wgpu::{
    Features, Instance, InstanceDescriptor, Surface, SurfaceCapabilities, SurfaceConfiguration,
    TextureFormat,
};
use winit::dpi::PhysicalSize;
use winit::window::Window;

/// The connection to the graphics API and the window's swapchain.
#[derive(Debug)]
pub struct WgpuContext {
    pub instance: wgpu::Instance,
    pub surface: wgpu::Surface<'static>,
    pub adapter: wgpu::Adapter,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,

    /// Configuration for the surface's swapchain behavior.
    pub surface_config: wgpu::SurfaceConfiguration,

    active_device_features: wgpu::Features,
}

impl WgpuContext {
    /// Initializes the graphics context for rendering on `window`.
    ///
    /// Sets up the WGPU instance, surface, adapter, device, and queue, and
    /// configures the surface swapchain from the window size.
    pub fn new(window: Arc<Window>) -> Result<Self> {
        log::info!("Initializing WGPU graphics context...");
        pollster::block_on(Self::initialize_async(window))
    }

    async fn initialize_async(window: Arc<Window>) -> Result<Self> {
        let window_size: PhysicalSize<u32> = window.inner_size();
        log::debug!(
            "Window size for initial graphics setup: {}x{}",
            window_size.width,
            window_size.height
        );

        // --- 1. Create Instance and Surface ---
        let instance = Instance::new(&InstanceDescriptor::default());
        let surface: Surface<'static> = instance.create_surface(window.clone())?;
        log::debug!("WGPU surface created for the window.");

        // --- 2. Select Adapter ---
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        let adapter_info = adapter.get_info();
        log::info!(
            "Renderer: \"{}\" (Backend: {:?}, Device: {:?})",
            adapter_info.name,
            adapter_info.backend,
            adapter_info.device_type
        );

        // --- 3. Create Logical Device and Command Queue ---
        // Wireframe drawing wants POLYGON_MODE_LINE; take it only where the
        // adapter offers it so the device request can't fail over a debug
        // feature.
        let wanted_features: Features = wgpu::Features::POLYGON_MODE_LINE;
        let features_to_enable: Features = adapter.features() & wanted_features;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Lithos Logical Device"),
                required_features: features_to_enable,
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;
        log::info!("Logical device and command queue created.");

        device.on_uncaptured_error(Box::new(|e| {
            log::error!("WGPU uncaptured error: {e:?}");
        }));

        let active_device_features = device.features();
        log::debug!("Active device features: {active_device_features:?}");

        // --- 4. Configure Surface ---
        let surface_caps: SurfaceCapabilities = surface.get_capabilities(&adapter);
        let surface_format: TextureFormat = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);
        let surface_config: SurfaceConfiguration = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: window_size.width.max(1),
            height: window_size.height.max(1),
            present_mode: surface_caps
                .present_modes
                .iter()
                .copied()
                .find(|m| *m == wgpu::PresentMode::Mailbox)
                .unwrap_or(wgpu::PresentMode::Fifo),
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);
        log::info!(
            "Surface configured: {:?} {}x{} ({:?})",
            surface_format,
            surface_config.width,
            surface_config.height,
            surface_config.present_mode
        );

        Ok(WgpuContext {
            instance,
            surface,
            adapter,
            device,
            queue,
            surface_config,
            active_device_features,
        })
    }

    /// Reconfigures the surface (swapchain) when the window is resized.
    ///
    /// Zero-sized requests (minimized window) are ignored with a warning;
    /// configuring a zero-size surface is a validation error.
    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            log::info!("WgpuContext: resizing surface configuration to {new_width}x{new_height}");
            self.surface_config.width = new_width;
            self.surface_config.height = new_height;
            self.surface.configure(&self.device, &self.surface_config);
        } else {
            log::warn!(
                "WgpuContext: ignoring resize request to zero dimensions: {new_width}x{new_height}"
            );
        }
    }

    /// Re-applies the current surface configuration. Used to recover from
    /// `Lost`/`Outdated` surface errors.
    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.surface_config);
    }

    /// The swapchain texture format.
    #[inline]
    pub fn surface_format(&self) -> TextureFormat {
        self.surface_config.format
    }

    /// The current swapchain size in pixels.
    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.surface_config.width, self.surface_config.height)
    }

    /// Returns `true` when the device was created with line polygon mode,
    /// i.e. the wireframe pipeline variant is available.
    #[inline]
    pub fn wireframe_supported(&self) -> bool {
        self.active_device_features
            .contains(wgpu::Features::POLYGON_MODE_LINE)
    }
}
