use anyhow::{Context, Result};
use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use super::surface;

/// Surface configuration knobs.
#[derive(Debug, Clone)]
pub struct GpuConfig {
    /// Prefer an sRGB surface format when available.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior). FIFO is vsync-paced and supported
    /// everywhere, which is exactly the pacing a fixed-scene loop wants.
    pub present_mode: wgpu::PresentMode,
}

impl Default for GpuConfig {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
        }
    }
}

/// Owns the wgpu device objects and the configured surface.
///
/// The surface borrows the window for `'w`; the window runtime guarantees
/// the window outlives this context.
pub struct GpuContext<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
}

/// A single acquired frame.
///
/// Short-lived: record into `encoder`, then hand the frame back to
/// [`GpuContext::submit`]. Holding the surface texture blocks acquisition of
/// subsequent frames.
pub struct Frame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

/// What to do after a surface acquisition error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    Skip,
    /// Unrecoverable (out of memory); shut the loop down.
    Fatal,
}

impl<'w> GpuContext<'w> {
    /// Creates a GPU context bound to a window.
    ///
    /// This is the whole "get a working graphics function table" step:
    /// instance, surface, adapter, device/queue, then an initial surface
    /// configuration at the window's current framebuffer size. Any failure
    /// here is fatal to the run and reported through the error chain.
    pub async fn new(window: &'w Window, init: GpuConfig) -> Result<Self> {
        let size = window.inner_size();
        anyhow::ensure!(
            surface::surface_extent(size).is_some(),
            "window has zero-sized framebuffer"
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let info = adapter.get_info();
        log::info!("adapter: {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("trigon device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let caps = surface.get_capabilities(&adapter);
        let format = surface::pick_surface_format(&caps.formats, init.prefer_srgb)
            .context("no supported surface formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: init.present_mode,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);
        log::info!(
            "surface configured: {}x{} {:?}",
            config.width,
            config.height,
            format
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
        })
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Active surface format.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Current framebuffer size in physical pixels.
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Reconfigures the surface to exactly the new framebuffer size.
    ///
    /// Zero-area sizes (minimized window) only update internal state;
    /// configuration is deferred until the next non-zero resize.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.size = new_size;

        let Some((width, height)) = surface::surface_extent(new_size) else {
            return;
        };

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Acquires the next surface texture and creates an encoder for it.
    pub fn begin_frame(&self) -> std::result::Result<Frame, SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("trigon frame encoder"),
            });

        Ok(Frame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Submits the recorded commands and presents the frame.
    ///
    /// Presentation (the buffer swap) happens when the surface texture is
    /// dropped after submission.
    pub fn submit(&self, frame: Frame) {
        self.queue.submit(std::iter::once(frame.encoder.finish()));
        drop(frame.view);
        drop(frame.surface_texture);
    }

    /// Maps a `SurfaceError` to the loop's next move.
    pub fn handle_surface_error(&mut self, err: SurfaceError) -> SurfaceAction {
        match err {
            SurfaceError::Lost | SurfaceError::Outdated => {
                if surface::surface_extent(self.size).is_some() {
                    self.surface.configure(&self.device, &self.config);
                }
                SurfaceAction::Reconfigured
            }
            SurfaceError::OutOfMemory => SurfaceAction::Fatal,
            SurfaceError::Timeout => SurfaceAction::Skip,
            SurfaceError::Other => SurfaceAction::Skip,
        }
    }
}
