use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::color;
use crate::gpu::{GpuConfig, GpuContext, SurfaceAction};
use crate::input::{Key, KeyEvent, KeyState, Keyboard};
use crate::render::TriangleRenderer;
use crate::time::FrameClock;

/// Window configuration.
///
/// Width and height are in logical pixels, matching what the original
/// program passed to its window-creation call.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "trigon".to_string(),
            width: 800,
            height: 600,
        }
    }
}

/// Entry point for the runtime.
///
/// Drives the whole lifecycle: create the window and GPU context, build the
/// triangle pipeline and vertex buffer, render until Escape or window close,
/// then release everything by dropping it.
pub struct Runtime;

impl Runtime {
    pub fn run(window: WindowConfig, gpu: GpuConfig) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut app = App::new(window, gpu);

        event_loop
            .run_app(&mut app)
            .context("winit event loop terminated with error")?;

        // Initialization failures happen inside winit callbacks; surface
        // them here so the caller sees one error chain.
        match app.init_error.take() {
            Some(err) => Err(err),
            None => {
                log::info!("clean shutdown");
                Ok(())
            }
        }
    }
}

/// Everything that lives strictly between Initialize and Shutdown.
///
/// Field order is drop order: the renderer (pipeline + vertex buffer) goes
/// first, then the GPU context; the window entry drops the window last.
struct Scene<'w> {
    renderer: TriangleRenderer,
    gpu: GpuContext<'w>,
}

impl<'w> Scene<'w> {
    fn new(window: &'w Window, config: GpuConfig) -> Result<Self> {
        let gpu = pollster::block_on(GpuContext::new(window, config))?;
        let renderer = TriangleRenderer::new(gpu.device(), gpu.surface_format());
        Ok(Self { gpu, renderer })
    }
}

#[self_referencing]
struct WindowEntry {
    keyboard: Keyboard,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    scene: Scene<'this>,
}

struct App {
    window_config: WindowConfig,
    gpu_config: GpuConfig,

    entry: Option<WindowEntry>,
    exit_requested: bool,
    init_error: Option<anyhow::Error>,
}

impl App {
    fn new(window_config: WindowConfig, gpu_config: GpuConfig) -> Self {
        Self {
            window_config,
            gpu_config,
            entry: None,
            exit_requested: false,
            init_error: None,
        }
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.window_config.title.clone())
            .with_inner_size(LogicalSize::new(
                self.window_config.width as f64,
                self.window_config.height as f64,
            ));

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        log::info!(
            "window created ({}x{})",
            self.window_config.width,
            self.window_config.height
        );

        let gpu_config = self.gpu_config.clone();

        let entry = WindowEntryTryBuilder {
            keyboard: Keyboard::default(),
            clock: FrameClock::new(),
            window,
            scene_builder: |w| Scene::new(w, gpu_config),
        }
        .try_build()?;

        self.entry = Some(entry);
        Ok(())
    }

    /// Renders one frame: clear to the teal-gray background, draw the
    /// triangle, present.
    fn redraw(&mut self) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        let mut fatal = false;

        entry.with_mut(|fields| {
            let ft = fields.clock.tick();
            if let Some(rate) = ft.rate {
                log::debug!("frame {}: {:.1} fps", ft.frame_index, rate);
            }

            let mut frame = match fields.scene.gpu.begin_frame() {
                Ok(frame) => frame,
                Err(err) => {
                    if fields.scene.gpu.handle_surface_error(err) == SurfaceAction::Fatal {
                        fatal = true;
                    }
                    return;
                }
            };

            fields
                .scene
                .renderer
                .render(&mut frame.encoder, &frame.view, color::CLEAR);

            fields.window.pre_present_notify();
            fields.scene.gpu.submit(frame);
        });

        if fatal {
            log::error!("surface ran out of memory; shutting down");
            self.exit_requested = true;
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        if let Err(err) = self.create_window_entry(event_loop) {
            self.init_error = Some(err);
            self.exit_requested = true;
            event_loop.exit();
            return;
        }

        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; present pacing comes from the FIFO surface.
        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match &event {
            WindowEvent::CloseRequested => {
                self.exit_requested = true;
            }

            WindowEvent::Focused(focused) => {
                if let Some(entry) = self.entry.as_mut() {
                    entry.with_mut(|fields| fields.keyboard.set_focused(*focused));
                }
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                let Some(entry) = self.entry.as_mut() else {
                    return;
                };

                let ev = KeyEvent {
                    key: map_key(key_event.physical_key),
                    state: map_key_state(key_event.state),
                    repeat: key_event.repeat,
                };

                let mut escape_down = false;
                entry.with_mut(|fields| {
                    fields.keyboard.apply(ev);
                    escape_down = fields.keyboard.is_down(Key::Escape);
                });

                if escape_down {
                    self.exit_requested = true;
                }
            }

            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.entry.as_mut() {
                    entry.with_scene_mut(|scene| scene.gpu.resize(*new_size));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.entry.as_mut() {
                    let new_size = entry.with_window(|w| w.inner_size());
                    entry.with_scene_mut(|scene| scene.gpu.resize(new_size));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::RedrawRequested => {
                self.redraw();
            }

            _ => {}
        }

        if self.exit_requested {
            // Drop window + GPU resources before the loop unwinds.
            self.entry = None;
            event_loop.exit();
        }
    }
}

fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(code) => match code {
            KeyCode::Escape => Key::Escape,
            KeyCode::Enter => Key::Enter,
            KeyCode::Space => Key::Space,
            KeyCode::Tab => Key::Tab,
            other => Key::Unknown(other as u32),
        },

        // NativeKeyCode has no stable numeric representation.
        PhysicalKey::Unidentified(_) => Key::Unknown(0),
    }
}

fn map_key_state(state: ElementState) -> KeyState {
    match state {
        ElementState::Pressed => KeyState::Pressed,
        ElementState::Released => KeyState::Released,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_maps_to_its_named_variant() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Escape)), Key::Escape);
    }

    #[test]
    fn unnamed_keys_keep_a_platform_code() {
        match map_key(PhysicalKey::Code(KeyCode::KeyQ)) {
            Key::Unknown(code) => assert_eq!(code, KeyCode::KeyQ as u32),
            other => panic!("expected Unknown, got {other:?}"),
        }
    }

    #[test]
    fn element_state_maps_one_to_one() {
        assert_eq!(map_key_state(ElementState::Pressed), KeyState::Pressed);
        assert_eq!(map_key_state(ElementState::Released), KeyState::Released);
    }

    #[test]
    fn default_config_is_the_classic_tutorial_size() {
        let cfg = WindowConfig::default();
        assert_eq!((cfg.width, cfg.height), (800, 600));
    }
}
