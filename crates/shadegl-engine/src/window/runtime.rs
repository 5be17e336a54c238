use anyhow::{Context, Result};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

use crate::device::{GlowBackend, RendererConfig, Surface};
use crate::renderer::Renderer;

use super::gl_window::GlWindow;

/// Renderer bound to a native window.
pub type GlRenderer = Renderer<GlowBackend, GlWindow>;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,

    /// Wait for vertical blank on present.
    pub vsync: bool,

    /// Depth buffer bits requested from the driver.
    pub depth_bits: u8,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "shadegl".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            vsync: true,
            depth_bits: 24,
        }
    }
}

/// Whether the runtime should keep going after an application callback.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application hooks driven by [`Runtime`].
pub trait App {
    /// Called once the window and context exist. Build programs, upload
    /// buffers and [`start`](Renderer::start) the frame loop here.
    fn setup(&mut self, renderer: &mut GlRenderer) -> Result<()>;

    /// Sees every window event before the runtime handles it.
    fn on_window_event(&mut self, _renderer: &mut GlRenderer, _event: &WindowEvent) -> AppControl {
        AppControl::Continue
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and drives `app` until the window closes or the app
    /// asks to exit. Returns the first setup error, if any.
    pub fn run<A>(config: RuntimeConfig, renderer_config: RendererConfig, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, renderer_config, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

struct AppState<A: App> {
    config: RuntimeConfig,
    renderer_config: RendererConfig,
    app: A,

    renderer: Option<GlRenderer>,
    /// Surface contents are stale until the next presented frame.
    invalidated: bool,
    failure: Option<anyhow::Error>,
    exit_requested: bool,
}

impl<A: App> AppState<A> {
    fn new(config: RuntimeConfig, renderer_config: RendererConfig, app: A) -> Self {
        Self {
            config,
            renderer_config,
            app,
            renderer: None,
            invalidated: true,
            failure: None,
            exit_requested: false,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure.get_or_insert(err);
        self.request_exit(event_loop);
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        // Release GL objects while the context is still alive.
        self.renderer = None;
        event_loop.exit();
    }

    fn create_renderer(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let (backend, window) = GlWindow::acquire(event_loop, &self.config)
            .context("failed to acquire a GL context for the window")?;

        let mut renderer = Renderer::new(backend, window, self.renderer_config.clone());
        self.app
            .setup(&mut renderer)
            .context("application setup failed")?;

        renderer.surface().window().request_redraw();
        self.renderer = Some(renderer);
        Ok(())
    }
}

impl<A: App> ApplicationHandler for AppState<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.is_some() || self.exit_requested {
            return;
        }

        if let Err(e) = self.create_renderer(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Frames are requested by the renderer's frame loop, not polled.
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };

        if self.app.on_window_event(renderer, &event) == AppControl::Exit {
            self.request_exit(event_loop);
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.request_exit(event_loop),

            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                renderer.resize();
                self.invalidated = true;
                renderer.surface().window().request_redraw();
            }

            WindowEvent::RedrawRequested => {
                if renderer.redraw(self.invalidated) {
                    self.invalidated = false;
                    if let Err(e) = renderer.surface().present() {
                        log::error!("present failed: {e}");
                    }
                }
            }

            _ => {}
        }
    }
}
