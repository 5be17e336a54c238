use std::num::NonZeroU32;

use glutin::config::{ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface as GlutinSurface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow as _};
use raw_window_handle::HasWindowHandle;
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

use crate::device::{BackingSize, GlowBackend, Surface};
use crate::error::{GlError, Result};

use super::runtime::RuntimeConfig;

fn unavailable(what: &str, err: impl std::fmt::Display) -> GlError {
    GlError::ContextUnavailable(format!("{what}: {err}"))
}

/// A winit window with a current OpenGL 3.3 core context.
///
/// Field order is drop order: the surface and context go before the window
/// they were created for.
pub struct GlWindow {
    surface: GlutinSurface<WindowSurface>,
    context: PossiblyCurrentContext,
    window: Window,
    backing: BackingSize,
}

impl GlWindow {
    /// Creates the window, picks a config, creates a core context and makes it
    /// current. Returns the window together with a backend on that context.
    pub fn acquire(
        event_loop: &ActiveEventLoop,
        config: &RuntimeConfig,
    ) -> Result<(GlowBackend, GlWindow)> {
        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(config.initial_size);

        let template = ConfigTemplateBuilder::new().with_depth_size(config.depth_bits);

        // `DisplayBuilder::build` returns the `find_configs` error when nothing
        // matches `template`, so the picker always gets at least one config.
        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(attrs))
            .build(event_loop, template, |configs| {
                configs
                    .reduce(|best, c| if c.num_samples() > best.num_samples() { c } else { best })
                    .expect("non-empty config set")
            })
            .map_err(|e| unavailable("no matching GL config", e))?;

        let window = window.ok_or_else(|| unavailable("window creation", "no window returned"))?;

        let raw = window
            .window_handle()
            .map_err(|e| unavailable("window handle", e))?
            .as_raw();

        let display = gl_config.display();
        let context_attrs = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .with_profile(GlProfile::Core)
            .build(Some(raw));

        // SAFETY: `raw` belongs to `window`, which outlives the context.
        let not_current = unsafe { display.create_context(&gl_config, &context_attrs) }
            .map_err(|e| unavailable("context creation", e))?;

        let surface_attrs = window
            .build_surface_attributes(Default::default())
            .map_err(|e| unavailable("surface attributes", e))?;

        // SAFETY: same window as above.
        let surface = unsafe { display.create_window_surface(&gl_config, &surface_attrs) }
            .map_err(|e| unavailable("surface creation", e))?;

        let context = not_current
            .make_current(&surface)
            .map_err(|e| unavailable("make current", e))?;

        let interval = if config.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = surface.set_swap_interval(&context, interval) {
            log::warn!("could not set swap interval: {e}");
        }

        // SAFETY: the context was made current on this thread just above.
        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|name| display.get_proc_address(name).cast())
        };

        log::debug!(
            "GL context ready ({} samples, {} depth bits)",
            gl_config.num_samples(),
            gl_config.depth_size()
        );

        let gl_window = GlWindow {
            surface,
            context,
            window,
            backing: BackingSize::default(),
        };
        Ok((GlowBackend::new(gl), gl_window))
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Swaps the back buffer onto the window.
    pub fn present(&self) -> Result<()> {
        self.surface
            .swap_buffers(&self.context)
            .map_err(|e| unavailable("swap buffers", e))
    }
}

impl Surface for GlWindow {
    fn client_size(&self) -> (f64, f64) {
        let logical = self.window.inner_size().to_logical::<f64>(self.window.scale_factor());
        (logical.width, logical.height)
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.window.scale_factor()
    }

    fn backing_size(&self) -> BackingSize {
        self.backing
    }

    fn set_backing_size(&mut self, size: BackingSize) {
        self.backing = size;

        // Minimized windows report 0x0; the surface keeps its last size.
        if let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
            self.surface.resize(&self.context, w, h);
        }
    }

    fn request_frame(&self) {
        self.window.request_redraw();
    }
}
