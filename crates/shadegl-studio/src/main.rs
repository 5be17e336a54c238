//! Full-screen plasma effect on a native window.
//!
//! Usage: `shadegl-studio [VERTEX FRAGMENT]`, where each location is a file
//! path or an http(s) URL. Defaults to the bundled shaders. Esc quits.

use anyhow::{Context, Result};
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use shadegl_engine::device::RendererConfig;
use shadegl_engine::geometry::ScreenQuad;
use shadegl_engine::locations::{AttributeLayout, UniformValue};
use shadegl_engine::logging::{init_logging, LoggingConfig};
use shadegl_engine::window::{App, AppControl, GlRenderer, Runtime, RuntimeConfig};

const VERTEX: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/shaders/plasma.vert");
const FRAGMENT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/shaders/plasma.frag");

struct Plasma {
    vertex: String,
    fragment: String,
}

impl App for Plasma {
    fn setup(&mut self, gl: &mut GlRenderer) -> Result<()> {
        pollster::block_on(gl.build_from_files(&self.vertex, &self.fragment))
            .context("failed to build the plasma program")?;

        gl.upload_vertex_buffer(ScreenQuad::vertices())?;
        gl.upload_index_buffer(ScreenQuad::indices())?;
        gl.configure_attribute("a_position", AttributeLayout::floats(2))
            .context("plasma vertex shader has no `a_position` input")?;

        let mut time_ms = 0.0;
        gl.start(move |gl, elapsed_ms| {
            time_ms += elapsed_ms;

            let size = gl.backing_size();
            gl.set_uniform("u_time", UniformValue::Float(time_ms as f32));
            gl.set_uniform(
                "u_resolution",
                UniformValue::Vec2([size.width as f32, size.height as f32]),
            );

            let clear = gl.config().clear_color;
            let drawn = gl.background(clear).draw_elements().map(|_| ());
            if let Err(e) = drawn {
                log::error!("draw failed: {e}");
                gl.stop();
            }
        });

        Ok(())
    }

    fn on_window_event(&mut self, _gl: &mut GlRenderer, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape) =>
            {
                AppControl::Exit
            }
            _ => AppControl::Continue,
        }
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let mut args = std::env::args().skip(1);
    let app = match (args.next(), args.next()) {
        (Some(vertex), Some(fragment)) => Plasma { vertex, fragment },
        (None, None) => Plasma {
            vertex: VERTEX.to_owned(),
            fragment: FRAGMENT.to_owned(),
        },
        _ => anyhow::bail!("expected both a vertex and a fragment shader location"),
    };

    log::info!("shaders: {} + {}", app.vertex, app.fragment);

    Runtime::run(
        RuntimeConfig {
            title: "shadegl plasma".to_string(),
            initial_size: winit::dpi::LogicalSize::new(960.0, 540.0),
            ..RuntimeConfig::default()
        },
        RendererConfig::default(),
        app,
    )
}
