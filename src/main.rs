use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use rastery::colors;
use rastery::logging::{init_logging, LoggingConfig};
use rastery::prelude::*;

/// Renders a model with the CPU scanline rasterizer.
#[derive(Parser, Debug)]
#[command(name = "rastery", version, about)]
struct Cli {
    /// Configuration file (.toml or .ron)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// OBJ model to render instead of the built-in cube
    #[arg(short, long, value_name = "FILE")]
    model: Option<PathBuf>,

    /// Number of frames to render before writing the output
    #[arg(short = 'n', long, default_value_t = 1)]
    frames: u32,

    /// Where the last frame is written (headless) or screenshots go (window)
    #[arg(short, long, value_name = "FILE", default_value = "frame.png")]
    output: PathBuf,

    /// Advance the model by its animation step every frame
    #[arg(long)]
    animate: bool,

    /// Advance the animation on a worker thread while pixels are written
    #[arg(long)]
    threaded: bool,

    /// Open an interactive window instead of writing a file
    #[cfg(feature = "window")]
    #[arg(long)]
    window: bool,

    /// More output: -v for debug, -vv for trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log filter, e.g. "rastery::render=trace" (overrides -v and RUST_LOG)
    #[arg(long, value_name = "FILTER")]
    log: Option<String>,
}

/// The pipeline plus everything one presentation loop needs.
struct Driver {
    render: Render,
    ctx: RenderContext,
    canvas: Canvas,
    rasterizer: ScanlineRasterizer,
    animator: Option<Animator>,
    animate: bool,
    pending: usize,
}

impl Driver {
    fn new(render: Render, ctx: RenderContext, animator: Option<Animator>, animate: bool) -> Self {
        let canvas = Canvas::new(ctx.viewport().width(), ctx.viewport().height());
        let mut driver = Self {
            render,
            ctx,
            canvas,
            rasterizer: ScanlineRasterizer::new(),
            animator,
            animate: false,
            pending: 0,
        };
        driver.set_animation(animate);
        driver
    }

    /// Inline animation runs inside `render()`; threaded animation is
    /// submitted after it and collected before the next frame.
    fn set_animation(&mut self, enabled: bool) {
        self.animate = enabled;
        self.ctx
            .set_animation_enabled(enabled && self.animator.is_none());
    }

    /// Renders and rasterizes one frame. Returns the number of pixels written.
    fn frame(&mut self) -> Result<usize> {
        if let Some(animator) = &self.animator {
            if self.pending > 0 {
                let updates = animator.collect(self.pending)?;
                self.render.apply_poses(updates);
                self.pending = 0;
            }
        }

        let triangles = self.render.render(&mut self.ctx)?;

        if self.animate {
            if let Some(animator) = &self.animator {
                self.pending = self.render.submit_animation(animator)?;
            }
        }

        self.canvas.clear(colors::BACKGROUND);
        let written = self
            .rasterizer
            .draw_frame(&triangles, &mut self.canvas.as_framebuffer());
        log::debug!("{} triangles, {written} pixels", triangles.len());
        Ok(written)
    }

    #[cfg(feature = "window")]
    fn resize(&mut self, width: u32, height: u32) {
        self.ctx.resize(width, height);
        self.canvas.resize(width, height);
    }
}

fn load_model(path: Option<&Path>, color: [u8; 3]) -> Result<Model> {
    match path {
        Some(path) => Model::from_obj(path, color)
            .with_context(|| format!("loading model {}", path.display())),
        None => Ok(Model::cube(2.0, color)),
    }
}

fn run_headless(driver: &mut Driver, frames: u32, output: &Path) -> Result<()> {
    let mut written = 0;
    for _ in 0..frames.max(1) {
        written = driver.frame()?;
    }
    driver
        .canvas
        .save(output)
        .with_context(|| format!("writing {}", output.display()))?;
    log::info!("rendered {} frame(s), {written} pixels in the last", frames.max(1));
    Ok(())
}

#[cfg(feature = "window")]
fn run_window(driver: &mut Driver, output: &Path) -> Result<()> {
    use rastery::window::{FrameLimiter, Key, Window, WindowEvent};

    let mut window = Window::new(
        "Rastery",
        driver.ctx.viewport().width(),
        driver.ctx.viewport().height(),
    )
    .map_err(anyhow::Error::msg)?;
    let mut limiter = FrameLimiter::new(&window);

    'running: loop {
        for event in window.poll_events() {
            match event {
                WindowEvent::Quit => break 'running,
                WindowEvent::Resize(width, height) => {
                    window.resize(width, height);
                    driver.resize(width, height);
                }
                WindowEvent::KeyDown(Key::ToggleAnimation) => {
                    let enabled = !driver.animate;
                    driver.set_animation(enabled);
                    log::info!("animation {}", if enabled { "on" } else { "off" });
                }
                WindowEvent::KeyDown(Key::Screenshot) => driver.canvas.save(output)?,
                WindowEvent::KeyDown(key) => {
                    let step = driver.ctx.camera().step();
                    let camera = driver.ctx.camera_mut();
                    match key {
                        Key::Forward => camera.move_forward(step),
                        Key::Back => camera.move_back(step),
                        Key::Left => camera.move_right(-step),
                        Key::Right => camera.move_right(step),
                        Key::Up => camera.move_up(step),
                        Key::Down => camera.move_up(-step),
                        Key::YawLeft => camera.rotate_yaw(-step * 0.1),
                        Key::YawRight => camera.rotate_yaw(step * 0.1),
                        Key::ToggleAnimation | Key::Screenshot => {}
                    }
                }
            }
        }

        driver.frame()?;
        window
            .present(driver.canvas.as_bytes())
            .map_err(anyhow::Error::msg)?;
        limiter.wait_and_get_delta(&window);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut logging = LoggingConfig::from_verbosity(cli.verbose);
    if let Some(filter) = &cli.log {
        logging = logging.with_filter(filter.as_str());
    }
    init_logging(&logging);

    let config = match &cli.config {
        Some(path) => RenderConfig::load(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => RenderConfig::default(),
    };

    let model = load_model(cli.model.as_deref(), config.render.color)?;
    let scene = Scene::new(ModelInstance::at(Vec3::new(
        0.0,
        0.0,
        config.render.model_distance,
    )))
    .with_animation(config.render.animation);

    let mut render = Render::new();
    render.insert_scene(scene, model);

    let animator = if cli.threaded {
        Some(Animator::spawn()?)
    } else {
        None
    };
    let animate = cli.animate || config.render.animate;
    let mut driver = Driver::new(render, RenderContext::from_config(&config), animator, animate);

    #[cfg(feature = "window")]
    if cli.window {
        return run_window(&mut driver, &cli.output);
    }

    run_headless(&mut driver, cli.frames, &cli.output)
}
