use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use softraster::fps::FpsCounter;
use softraster::{default_scene, load_scene, Renderer, Scene};

#[derive(Parser)]
#[command(about = "CPU software rasterizer")]
struct Args {
    /// Scene description (RON). Uses the built-in demo scene when omitted.
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Render without a window and write the last frame to this PNG
    #[arg(long)]
    headless: Option<PathBuf>,

    /// Number of frames to render in headless mode
    #[arg(long, default_value_t = 1)]
    frames: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let scene = match &args.scene {
        Some(path) => load_scene(path)
            .with_context(|| format!("loading scene {}", path.display()))?,
        None => default_scene(),
    };
    let renderer = Renderer::new(args.width.max(1), args.height.max(1));

    match &args.headless {
        Some(out) => run_headless(scene, renderer, args.frames, out),
        None => run_windowed(scene, renderer),
    }
}

fn run_headless(mut scene: Scene, mut renderer: Renderer, frames: u32, out: &Path) -> Result<()> {
    let mut fps = FpsCounter::default();
    for _ in 0..frames.max(1) {
        let stats = renderer.draw_scene(&mut scene);
        log::debug!("{:?}", stats);
        fps.tick();
    }

    renderer
        .frame_buffer()
        .save(out)
        .with_context(|| format!("writing {}", out.display()))?;
    info!("Wrote {}x{} frame to {}", renderer.width(), renderer.height(), out.display());
    Ok(())
}

#[cfg(feature = "window")]
fn run_windowed(mut scene: Scene, mut renderer: Renderer) -> Result<()> {
    use softraster::window::{FrameLimiter, Window, WindowEvent};
    use softraster::KeyboardController;

    let mut window =
        Window::new("softraster", renderer.width(), renderer.height()).map_err(anyhow::Error::msg)?;
    let mut controller = KeyboardController::default();
    let mut limiter = FrameLimiter::new(&window);
    let mut fps = FpsCounter::default();

    'running: loop {
        for event in window.poll_events() {
            match event {
                WindowEvent::Quit => break 'running,
                WindowEvent::Resize(w, h) => {
                    window.resize(w, h).map_err(anyhow::Error::msg)?;
                    renderer.resize(w, h);
                }
                WindowEvent::KeyDown(key) => controller.key_down(key),
                WindowEvent::KeyUp(key) => controller.key_up(key),
            }
        }

        let delta_ms = limiter.wait_and_get_delta(&window);
        controller.update(&mut scene.camera, delta_ms as f32 / 1000.0);

        renderer.draw_scene(&mut scene);
        window
            .present(renderer.as_bytes())
            .map_err(anyhow::Error::msg)?;
        fps.tick();
    }

    controller.dispose();
    Ok(())
}

#[cfg(not(feature = "window"))]
fn run_windowed(_scene: Scene, _renderer: Renderer) -> Result<()> {
    anyhow::bail!("built without the `window` feature; pass --headless <out.png> to render to a file")
}
