use std::fs;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use log::info;
use rayon::ThreadPoolBuilder;

use scanline3d::engine::DEFAULT_TILE_ROWS;
use scanline3d::render::MAX_DIMENSION;
use scanline3d::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "scanline3d", about = "Render a scene script on the CPU")]
struct Args {
    /// Scene script: a `width height` header followed by one command per line
    script: PathBuf,

    /// Directory for the rendered frames (frame_000.png, frame_001.png, ...)
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// filled, wireframe or filled-wireframe
    #[arg(long, default_value_t = RenderMode::Filled)]
    mode: RenderMode,

    /// scanline or tiled
    #[arg(long, default_value_t = RasterizerType::Scanline)]
    rasterizer: RasterizerType,

    /// Rows per band for the tiled rasterizer
    #[arg(long, default_value_t = DEFAULT_TILE_ROWS)]
    tile_rows: u32,

    /// Cull back faces even if the script does not say `nobackfaces`
    #[arg(long)]
    cull: bool,

    /// Override the window size from the script header, e.g. 800x600
    #[arg(long, value_parser = parse_size)]
    size: Option<(u32, u32)>,

    /// Worker threads for the parallel stages (defaults to one per core)
    #[arg(long)]
    threads: Option<usize>,

    /// Show each frame in a window and wait for a key before continuing
    #[arg(long)]
    window: bool,

    /// More logging (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_size(s: &str) -> std::result::Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got `{s}`"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<u32>()
            .ok()
            .filter(|n| (1..=MAX_DIMENSION).contains(n))
            .ok_or_else(|| format!("`{v}` is not an integer between 1 and {MAX_DIMENSION}"))
    };
    Ok((parse(w)?, parse(h)?))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_millis()
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Some(threads) = args.threads {
        ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure the thread pool")?;
    }

    let mut script = Script::load(&args.script)
        .with_context(|| format!("cannot load scene script {}", args.script.display()))?;
    if let Some((width, height)) = args.size {
        script.width = width;
        script.height = height;
    }

    let script_dir = args
        .script
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let meshes = FileMeshSource::new(vec![script_dir]);

    let engine = Engine::new(RenderOptions {
        mode: args.mode,
        rasterizer: args.rasterizer,
        backface_culling: args.cull,
        tile_rows: args.tile_rows,
        ..RenderOptions::default()
    });
    info!(
        "rendering {} at {}x{} ({}, {} rasterizer)",
        args.script.display(),
        script.width,
        script.height,
        args.mode,
        args.rasterizer
    );

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("cannot create {}", args.out_dir.display()))?;

    let mut presenter = Presenter::new(args.window, script.width, script.height)?;
    let frames = run(&script, &meshes, |index, scene| {
        let frame = engine.render(scene)?;
        let path = args.out_dir.join(format!("frame_{index:03}.png"));
        frame.save_png(&path)?;
        info!("wrote {}", path.display());
        presenter.show(&frame)
    })
    .with_context(|| format!("failed to run {}", args.script.display()))?;

    info!("{frames} frame(s) rendered");
    Ok(())
}

/// Optional on-screen display between `display` commands.
#[cfg(feature = "window")]
struct Presenter(Option<Window>);

#[cfg(feature = "window")]
impl Presenter {
    fn new(enabled: bool, width: u32, height: u32) -> anyhow::Result<Self> {
        if !enabled {
            return Ok(Self(None));
        }
        let window = Window::new("scanline3d", width, height).map_err(anyhow::Error::msg)?;
        Ok(Self(Some(window)))
    }

    fn show(&mut self, frame: &FrameBuffer) -> scanline3d::Result<ControlFlow<()>> {
        let Some(window) = self.0.as_mut() else {
            return Ok(ControlFlow::Continue(()));
        };
        window.present(frame).map_err(Error::Window)?;
        Ok(match window.wait_for_key() {
            WindowEvent::Continue => ControlFlow::Continue(()),
            WindowEvent::Quit => ControlFlow::Break(()),
        })
    }
}

#[cfg(not(feature = "window"))]
struct Presenter;

#[cfg(not(feature = "window"))]
impl Presenter {
    fn new(enabled: bool, _width: u32, _height: u32) -> anyhow::Result<Self> {
        if enabled {
            anyhow::bail!("--window needs a build with the `window` feature");
        }
        Ok(Self)
    }

    fn show(&mut self, _frame: &FrameBuffer) -> scanline3d::Result<ControlFlow<()>> {
        Ok(ControlFlow::Continue(()))
    }
}
