use anyhow::Context;
use clap::Parser;
use log::info;
use std::sync::Arc;
use std::time::Duration;

use scroll_scene::cli::{Cli, Command};
use scroll_scene::core::Throttled;
use scroll_scene::frame::{FixedStepFrames, FrameInfo, FrameIterator};
use scroll_scene::loaders::{AssetLoader, AssetSource, FsFetcher};
use scroll_scene::page::Page;
use scroll_scene::scroll::{self, PageLayout};
use scroll_scene::traits::AssetFetcher;

// === Constants ===

const VIEWPORT_WIDTH: f32 = 1280.0;
const VIEWPORT_HEIGHT: f32 = 800.0;
const LANDING_HEIGHT: f32 = 1000.0;
const WORK_HEIGHT: f32 = 800.0;
const STATUS_INTERVAL: f32 = 1.0;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let fetcher: Arc<dyn AssetFetcher> = Arc::new(match &cli.assets {
        Some(root) => FsFetcher::with_root(root),
        None => FsFetcher::new(),
    });

    match &cli.command {
        Some(Command::Inspect { path }) => inspect(fetcher, path),
        None => simulate(&cli, fetcher),
    }
}

/// Load one model and describe it
fn inspect(fetcher: Arc<dyn AssetFetcher>, path: &str) -> anyhow::Result<()> {
    let loader = AssetLoader::new(fetcher, f32::INFINITY);
    let outcome = pollster::block_on(loader.load(AssetSource::Path(path.to_string())).settle());

    if let Some(reason) = outcome.failure() {
        anyhow::bail!("could not load {}: {}", path, reason);
    }

    let model = outcome.model();
    println!("{}: {} meshes, {} triangles", model.name, model.meshes.len(), model.triangle_count());
    if let Some(bounds) = model.bounds() {
        println!("  bounds min {:?} max {:?}", bounds.min, bounds.max);
    }
    for (i, mesh) in model.meshes.iter().enumerate() {
        println!(
            "  [{}] {} - {} vertices, color {:?}, opacity {}",
            i,
            mesh.name.as_deref().unwrap_or("<unnamed>"),
            mesh.geometry.vertices.len(),
            mesh.material.color,
            mesh.material.opacity
        );
    }
    Ok(())
}

/// Mount the landing page and scroll through it at a steady speed
fn simulate(cli: &Cli, fetcher: Arc<dyn AssetFetcher>) -> anyhow::Result<()> {
    let config = cli.scene_config()?;

    let layout = PageLayout::stacked(
        VIEWPORT_WIDTH,
        VIEWPORT_HEIGHT,
        [
            (config.scroll.selector.as_str(), LANDING_HEIGHT),
            (config.gallery.selector.as_str(), WORK_HEIGHT),
        ],
    );
    let registry = scroll::global();
    registry.borrow_mut().set_layout(layout);

    let mut page = Page::with_registry(config, registry, fetcher).context("building page")?;
    page.mount().context("mounting scene")?;

    if cli.realtime {
        run(&mut page, cli, FrameIterator::new().take(cli.frames as usize))
    } else {
        run(&mut page, cli, FixedStepFrames::new(cli.fps).take_frames(cli.frames))
    }

    page.unmount();
    info!("Done");
    Ok(())
}

fn run(page: &mut Page, cli: &Cli, frames: impl Iterator<Item = FrameInfo>) {
    let pace = cli.realtime.then(|| Duration::from_secs_f32(1.0 / cli.fps));
    let mut status = Throttled::new(STATUS_INTERVAL);

    for frame in frames {
        page.scroll_by(cli.scroll_speed * frame.delta);
        page.tick(&frame);

        if status.try_tick(frame.delta) && !cli.no_ui {
            print_status(page, frame.number, frame.time);
        }
        if let Some(pace) = pace {
            std::thread::sleep(pace);
        }
    }
}

fn print_status(page: &Page, number: u64, time: f32) {
    let controller = page.controller();
    match controller.model_snapshot() {
        Some(model) => println!(
            "[{:>5}] t={:>6.2}s scroll={:>7.1} progress={:.3} y={:.3} yaw={:.3} visible={}/{}{}",
            number,
            time,
            page.scroll_y(),
            controller.scroll_progress(),
            model.root.position.y,
            model.yaw(),
            model.visible_mesh_count(),
            model.meshes.len(),
            if controller.is_fallback() { " (fallback)" } else { "" }
        ),
        None => println!("[{:>5}] t={:>6.2}s loading model...", number, time),
    }
    println!("        gallery offset={:.1}", page.gallery().offset_x());
}
