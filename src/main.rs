//! Headless streaming driver: flies a viewpoint over generated terrain and
//! reports what the streaming pipeline did.

mod config;
mod path;
mod sink;

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use strata_stream::{ChunkState, World};
use strata_world::{ChunkCoord, Terrain, WorldGenParams, load_params_from_path};

use crate::config::AppConfig;
use crate::path::{FlyPath, PathKind};
use crate::sink::CountingSink;

#[derive(Parser, Debug)]
#[command(name = "strata", about = "Stream and mesh voxel terrain around a moving viewpoint")]
struct Args {
    /// TOML config with `seed`, `[worldgen]` and `[stream]` tables.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Standalone worldgen TOML; replaces the `[worldgen]` table.
    #[arg(long)]
    worldgen: Option<PathBuf>,
    #[arg(long)]
    seed: Option<i32>,
    #[arg(long)]
    render_distance: Option<i32>,
    /// Generation threads (0 = all cores).
    #[arg(long)]
    workers: Option<usize>,
    #[arg(long, default_value_t = 600)]
    ticks: u32,
    /// Wall-clock length of one tick.
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,
    #[arg(long, value_enum, default_value_t = PathKind::Line)]
    path: PathKind,
    /// Viewpoint speed in blocks per second.
    #[arg(long, default_value_t = 12.0)]
    speed: f32,
}

const REPORT_EVERY: u32 = 60;
const SETTLE_TICKS: u32 = 2000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(p) => AppConfig::load(p)?,
        None => AppConfig::default(),
    };
    if let Some(seed) = args.seed {
        cfg.seed = seed;
    }
    if let Some(r) = args.render_distance {
        cfg.stream.render_distance = r;
    }
    if let Some(w) = args.workers {
        cfg.stream.workers = w;
    }

    let params = match &args.worldgen {
        Some(p) => load_params_from_path(p)?,
        None => WorldGenParams::from_config(&cfg.worldgen),
    };
    let terrain = Terrain::new(cfg.seed, params);
    let mut world = World::new(terrain, cfg.stream.clone())?;
    let mut sink = CountingSink::default();

    let spawn = world.find_spawn_point(ChunkCoord::new(0, 0));
    log::info!(
        "spawn estimate ({:.1}, {:.1}, {:.1})",
        spawn.position.x,
        spawn.position.y,
        spawn.position.z
    );
    let path = FlyPath {
        kind: args.path,
        start: spawn.position,
        speed: args.speed,
    };

    let tick_len = Duration::from_millis(args.tick_ms);
    let started = Instant::now();
    let mut generated = 0usize;
    let mut stale = 0usize;
    let mut failed = 0usize;
    let mut evicted = 0usize;
    let mut last = path.start;

    for tick in 0..args.ticks {
        let t0 = Instant::now();
        let t = tick as f32 * args.tick_ms as f32 / 1000.0;
        last = path.at(t);
        let r = world.update_streaming(last, &mut sink);
        generated += r.received - r.stale - r.failed;
        stale += r.stale;
        failed += r.failed;
        evicted += r.evicted;
        if tick % REPORT_EVERY == 0 {
            log::info!(
                "tick {tick}: center {} resident {} queued {} in-flight {} live meshes {} budget {:?}",
                r.center,
                r.resident,
                r.queued,
                r.in_flight,
                sink.live_chunks(),
                world.budget().budget()
            );
        }
        if let Some(rest) = tick_len.checked_sub(t0.elapsed()) {
            thread::sleep(rest);
        }
    }

    // Let outstanding work land so the summary reflects a settled window.
    let mut settle = 0;
    while !world.is_idle() && settle < SETTLE_TICKS {
        let r = world.update_streaming(last, &mut sink);
        generated += r.received - r.stale - r.failed;
        stale += r.stale;
        failed += r.failed;
        evicted += r.evicted;
        settle += 1;
        thread::sleep(Duration::from_millis(1));
    }
    if !world.is_idle() {
        log::warn!("streaming still busy after {settle} settle ticks");
    }

    let meshed = world
        .store()
        .coords()
        .filter(|&c| world.state(c) == ChunkState::Meshed)
        .count();
    if meshed != sink.live_chunks() || sink.bad_releases > 0 {
        log::warn!(
            "render buffers out of sync: {meshed} meshed chunks, {} live, {} bad releases",
            sink.live_chunks(),
            sink.bad_releases
        );
    }

    let colors = world.color_cache_stats();
    println!("strata: seed {} render distance {}", cfg.seed, cfg.stream.render_distance);
    println!(
        "  {} ticks (+{settle} settle) in {:.2?}, {} workers",
        args.ticks,
        started.elapsed(),
        world.worker_count()
    );
    println!("  generated {generated}, failed {failed}, stale {stale}, evicted {evicted}");
    println!(
        "  resident {}, live meshes {} (peak {}), {} vertices, {} indices",
        world.resident_count(),
        sink.live_chunks(),
        sink.peak_live,
        sink.live_vertices(),
        sink.live_indices()
    );
    println!(
        "  uploads {} ({} replacing), releases {}",
        sink.uploads, sink.replaced, sink.releases
    );
    println!(
        "  color cache: {} entries, {} hits, {} misses, {} evicted",
        colors.entries, colors.hits, colors.misses, colors.evictions
    );
    Ok(())
}
