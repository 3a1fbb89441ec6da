mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use cli::Cli;
use wavescope::audio::decode::decode_audio;
use wavescope::audio::spectral::WindowKind;
use wavescope::config::{self, AnalysisConfig, LayoutConfig};
use wavescope::graph::position::PlaybackInfo;
use wavescope::{GraphSet, Rect, Visualizer};

#[derive(Serialize)]
struct Export {
    info: PlaybackInfo,
    ticks: Vec<GraphSet>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut cli = Cli::parse();

    // Load config: explicit --config path, or auto-detect wavescope.toml / global config
    let config_path = cli.config.clone().or_else(|| {
        let local = PathBuf::from("wavescope.toml");
        if local.exists() {
            return Some(local);
        }
        if let Some(home) = dirs::home_dir() {
            let xdg = home.join(".config").join("wavescope").join("config.toml");
            if xdg.exists() {
                return Some(xdg);
            }
        }
        if let Some(config_dir) = dirs::config_dir() {
            let platform = config_dir.join("wavescope").join("config.toml");
            if platform.exists() {
                return Some(platform);
            }
        }
        None
    });
    if let Some(ref path) = config_path {
        if let Some(cfg) = config::load_config(path) {
            log::info!("Loaded config from {}", path.display());
            // Merge: config values apply only when CLI is at its default
            if cli.overview_rate == 100 { cli.overview_rate = cfg.analysis.overview_rate; }
            if cli.instant_rate == 20 { cli.instant_rate = cfg.analysis.instant_display_rate; }
            if cli.fft_size == 1024 { cli.fft_size = cfg.analysis.fft_size; }
            if cli.spectral_windows == 10 { cli.spectral_windows = cfg.analysis.spectral_window_count; }
            if cli.channel == 0 { cli.channel = cfg.analysis.channel; }
            if cli.window == WindowKind::Rectangular { cli.window = cfg.analysis.window; }
            if cli.margin == 50.0 { cli.margin = cfg.layout.margin; }
        } else {
            log::warn!("Failed to load config from {}", path.display());
        }
    }

    let input = cli.input.as_ref().context("Input audio file is required")?;
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }
    if cli.fps == 0 {
        anyhow::bail!("--fps must be non-zero");
    }

    log::info!("wavescope - audio graph geometry export");
    log::info!("Input: {}", input.display());
    log::info!("Output: {}", cli.output.display());
    log::info!("Window: {}x{} (margin {})", cli.width, cli.height, cli.margin);

    let analysis_config = AnalysisConfig {
        overview_rate: cli.overview_rate,
        instant_display_rate: cli.instant_rate,
        fft_size: cli.fft_size,
        spectral_window_count: cli.spectral_windows,
        channel: cli.channel,
        window: cli.window,
    };
    let layout_config = LayoutConfig { margin: cli.margin };
    let window = Rect::from_size(cli.width as f32, cli.height as f32);
    let visualizer = Visualizer::new(analysis_config, &layout_config, window)
        .context("Invalid analysis settings")?;

    // 1. Decode audio
    log::info!("Decoding audio...");
    let buffer = Arc::new(decode_audio(input)?);
    let sample_rate = buffer.sample_rate();

    // 2. Load-time analysis
    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Analyzing audio...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    let analysis = visualizer.load(buffer).context("Audio analysis failed")?;
    spinner.finish_and_clear();

    // 3. Resolve the playback position(s) to export
    let start_frame = match (cli.frame, cli.time) {
        (Some(frame), _) => frame,
        (None, Some(secs)) => (secs.max(0.0) * sample_rate as f64) as usize,
        (None, None) => 0,
    };
    let tick_count = cli.ticks.unwrap_or(1);
    let frames_per_tick = (sample_rate / cli.fps).max(1) as usize;

    let pb = ProgressBar::new(tick_count as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} ticks ({eta} remaining)")?
            .progress_chars("=>-"),
    );

    let mut ticks = Vec::with_capacity(tick_count);
    for i in 0..tick_count {
        let frame = start_frame.saturating_add(i * frames_per_tick);
        ticks.push(visualizer.tick(frame)?);
        pb.set_position(i as u64 + 1);
    }
    pb.finish_with_message("Export complete");

    let last_frame = ticks.last().map_or(start_frame, |t| t.frame);
    let info = analysis.info(last_frame, tick_count > 1);
    for line in info.to_string().lines() {
        log::info!("{}", line);
    }

    // 4. Write JSON
    let file = File::create(&cli.output)
        .with_context(|| format!("Failed to create output file: {}", cli.output.display()))?;
    let writer = BufWriter::new(file);
    let export = Export { info, ticks };
    if cli.pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .context("Failed to write graph JSON")?;

    log::info!("Done! Output: {}", cli.output.display());
    Ok(())
}
