use clap::Parser;
use std::path::PathBuf;

use wavescope::audio::spectral::WindowKind;

#[derive(Parser, Debug)]
#[command(name = "wavescope", about = "Export waveform, overview and spectrum geometry for a WAV file")]
pub struct Cli {
    /// Input audio file (WAV)
    pub input: Option<PathBuf>,

    /// Output JSON file
    #[arg(short, long, default_value = "graphs.json")]
    pub output: PathBuf,

    /// Config file (defaults to wavescope.toml, then the user config dir)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Window width in pixels
    #[arg(long, default_value_t = 1920)]
    pub width: u32,

    /// Window height in pixels
    #[arg(long, default_value_t = 1080)]
    pub height: u32,

    /// Margin around the graph area in pixels
    #[arg(long, default_value_t = 50.0)]
    pub margin: f32,

    /// Playback frame to export
    #[arg(long, conflicts_with = "time")]
    pub frame: Option<usize>,

    /// Playback position in seconds to export
    #[arg(long)]
    pub time: Option<f64>,

    /// Export this many consecutive display ticks starting at --frame/--time
    #[arg(long)]
    pub ticks: Option<usize>,

    /// Display ticks per second when exporting a sequence
    #[arg(long, default_value_t = 30)]
    pub fps: u32,

    /// Overview entries per second of audio
    #[arg(long, default_value_t = 100)]
    pub overview_rate: u32,

    /// Instant graph refresh rate; the slice spans sample_rate / rate frames
    #[arg(long, default_value_t = 20)]
    pub instant_rate: u32,

    /// Spectral window size (power of two)
    #[arg(long, default_value_t = 1024)]
    pub fft_size: usize,

    /// Spectral frames kept in the scrolling view (0 disables it)
    #[arg(long, default_value_t = 10)]
    pub spectral_windows: usize,

    /// Channel drawn by the instant and spectral graphs
    #[arg(long, default_value_t = 0)]
    pub channel: usize,

    /// Window applied before each FFT
    #[arg(long, value_enum, default_value_t = WindowKind::Rectangular)]
    pub window: WindowKind,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}
