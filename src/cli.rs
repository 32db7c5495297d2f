// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "room-viewer")]
#[command(about = "Interior model viewer with animated camera views", long_about = None)]
pub struct Cli {
    /// glTF scene to display
    #[arg(long, default_value = "model/scene.gltf")]
    pub model: PathBuf,

    /// JSON file with camera views; the built-in interior views are used when omitted
    #[arg(long)]
    pub views: Option<PathBuf>,

    /// Equirectangular environment image (path or http(s) URL)
    #[arg(long)]
    pub hdri: Option<String>,

    /// Show the camera tuning panel
    #[arg(long, default_value = "false")]
    pub debug: bool,

    /// Disable UI elements
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// Duration of a view transition in seconds
    #[arg(long, default_value_t = 2.0)]
    pub transition_secs: f32,

    /// Tone-mapping exposure
    #[arg(long, default_value_t = 1.0)]
    pub exposure: f32,
}
