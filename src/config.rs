use anyhow::{bail, Result};
use std::path::PathBuf;

use crate::cli::Cli;
use crate::environment::{Environment, Lighting};
use crate::switcher::TransitionSettings;
use crate::views::ViewCatalog;

pub const WINDOW_TITLE: &str = "Room Viewer";
pub const INITIAL_WINDOW_WIDTH: u32 = 1280;
pub const INITIAL_WINDOW_HEIGHT: u32 = 720;

/// Resolved viewer settings
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub model_path: PathBuf,
    pub catalog: ViewCatalog,
    pub transitions: TransitionSettings,
    pub environment: Environment,
    pub lighting: Lighting,
    pub show_ui: bool,
    pub debug_panel: bool,
}

impl ViewerConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        if !cli.transition_secs.is_finite() || cli.transition_secs < 0.0 {
            bail!("--transition-secs must be a non-negative number");
        }
        if !cli.exposure.is_finite() || cli.exposure <= 0.0 {
            bail!("--exposure must be positive");
        }

        let catalog = match &cli.views {
            Some(path) => ViewCatalog::load(path)?,
            None => ViewCatalog::default(),
        };

        Ok(Self {
            model_path: cli.model.clone(),
            catalog,
            transitions: TransitionSettings {
                duration: cli.transition_secs,
                ..TransitionSettings::default()
            },
            environment: Environment {
                hdri: cli.hdri.clone(),
                exposure: cli.exposure,
                tone_mapping: cli.hdri.is_some(),
                ..Environment::default()
            },
            lighting: Lighting::default(),
            show_ui: !cli.no_ui,
            debug_panel: cli.debug && !cli.no_ui,
        })
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("model/scene.gltf"),
            catalog: ViewCatalog::default(),
            transitions: TransitionSettings::default(),
            environment: Environment::default(),
            lighting: Lighting::default(),
            show_ui: true,
            debug_panel: false,
        }
    }
}
