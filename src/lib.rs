pub mod app;
pub mod camera;
pub mod cli;
pub mod config;
pub mod environment;
pub mod frame;
pub mod input;
pub mod loaders;
pub mod math;
pub mod orbit;
pub mod renderer;
pub mod switcher;
pub mod tween;
pub mod types;
pub mod ui;
pub mod views;

pub use camera::PerspectiveCamera;
pub use orbit::OrbitControls;
pub use switcher::{TransitionSettings, ViewSwitcher};
pub use tween::{Easing, Tween};
pub use views::{View, ViewCatalog};
