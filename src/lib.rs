pub mod camera;
pub mod cli;
pub mod config;
pub mod controller;
pub mod coordinator;
pub mod core;
pub mod frame;
pub mod gallery;
pub mod idle;
pub mod loaders;
pub mod loading;
pub mod math;
pub mod page;
pub mod scenes;
pub mod scroll;
pub mod traits;
pub mod transform;
pub mod types;

pub use config::SceneConfig;
pub use controller::{ControllerError, SceneController};
pub use loading::{LoadingScreen, LoadingSignal, LoadingState};
pub use page::Page;
