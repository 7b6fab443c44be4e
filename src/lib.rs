pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{
    form::TextForm,
    http::HttpSolver,
    navigator::{Navigation, RecordingNavigator},
    storage::{FileStore, MemoryStore},
};
pub use config::{ClientSettings, TomlConfig};
pub use core::controller::ClientController;
pub use domain::model::Grid;
pub use utils::error::{Result, SudokuError};
