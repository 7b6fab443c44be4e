pub mod controller;

pub use crate::domain::model::Grid;
pub use crate::domain::ports::{GridForm, Navigator, SessionStore, SolverService};
pub use crate::utils::error::Result;
