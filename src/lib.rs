//! Core engine for weekly meal plans: the diet aggregate store, the food
//! catalog reader and the nutritional aggregation queries built on top of
//! them. Transport, authentication and catalog ingestion live outside this
//! crate; callers hand in an already-resolved owner id (and sex, where the
//! reference-intake comparison needs it) and get plain data back.

pub mod catalog;
pub mod config;
pub mod db;
pub mod diets;
pub mod error;
pub mod numeric;
pub mod nutrition;
pub mod state;
pub mod targets;

pub use error::{AppError, AppResult};
pub use state::AppState;
