pub mod admin;
pub mod config;
pub mod error;
pub mod feedback;
pub mod service;
pub mod store;

pub use config::AppConfig;
pub use confessions_types::{Confession, ConfessionId};
pub use error::{AppError, AppResult};
pub use service::ConfessionsService;
