pub mod backend;
pub mod config;

pub use backend::{create_router, initialize_backend, AppState};
pub use config::AppConfig;
