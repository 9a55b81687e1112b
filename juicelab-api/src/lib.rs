pub mod config;
pub mod handlers;

pub use handlers::AppState;
