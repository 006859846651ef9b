pub mod app;
pub mod config;
pub mod document;
pub mod errors;
pub mod export;
pub mod fields;
pub mod format;
pub mod handlers;
pub mod ledger;
pub mod models;
pub mod render;
pub mod state;
pub mod ui;
pub mod variant;

pub use app::router;
pub use config::ServerConfig;
pub use state::AppState;
