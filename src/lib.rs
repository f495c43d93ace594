pub mod api;
pub mod config;
pub mod error;
pub mod excel_export;
pub mod fallback;
pub mod http_client;
pub mod leagues;
pub mod provider;
pub mod standings_fetch;
pub mod state;
