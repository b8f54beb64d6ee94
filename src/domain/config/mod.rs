//! Configuration domain module

mod app_config;
mod provider;

pub use app_config::AppConfig;
pub use provider::Provider;
