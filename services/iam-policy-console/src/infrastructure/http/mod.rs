//! 策略服务 HTTP 适配器

pub mod api_metrics;
pub mod client;
pub mod session;

pub use client::{PolicyApiClient, extract_detail};
pub use session::Session;
