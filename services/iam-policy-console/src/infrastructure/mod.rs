//! Infrastructure 基础设施层

pub mod files;
pub mod http;
pub mod session_store;
pub mod terminal;

pub use http::PolicyApiClient;
pub use session_store::FileSessionStore;
