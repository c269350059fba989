//! 策略编辑器

pub mod session;
pub mod state;

pub use session::{EditorSession, SaveRequest, TestRequest, send_save};
pub use state::ConsoleView;
