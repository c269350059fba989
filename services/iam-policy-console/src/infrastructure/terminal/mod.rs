//! 终端适配器

pub mod confirmer;
pub mod highlight;
pub mod notifier;

pub use confirmer::TerminalConfirmer;
pub use highlight::{render, token_listing};
pub use notifier::TerminalNotifier;
