//! Application 应用层

pub mod console;
pub mod editor;
pub mod list;
pub mod session;

pub use console::PolicyConsole;
pub use editor::{ConsoleView, EditorSession};
pub use list::PolicyListView;
