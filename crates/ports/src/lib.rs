//! ports - 抽象 trait 层
//!
//! 定义控制台与外部协作者之间的抽象接口：通知通道、确认对话框、会话令牌存储

mod confirmation;
mod notification;
mod session_store;

pub use confirmation::*;
pub use notification::*;
pub use session_store::*;
