//! IAM Policy Console Library
//!
//! 策略编写控制台：
//! - `domain`: 策略模型、语法高亮分词器、本地结构校验
//! - `application`: 编辑器状态机与列表视图编排
//! - `infrastructure`: 策略服务 HTTP 客户端、终端交互、会话与文件存储

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
