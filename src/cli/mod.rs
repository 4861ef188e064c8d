//! 交互式命令行
//!
//! 命令解析、会话状态、结果打印和 Tab 补全

pub mod commands;
pub mod completer;
pub mod printer;

pub use commands::{execute_command, CommandResult, Session};
pub use completer::CommandCompleter;
