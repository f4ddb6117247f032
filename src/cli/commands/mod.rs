pub mod check;
mod command_result;
mod context;
pub mod init;
pub mod show;

pub use command_result::*;
pub use context::CommandContext;
