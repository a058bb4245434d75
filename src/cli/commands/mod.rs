pub mod analyze;
mod command_result;
pub mod export;
pub mod helper;
pub mod validate;

pub use command_result::*;
