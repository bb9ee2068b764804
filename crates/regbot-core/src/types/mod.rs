//! Type definitions for regbot

mod category;
mod runtime_config;
mod submission;

pub use category::*;
pub use runtime_config::*;
pub use submission::*;
