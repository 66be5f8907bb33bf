mod commands;
mod output;

pub use commands::{Cli, Commands, ConfigAction, OutputFormat};
pub use output::*;
