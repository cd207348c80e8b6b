pub mod help;
pub mod interpreter;
pub mod parser;

pub use crate::models::CommandMode;
pub use help::help_lines;
pub use interpreter::{Key, Prompt, Session, State};
pub use parser::{parse_command, Command};
