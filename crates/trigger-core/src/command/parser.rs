//! Command-line grammar: `letter [digits] [whitespace] remainder`

use crate::duration::parse_duration;
use crate::{Error, Result};

/// A parsed command. `index` is 1-based; `None` means the selected timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    New { title: String },
    Rename { index: Option<usize>, title: String },
    AddTime { index: Option<usize>, seconds: u64 },
    SubtractTime { index: Option<usize>, seconds: u64 },
    Toggle { index: Option<usize> },
    Reset { index: Option<usize> },
    Delete { index: Option<usize> },
    Help,
    Quit,
}

impl Command {
    /// Short name used to prefix error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Command::New { .. } => "New",
            Command::Rename { .. } => "Edit",
            Command::AddTime { .. } => "Add",
            Command::SubtractTime { .. } => "Subtract",
            Command::Toggle { .. } => "Pause",
            Command::Reset { .. } => "Reset",
            Command::Delete { .. } => "Delete",
            Command::Help => "Help",
            Command::Quit => "Quit",
        }
    }

    /// Destructive commands are confirmed before they run.
    pub fn needs_confirmation(&self) -> bool {
        matches!(
            self,
            Command::Reset { .. } | Command::Delete { .. } | Command::Quit
        )
    }

    /// The timer this command targets, if it targets one.
    pub fn target(&self) -> Option<Option<usize>> {
        match self {
            Command::Rename { index, .. }
            | Command::AddTime { index, .. }
            | Command::SubtractTime { index, .. }
            | Command::Toggle { index }
            | Command::Reset { index }
            | Command::Delete { index } => Some(*index),
            Command::New { .. } | Command::Help | Command::Quit => None,
        }
    }

    /// Same command aimed at the resolved 1-based `index`.
    pub fn with_index(self, resolved: usize) -> Self {
        let index = Some(resolved);
        match self {
            Command::Rename { title, .. } => Command::Rename { index, title },
            Command::AddTime { seconds, .. } => Command::AddTime { index, seconds },
            Command::SubtractTime { seconds, .. } => Command::SubtractTime { index, seconds },
            Command::Toggle { .. } => Command::Toggle { index },
            Command::Reset { .. } => Command::Reset { index },
            Command::Delete { .. } => Command::Delete { index },
            other => other,
        }
    }
}

/// Parse one command line such as `e2Lunch break` or `a1 1h5m`.
pub fn parse_command(line: &str) -> Result<Command> {
    let line = line.trim_start();
    let mut chars = line.chars();
    let Some(letter) = chars.next() else {
        return Err(Error::EmptyCommand);
    };
    let rest = chars.as_str();

    if letter == 'n' {
        return Ok(Command::New {
            title: rest.trim().to_string(),
        });
    }

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let (digits, remainder) = rest.split_at(digits_end);
    let remainder = remainder.trim_start();

    let index = if digits.is_empty() {
        None
    } else {
        Some(
            digits
                .parse::<usize>()
                .map_err(|_| Error::InvalidIndex(digits.to_string()))?,
        )
    };

    let no_remainder = |index: Option<usize>| -> Result<Option<usize>> {
        let trailing = remainder.trim_end();
        if trailing.is_empty() {
            Ok(index)
        } else {
            Err(Error::InvalidIndex(trailing.to_string()))
        }
    };

    match letter {
        'e' => Ok(Command::Rename {
            index,
            title: remainder.to_string(),
        }),
        'a' => Ok(Command::AddTime {
            index,
            seconds: parse_duration(remainder),
        }),
        's' => Ok(Command::SubtractTime {
            index,
            seconds: parse_duration(remainder),
        }),
        'p' => Ok(Command::Toggle {
            index: no_remainder(index)?,
        }),
        'r' => Ok(Command::Reset {
            index: no_remainder(index)?,
        }),
        'd' => Ok(Command::Delete {
            index: no_remainder(index)?,
        }),
        'h' => Ok(Command::Help),
        'q' => Ok(Command::Quit),
        other => Err(Error::UnrecognizedCommand(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_new() {
        assert_eq!(
            parse_command("n Lunch").unwrap(),
            Command::New {
                title: "Lunch".to_string()
            }
        );
        assert_eq!(
            parse_command("nLunch").unwrap(),
            Command::New {
                title: "Lunch".to_string()
            }
        );
        assert_eq!(
            parse_command("n").unwrap(),
            Command::New {
                title: String::new()
            }
        );
    }

    #[test]
    fn test_parse_rename_with_index() {
        assert_eq!(
            parse_command("e2Lunch break").unwrap(),
            Command::Rename {
                index: Some(2),
                title: "Lunch break".to_string()
            }
        );
        assert_eq!(
            parse_command("e12 Coffee").unwrap(),
            Command::Rename {
                index: Some(12),
                title: "Coffee".to_string()
            }
        );
        assert_eq!(
            parse_command("e Coffee").unwrap(),
            Command::Rename {
                index: None,
                title: "Coffee".to_string()
            }
        );
    }

    #[test]
    fn test_parse_durations() {
        assert_eq!(
            parse_command("a1 1h5m").unwrap(),
            Command::AddTime {
                index: Some(1),
                seconds: 3900
            }
        );
        assert_eq!(
            parse_command("s3 5m").unwrap(),
            Command::SubtractTime {
                index: Some(3),
                seconds: 300
            }
        );
        assert_eq!(
            parse_command("a 32e9p").unwrap(),
            Command::AddTime {
                index: None,
                seconds: 0
            }
        );
    }

    #[test]
    fn test_parse_indexed_actions() {
        assert_eq!(
            parse_command("p2").unwrap(),
            Command::Toggle { index: Some(2) }
        );
        assert_eq!(parse_command("r").unwrap(), Command::Reset { index: None });
        assert_eq!(
            parse_command("d3 ").unwrap(),
            Command::Delete { index: None }.with_index(3)
        );
        assert_eq!(parse_command("h").unwrap(), Command::Help);
        assert_eq!(parse_command("q").unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_command(""), Err(Error::EmptyCommand)));
        assert!(matches!(parse_command("   "), Err(Error::EmptyCommand)));
        assert!(matches!(
            parse_command("x1"),
            Err(Error::UnrecognizedCommand(c)) if c == "x"
        ));
        assert!(matches!(
            parse_command("px"),
            Err(Error::InvalidIndex(s)) if s == "x"
        ));
        assert!(matches!(
            parse_command("r99999999999999999999999999"),
            Err(Error::InvalidIndex(_))
        ));
    }

    #[test]
    fn test_confirmation_and_targets() {
        assert!(Command::Quit.needs_confirmation());
        assert!(Command::Reset { index: None }.needs_confirmation());
        assert!(!Command::Toggle { index: None }.needs_confirmation());

        assert_eq!(Command::Help.target(), None);
        assert_eq!(Command::Toggle { index: Some(4) }.target(), Some(Some(4)));
        assert_eq!(
            Command::Toggle { index: None }.with_index(2),
            Command::Toggle { index: Some(2) }
        );
    }
}
