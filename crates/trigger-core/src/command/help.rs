use crate::models::CommandMode;

const EXPLICIT_COMMANDS: [&str; 9] = [
    "n [title]    - Creates and starts a new timer.",
    "e[n][title]  - Edits the title of the nth timer.",
    "a[n][time]   - Adds time (e.g. 1h5m30s) to the nth timer.",
    "s[n][time]   - Subtracts time from the nth timer.",
    "p[n]         - Pauses/starts the nth timer.",
    "r[n]         - Resets the nth timer.",
    "d[n]         - Deletes the nth timer.",
    "q            - Quits the program.",
    "h            - Shows this help screen.",
];

const IMPLICIT_COMMANDS: [&str; 10] = [
    "n    - Creates and starts a new timer.",
    "e    - Edits the title of the selected timer.",
    "a    - Adds time (e.g. 1h5m30s) to the selected timer.",
    "s    - Subtracts time from the selected timer.",
    "p    - Pauses/starts the selected timer.",
    "r    - Resets the selected timer.",
    "d    - Deletes the selected timer.",
    "j/k  - Moves the selection down/up.",
    "q    - Quits the program.",
    "h    - Shows this help screen.",
];

/// Lines of the help overlay for `mode`.
pub fn help_lines(mode: CommandMode) -> Vec<String> {
    let intro: &[&str] = match mode {
        CommandMode::Explicit => &[
            "On the main screen, type \":\" to bring up the command window.",
            "Omit [n] to act on the highlighted timer (j/k to move).",
        ],
        CommandMode::Implicit => &["Keys act on the highlighted timer."],
    };
    let commands: &[&str] = match mode {
        CommandMode::Explicit => &EXPLICIT_COMMANDS,
        CommandMode::Implicit => &IMPLICIT_COMMANDS,
    };

    let mut lines = vec![
        "Help".to_string(),
        "----".to_string(),
        String::new(),
        "Commands".to_string(),
    ];
    lines.extend(intro.iter().map(|s| s.to_string()));
    lines.push(String::new());
    lines.extend(commands.iter().map(|s| s.to_string()));
    lines.push(String::new());
    lines.push("Reset, delete and quit ask for confirmation (y/N).".to_string());
    lines.push("To return to the main screen, type \"q\".".to_string());
    lines
}
