//! Parsing of shell input lines.

use std::path::PathBuf;

use crate::error::CommandError;

/// One shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `add <priority-code> <patient-name>`. The label is checked by the queue.
    Add { severity: String, name: String },
    Peek,
    Next,
    List,
    Load(PathBuf),
    Help,
    Quit,
}

impl Command {
    /// Parses one line.
    ///
    /// Returns `Ok(None)` for blank lines. Words are separated by any run
    /// of whitespace; the patient name and file path keep their internal
    /// spacing.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_triage::triage::Command;
    ///
    /// let cmd = Command::parse("  add urgent  Sam Hamilton ").unwrap();
    /// assert_eq!(
    ///     cmd,
    ///     Some(Command::Add { severity: "urgent".into(), name: "Sam Hamilton".into() })
    /// );
    /// assert_eq!(Command::parse("   ").unwrap(), None);
    /// ```
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let (word, rest) = split_word(line);
        let cmd = match word {
            "" => return Ok(None),
            "add" => {
                let (severity, name) = split_word(rest);
                if severity.is_empty() {
                    return Err(CommandError::MissingSeverity);
                }
                if name.is_empty() {
                    return Err(CommandError::MissingName);
                }
                Command::Add {
                    severity: severity.to_string(),
                    name: name.to_string(),
                }
            }
            "peek" => Command::Peek,
            "next" => Command::Next,
            "list" => Command::List,
            "load" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingPath);
                }
                Command::Load(PathBuf::from(rest))
            }
            "help" => Command::Help,
            "quit" => Command::Quit,
            other => return Err(CommandError::UnknownCommand(other.to_string())),
        };
        Ok(Some(cmd))
    }
}

/// Splits off the first whitespace-delimited word; the remainder is trimmed.
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim();
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (s, ""),
    }
}

/// Usage text printed by `help`.
pub const HELP: &str = "\
add <priority-code> <patient-name>
            Adds the patient to the triage system.
            <priority-code> must be one of the 4 accepted priority codes:
                1. immediate 2. emergency 3. urgent 4. minimal
            <patient-name>: patient's full legal name (may contain spaces)
next        Announces the patient to be seen next. Takes into account the
            type of emergency and the patient's arrival order.
peek        Displays the patient that is next in line, but keeps in queue
list        Displays the list of all patients that are still waiting,
            in the queue's internal order (first row is seen next).
load <file> Reads the file and executes the command on each line
help        Displays this menu
quit        Exits the program
";
