//! Command execution and rendering.

use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

use tracing::{debug, info, warn};

use super::command::{Command, HELP};
use super::config::SessionConfig;
use crate::error::{QueueError, SessionError};
use crate::queue::PatientQueue;

/// Whether the shell should keep reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

const NO_PATIENTS: &str = "There are no patients in the waiting area.";

/// A triage shell bound to one queue.
///
/// # Examples
///
/// ```
/// use u_triage::triage::{Flow, Session, SessionConfig};
///
/// let mut session = Session::new(SessionConfig::default());
/// let mut out = Vec::new();
/// session.process_line("add urgent Ana Ruiz", &mut out).unwrap();
/// session.process_line("add immediate Bo Chen", &mut out).unwrap();
/// assert_eq!(session.process_line("quit", &mut out).unwrap(), Flow::Quit);
///
/// assert_eq!(session.queue().peek().unwrap(), "Bo Chen");
/// ```
#[derive(Debug)]
pub struct Session {
    queue: PatientQueue,
    config: SessionConfig,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            queue: PatientQueue::with_config(&config.queue),
            config,
        }
    }

    pub fn queue(&self) -> &PatientQueue {
        &self.queue
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Reads commands from `input` until end of input or `quit`, printing
    /// the prompt before each one.
    ///
    /// A line that is not valid UTF-8 is reported and skipped; only a failing
    /// reader or writer ends the loop with an error.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> Result<(), SessionError> {
        let mut buf = Vec::new();
        loop {
            write!(out, "{}", self.config.prompt)?;
            out.flush()?;

            buf.clear();
            if input.read_until(b'\n', &mut buf).map_err(SessionError::Input)? == 0 {
                writeln!(out)?;
                break;
            }
            let raw = buf.strip_suffix(b"\n").unwrap_or(&buf[..]);
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            let line = match std::str::from_utf8(raw) {
                Ok(line) => line,
                Err(e) => {
                    warn!(error = %e, "skipping input line that is not valid UTF-8");
                    writeln!(out, "Error: input line is not valid UTF-8, skipping")?;
                    continue;
                }
            };
            if self.process_line(line, out)? == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    /// Executes one line of input and writes its result to `out`.
    pub fn process_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow, SessionError> {
        self.process_at_depth(line, out, 0)
    }

    /// Replays every line of the file at `path`.
    pub fn load<W: Write>(&mut self, path: &Path, out: &mut W) -> Result<(), SessionError> {
        self.load_at_depth(path, out, 0)
    }

    fn process_at_depth<W: Write>(
        &mut self,
        line: &str,
        out: &mut W,
        depth: usize,
    ) -> Result<Flow, SessionError> {
        let command = match Command::parse(line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => return Ok(Flow::Continue),
            Err(e) => {
                debug!(line, error = %e, "rejected input line");
                writeln!(out, "Error: {e}")?;
                return Ok(Flow::Continue);
            }
        };

        match command {
            Command::Add { severity, name } => self.add(&severity, &name, out)?,
            Command::Peek => match self.queue.peek() {
                Ok(name) => writeln!(out, "Highest priority patient to be called next: {name}")?,
                Err(_) => writeln!(out, "{NO_PATIENTS}")?,
            },
            Command::Next => match self.queue.extract() {
                Ok(name) => writeln!(out, "This patient will now be seen: {name}")?,
                Err(_) => writeln!(out, "{NO_PATIENTS}")?,
            },
            Command::List => self.list(out)?,
            Command::Load(path) => self.load_at_depth(&path, out, depth)?,
            Command::Help => write!(out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn add<W: Write>(&mut self, severity: &str, name: &str, out: &mut W) -> Result<(), SessionError> {
        match self.queue.admit_labeled(severity, name) {
            Ok(sequence) => writeln!(
                out,
                "Added patient \"{}\" to the priority system (arrival #{sequence})",
                name.trim()
            )?,
            Err(e @ QueueError::InvalidSeverity(_)) => {
                writeln!(out, "Error: {e}, please re-enter")?
            }
            Err(e) => writeln!(out, "Error: {e}")?,
        }
        Ok(())
    }

    fn list<W: Write>(&self, out: &mut W) -> Result<(), SessionError> {
        writeln!(out, "# patients waiting: {}", self.queue.len())?;
        writeln!(out, "  Arrival #   Priority Code   Patient Name")?;
        writeln!(out, "+-----------+---------------+--------------+")?;
        for row in self.queue.snapshot() {
            writeln!(out, "{:>10}   {:<15} {}", row.sequence, row.label(), row.name)?;
        }
        if self.queue.is_empty() {
            writeln!(out, "{NO_PATIENTS}")?;
        }
        Ok(())
    }

    fn load_at_depth<W: Write>(
        &mut self,
        path: &Path,
        out: &mut W,
        depth: usize,
    ) -> Result<(), SessionError> {
        if depth >= self.config.max_load_depth {
            warn!(path = %path.display(), depth, "refusing nested load");
            writeln!(
                out,
                "Error: load nested too deeply (limit {}), skipping {}",
                self.config.max_load_depth,
                path.display()
            )?;
            return Ok(());
        }

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read command file");
                writeln!(out, "Error: could not open file {}: {e}", path.display())?;
                return Ok(());
            }
        };

        info!(path = %path.display(), depth, "replaying command file");
        let mut replayed = 0usize;
        for line in contents.lines() {
            if self.config.echo_replayed {
                writeln!(out, "{}{line}", self.config.prompt)?;
            }
            if self.process_at_depth(line, out, depth + 1)? == Flow::Quit {
                debug!(path = %path.display(), "quit inside command file ignored");
            }
            replayed += 1;
        }
        info!(path = %path.display(), lines = replayed, "finished command file");
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
