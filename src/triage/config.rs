//! Shell session configuration.

use crate::queue::QueueConfig;

/// Configuration for a [`Session`](super::Session).
///
/// # Examples
///
/// ```
/// use u_triage::triage::SessionConfig;
///
/// let config = SessionConfig::default()
///     .with_prompt("er> ")
///     .with_echo_replayed(false)
///     .with_max_load_depth(2);
/// assert_eq!(config.prompt, "er> ");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Prompt shown by the interactive shell and before echoed file lines.
    pub prompt: String,
    /// Whether lines replayed by `load` are echoed with the prompt.
    pub echo_replayed: bool,
    /// How many `load` commands may be nested inside loaded files.
    /// A file that loads itself stops here instead of looping.
    pub max_load_depth: usize,
    /// Configuration of the underlying queue.
    pub queue: QueueConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            prompt: "triage> ".to_string(),
            echo_replayed: true,
            max_load_depth: 8,
            queue: QueueConfig::default(),
        }
    }
}

impl SessionConfig {
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn with_echo_replayed(mut self, echo: bool) -> Self {
        self.echo_replayed = echo;
        self
    }

    pub fn with_max_load_depth(mut self, depth: usize) -> Self {
        self.max_load_depth = depth;
        self
    }

    pub fn with_queue(mut self, queue: QueueConfig) -> Self {
        self.queue = queue;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_load_depth == 0 {
            return Err("max_load_depth must be at least 1".into());
        }
        if self.prompt.contains('\n') {
            return Err("prompt must be a single line".into());
        }
        self.queue.validate()
    }
}
