//! Queue configuration.

/// Configuration for [`PatientQueue`](super::PatientQueue).
///
/// # Examples
///
/// ```
/// use u_triage::queue::{PatientQueue, QueueConfig};
///
/// let config = QueueConfig::default().with_initial_capacity(64);
/// assert!(config.validate().is_ok());
/// let queue = PatientQueue::with_config(&config);
/// assert!(queue.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// Slots reserved in the backing vector up front.
    pub initial_capacity: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 16,
        }
    }
}

impl QueueConfig {
    pub fn with_initial_capacity(mut self, n: usize) -> Self {
        self.initial_capacity = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.initial_capacity > isize::MAX as usize / std::mem::size_of::<super::Entry>() {
            return Err(format!(
                "initial_capacity too large: {}",
                self.initial_capacity
            ));
        }
        Ok(())
    }
}
