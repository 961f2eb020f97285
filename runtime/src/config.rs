//! Controller configuration.

/// Configuration shared by the controllers.
///
/// # Example
///
/// ```
/// use taskstream_runtime::ControllerConfig;
///
/// let config = ControllerConfig::default().with_event_capacity(64);
/// assert_eq!(config.event_capacity(), 64);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ControllerConfig {
    /// Capacity of the one-shot broadcast channels (notifications and
    /// navigation intents). Increase if observers frequently lag.
    event_capacity: usize,
}

impl ControllerConfig {
    /// Default one-shot channel capacity.
    pub const DEFAULT_EVENT_CAPACITY: usize = 16;

    /// Create a configuration with the given event capacity.
    #[must_use]
    pub const fn new(event_capacity: usize) -> Self {
        Self { event_capacity }
    }

    /// Set the one-shot channel capacity.
    #[must_use]
    pub const fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    /// The configured one-shot channel capacity.
    #[must_use]
    pub const fn event_capacity(&self) -> usize {
        self.event_capacity
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_EVENT_CAPACITY)
    }
}
