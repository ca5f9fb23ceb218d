//! Driver configuration types and builder

pub use crate::buttons::TransitionPolicy;
pub use crate::error::BuilderError;
use crate::protocol::DEFAULT_POLL_READS;

/// Largest number of keypad reads allowed per cycle
pub const MAX_POLL_READS: u8 = 16;

/// Driver configuration
///
/// Use `Builder` to create a Config, or `Config::default()` for the stock
/// board behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Keypad reads per cycle
    pub poll_reads: u8,
    /// Handling of simultaneous button changes
    pub transition_policy: TransitionPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll_reads: DEFAULT_POLL_READS,
            transition_policy: TransitionPolicy::DropSimultaneous,
        }
    }
}

/// Builder for constructing driver configuration
///
/// # Example
///
/// ```rust,no_run
/// use projecta::{Builder, TransitionPolicy};
///
/// let config = match Builder::new()
///     .poll_reads(3)
///     .transition_policy(TransitionPolicy::ReportAll)
///     .build()
/// {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// let _ = config;
/// ```
#[must_use]
#[derive(Default)]
pub struct Builder {
    config: Config,
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of keypad reads per cycle
    ///
    /// Reading several times per cycle makes it less likely that a short
    /// press falls between two cycles. Default is 5.
    pub fn poll_reads(mut self, reads: u8) -> Self {
        self.config.poll_reads = reads;
        self
    }

    /// Set how simultaneous button changes are handled
    pub fn transition_policy(mut self, policy: TransitionPolicy) -> Self {
        self.config.transition_policy = policy;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidPollReads` if the poll read count is 0 or
    /// above [`MAX_POLL_READS`]
    pub fn build(self) -> Result<Config, BuilderError> {
        let reads = self.config.poll_reads;
        if reads == 0 || reads > MAX_POLL_READS {
            return Err(BuilderError::InvalidPollReads { reads });
        }
        Ok(self.config)
    }
}
