//! Instance numbering
//!
//! Each board sits on its own I2C port, and the host has two. [`Registry`]
//! hands out an [`InstanceId`] per driver in construction order. Ids past
//! [`MAX_INSTANCES`] are still issued, but
//! [`Display::begin`](crate::Display::begin) refuses them without touching
//! the bus.
//!
//! The registry is a plain value owned by the application; keep one per
//! process and pass it to wherever drivers are created.
//!
//! ## Example
//!
//! ```
//! use projecta::Registry;
//!
//! let mut registry = Registry::new();
//! let first = registry.next_id();
//! let second = registry.next_id();
//! let third = registry.next_id();
//!
//! assert_eq!(first.get(), 1);
//! assert!(second.is_within_limit());
//! assert!(!third.is_within_limit());
//! ```

use crate::protocol::MAX_INSTANCES;

/// Ordinal of a driver instance, starting at 1
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstanceId(u8);

impl InstanceId {
    /// Ordinal value
    pub fn get(self) -> u8 {
        self.0
    }

    /// Whether this instance may use a bus port
    pub fn is_within_limit(self) -> bool {
        (1..=MAX_INSTANCES).contains(&self.0)
    }
}

impl core::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues instance ids in construction order
#[derive(Debug, Default)]
pub struct Registry {
    issued: u8,
}

impl Registry {
    /// Create a registry that has issued nothing
    pub const fn new() -> Self {
        Self { issued: 0 }
    }

    /// Issue the next id
    ///
    /// Saturates at 255; such ids are never within the limit.
    pub fn next_id(&mut self) -> InstanceId {
        self.issued = self.issued.saturating_add(1);
        InstanceId(self.issued)
    }

    /// Number of ids issued so far
    pub fn issued(&self) -> u8 {
        self.issued
    }
}
