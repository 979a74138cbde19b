//! Session identity
//!
//! Monotonically increasing identifiers, unique for the process lifetime.
//! The generator is injected into whatever accepts connections rather than
//! living in a global.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifier of one connected session
///
/// Issued in a contiguous increasing sequence starting at 1. Displays as a
/// bare decimal, which is also how it prefixes chat lines on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(u64);

impl SessionId {
    /// Create a `SessionId` from a raw value
    #[inline]
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the inner value
    #[inline]
    #[must_use]
    pub const fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for SessionId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Issues session identifiers
///
/// The counter is the only piece of cross-task shared state outside the
/// broadcaster; the increment is the entire critical section.
#[derive(Debug, Default)]
pub struct SessionIdGenerator {
    counter: AtomicU64,
}

impl SessionIdGenerator {
    /// Create a generator whose first issued identifier is 1
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next identifier
    pub fn next_id(&self) -> SessionId {
        SessionId(self.counter.fetch_add(1, Ordering::SeqCst) + 1)
    }
}
