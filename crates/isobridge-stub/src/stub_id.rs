//! Stub id allocation.
//!
//! Every synthesized stub installs one synthetic file into the host loader's
//! flat namespace, so ids must never repeat within a process. A [`StubIds`]
//! counter is owned by a synthesizer and can be shared through `Arc` between
//! synthesizers; an optional prefix keeps ids from different processes apart.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic, thread-safe stub id counter.
#[derive(Debug, Default)]
pub struct StubIds {
    next: AtomicU64,
    prefix: Option<String>,
}

impl StubIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter whose ids carry `prefix`, e.g. a worker number.
    ///
    /// Characters that cannot appear in a JavaScript identifier are replaced
    /// with `_`.
    pub fn with_prefix(prefix: &str) -> Self {
        let prefix: String = prefix
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '$' { c } else { '_' })
            .collect();
        Self {
            next: AtomicU64::new(0),
            prefix: (!prefix.is_empty()).then_some(prefix),
        }
    }

    /// Take the next id.
    pub fn allocate(&self) -> StubId {
        StubId {
            prefix: self.prefix.clone(),
            sequence: self.next.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Number of ids handed out so far.
    pub fn allocated(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

/// One allocated stub id. Displays as `7` or `<prefix>_7`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StubId {
    prefix: Option<String>,
    sequence: u64,
}

impl StubId {
    /// Position in the allocating counter's sequence.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }
}

impl fmt::Display for StubId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.prefix {
            Some(prefix) => write!(f, "{prefix}_{}", self.sequence),
            None => write!(f, "{}", self.sequence),
        }
    }
}
