//! Optimistic concurrency expectations for store writes.

use crate::error::{DomainError, DomainResult};

/// Optimistic concurrency expectation for a write.
///
/// Record stores keep a monotonically increasing version per record type.
/// A writer reads the version before validating, then writes with
/// `Exact(version)`; any interleaved write makes the expectation stale.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExpectedVersion {
    /// Skip version checking (seeding, unconditional writes).
    Any,
    /// Require the store to be at an exact version.
    Exact(u64),
}

impl ExpectedVersion {
    pub fn matches(self, actual: u64) -> bool {
        match self {
            ExpectedVersion::Any => true,
            ExpectedVersion::Exact(v) => v == actual,
        }
    }

    pub fn check(self, actual: u64) -> DomainResult<()> {
        if self.matches(actual) {
            Ok(())
        } else {
            Err(DomainError::conflict(format!(
                "optimistic concurrency check failed (expected: {self:?}, actual: {actual})"
            )))
        }
    }
}
