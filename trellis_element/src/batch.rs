// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render coalescing.

/// The pending flag that coalesces render requests.
///
/// Only the request that arms the flag defers a render task; every request
/// made while it is armed rides along with that task. The task disarms the
/// flag before rendering, so a write made during or after the render arms it
/// again.
///
/// ```rust
/// use trellis_element::RenderBatch;
///
/// let mut batch = RenderBatch::new();
/// assert!(batch.arm());
/// assert!(!batch.arm());
/// assert!(!batch.arm());
///
/// // The deferred task runs once.
/// assert!(batch.take());
/// assert!(!batch.take());
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderBatch {
    pending: bool,
}

impl RenderBatch {
    /// Creates a disarmed batch.
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: false }
    }

    /// Arms the flag.
    ///
    /// Returns `true` if the caller must defer a render task, `false` if one
    /// is already pending.
    #[must_use]
    pub fn arm(&mut self) -> bool {
        !core::mem::replace(&mut self.pending, true)
    }

    /// Disarms the flag, returning whether it was armed.
    pub fn take(&mut self) -> bool {
        core::mem::replace(&mut self.pending, false)
    }

    /// Returns `true` while a render is pending.
    #[must_use]
    #[inline]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rearms_after_take() {
        let mut batch = RenderBatch::new();
        assert!(batch.arm());
        assert!(batch.is_pending());
        assert!(batch.take());
        assert!(!batch.is_pending());
        assert!(batch.arm());
    }

    #[test]
    fn take_without_arm_is_noop() {
        let mut batch = RenderBatch::new();
        assert!(!batch.take());
        assert!(!batch.is_pending());
    }
}
