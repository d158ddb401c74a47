//! Last-write-wins coalescing of pointer samples into display frames.
//!
//! Pointer devices can report far more often than the display refreshes.
//! Each move overwrites a single slot; the host drains the slot once per
//! frame, so at most one update is applied per frame and superseded samples
//! are dropped rather than queued.

/// Single-slot mailbox holding the newest unapplied sample.
#[derive(Debug, Clone)]
pub struct FrameMailbox<T> {
    slot: Option<T>,
    /// Samples overwritten before a frame drained them.
    dropped: u64,
}

impl<T> Default for FrameMailbox<T> {
    fn default() -> Self {
        Self {
            slot: None,
            dropped: 0,
        }
    }
}

impl<T> FrameMailbox<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a sample, replacing any pending one.
    ///
    /// Returns true when the slot was empty, i.e. the host needs to schedule
    /// a frame callback.
    pub fn post(&mut self, sample: T) -> bool {
        let was_empty = self.slot.is_none();
        if !was_empty {
            self.dropped += 1;
        }
        self.slot = Some(sample);
        was_empty
    }

    /// Take the pending sample for this frame.
    pub fn take(&mut self) -> Option<T> {
        self.slot.take()
    }

    /// Discard the pending sample without applying it.
    pub fn cancel(&mut self) -> bool {
        self.slot.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.slot.is_some()
    }

    /// Number of samples superseded so far.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}
