use serde::{Deserialize, Serialize};

/// Two independent one-shot deferred triggers driving the chart pipeline.
///
/// Each trigger is a tiny state machine: `idle -> pending -> idle`, where
/// `pending -> idle` is reached either by firing or by cancellation.
/// Re-entrant requests while pending are absorbed. The layout trigger is
/// additionally suppressed while a data pass is pending: a data pass always
/// implies a later layout pass, so scheduling one early would only produce
/// duplicate or out-of-order layout work.
#[derive(Debug, Default)]
pub struct Scheduler {
    data_pending: bool,
    layout_pending: bool,
    data_passes: u64,
    layout_passes: u64,
}

/// Serializable view of the scheduler, for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerSnapshot {
    pub data_pending: bool,
    pub layout_pending: bool,
    pub data_passes: u64,
    pub layout_passes: u64,
}

impl Scheduler {
    /// Schedules a data pass for the next data tick. Idempotent.
    pub fn request_data(&mut self) {
        self.data_pending = true;
    }

    /// Cancels a not-yet-fired data pass.
    pub fn cancel_data(&mut self) {
        self.data_pending = false;
    }

    /// Schedules a layout pass for the next frame tick, unless a data pass
    /// is pending. Idempotent.
    pub fn request_layout(&mut self) {
        if !self.data_pending {
            self.layout_pending = true;
        }
    }

    /// Cancels a not-yet-fired layout pass.
    pub fn cancel_layout(&mut self) {
        self.layout_pending = false;
    }

    #[must_use]
    pub fn data_pending(&self) -> bool {
        self.data_pending
    }

    #[must_use]
    pub fn layout_pending(&self) -> bool {
        self.layout_pending
    }

    /// Consumes a pending data request; `true` means the caller must run the
    /// data pass now.
    pub(crate) fn take_data(&mut self) -> bool {
        if self.data_pending {
            self.data_pending = false;
            self.data_passes += 1;
            true
        } else {
            false
        }
    }

    /// Consumes a pending layout request; `true` means the caller must run
    /// the layout pass now.
    pub(crate) fn take_layout(&mut self) -> bool {
        if self.layout_pending {
            self.layout_pending = false;
            self.layout_passes += 1;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> SchedulerSnapshot {
        SchedulerSnapshot {
            data_pending: self.data_pending,
            layout_pending: self.layout_pending,
            data_passes: self.data_passes,
            layout_passes: self.layout_passes,
        }
    }
}
