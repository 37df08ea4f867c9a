use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Lifecycle phase of a streamed operation.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    NotStarted,
    Active,
    Completed,
    Failed,
    Canceled,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Canceled => "canceled",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Canceled)
    }
}

/// Phase guarded by a mutex. The first terminal transition wins; every later
/// one is refused, which is how late collaborator callbacks get ignored.
pub(crate) struct PhaseCell {
    operation: &'static str,
    phase: Mutex<Phase>,
}

impl PhaseCell {
    pub(crate) fn new(operation: &'static str) -> Self {
        Self {
            operation,
            phase: Mutex::new(Phase::NotStarted),
        }
    }

    pub(crate) fn get(&self) -> Phase {
        *self.phase.lock().expect("phase mutex poisoned")
    }

    pub(crate) fn activate(&self) {
        let mut phase = self.phase.lock().expect("phase mutex poisoned");
        if *phase == Phase::NotStarted {
            *phase = Phase::Active;
        }
    }

    /// Moves to `terminal` unless a terminal phase was already reached.
    pub(crate) fn finish(&self, terminal: Phase) -> bool {
        debug_assert!(terminal.is_terminal());
        let mut phase = self.phase.lock().expect("phase mutex poisoned");
        if phase.is_terminal() {
            log::trace!(
                "{}: ignoring {} after {}",
                self.operation,
                terminal.as_str(),
                phase.as_str()
            );
            return false;
        }
        *phase = terminal;
        true
    }

    /// Runs `f` while holding the phase lock, only if not yet terminal.
    /// Deliveries made this way cannot interleave with a terminal transition.
    pub(crate) fn while_open<R>(&self, f: impl FnOnce() -> R) -> Option<R> {
        let phase = self.phase.lock().expect("phase mutex poisoned");
        if *phase == Phase::Canceled {
            log::debug!(
                "{}: value delivered after cancel, discarded",
                self.operation
            );
            return None;
        }
        if phase.is_terminal() {
            log::warn!(
                "{}: collaborator delivered a value after {}",
                self.operation,
                phase.as_str()
            );
            return None;
        }
        Some(f())
    }
}
