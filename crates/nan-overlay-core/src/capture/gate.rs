use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Flag that suspends global hotkey dispatch while the settings panel is
/// capturing a new hotkey.
///
/// The only state shared between the UI thread (writer, through
/// [`InputCapture`](crate::InputCapture)) and the OS hook thread (reader).
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CaptureGate {
    suspended: Arc<AtomicBool>,
}

impl CaptureGate {
    /// New gate, open for dispatch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether dispatch is currently suspended.
    pub fn is_suspended(&self) -> bool {
        self.suspended.load(Ordering::Acquire)
    }

    pub(crate) fn suspend(&self) {
        self.suspended.store(true, Ordering::Release);
    }

    pub(crate) fn resume(&self) {
        self.suspended.store(false, Ordering::Release);
    }
}
