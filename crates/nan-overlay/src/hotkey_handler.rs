//! Global hotkey forwarding from the OS hook to the UI thread.
//!
//! Runs on the background runtime. Hotkey events are turned into
//! [`AppCommand::ToggleOverlay`] unless the settings panel is capturing a
//! new hotkey, in which case they are dropped.

use crate::{AppCommand, AppResult, UiProxy};

use nan_overlay_core::CaptureGate;

use std::{
    sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    },
    time::Duration,
};

use global_hotkey::{GlobalHotKeyEvent, HotKeyState};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, instrument, warn};

/// Forwards presses of the active global hotkey to the UI thread.
pub struct HotkeyHandler {
    active_id: Arc<AtomicU32>,
    gate: CaptureGate,
    proxy: UiProxy,
}

impl HotkeyHandler {
    /// Create a handler for the hotkey whose id is published in `active_id`.
    ///
    /// The id is written by [`HotkeyRegistrar`](crate::HotkeyRegistrar) on
    /// the UI thread whenever the hotkey is re-registered. This struct is
    /// `Send` and can live on any thread; it only listens on the global
    /// [`GlobalHotKeyEvent`] channel.
    pub fn new(active_id: Arc<AtomicU32>, gate: CaptureGate, proxy: UiProxy) -> Self {
        Self {
            active_id,
            gate,
            proxy,
        }
    }

    /// Run the forwarding loop until a shutdown signal is received.
    #[instrument(skip(self, shutdown_rx))]
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) -> AppResult<()> {
        let receiver = GlobalHotKeyEvent::receiver().clone();
        let (event_tx, mut event_rx) = mpsc::channel(32);

        // GlobalHotKeyEvent::receiver() is a crossbeam receiver with a
        // blocking recv(); one persistent blocking task forwards into tokio.
        // It exits on the first blocking_send() after event_rx is dropped.
        let handle = tokio::task::spawn_blocking(move || {
            while let Ok(event) = receiver.recv() {
                if event_tx.blocking_send(event).is_err() {
                    break;
                }
            }
        });

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("Hotkey handler shutting down");
                    break;
                }
                Some(event) = event_rx.recv() => {
                    self.handle_event(event)?;
                }
            }
        }

        drop(event_rx);

        // The blocking task may sit in recv() until the next hotkey event.
        match tokio::time::timeout(Duration::from_secs(1), handle).await {
            Ok(Ok(())) => debug!("Hotkey event forwarder stopped cleanly"),
            Ok(Err(e)) => warn!(error = ?e, "Hotkey event forwarder task panicked"),
            Err(_) => debug!(
                "Hotkey event forwarder did not stop within timeout, \
                   will be cleaned up on exit"
            ),
        }

        Ok(())
    }

    /// Dispatch one OS event. Returns whether a toggle was queued.
    pub(crate) fn handle_event(&self, event: GlobalHotKeyEvent) -> AppResult<bool> {
        if event.state != HotKeyState::Pressed {
            return Ok(false);
        }

        if event.id != self.active_id.load(Ordering::Acquire) {
            debug!(id = event.id, "Ignoring event for inactive hotkey");
            return Ok(false);
        }

        if self.gate.is_suspended() {
            debug!("Hotkey press swallowed while capturing a new hotkey");
            return Ok(false);
        }

        self.proxy.send(AppCommand::ToggleOverlay)?;
        debug!("Overlay toggle requested by global hotkey");

        Ok(true)
    }
}
