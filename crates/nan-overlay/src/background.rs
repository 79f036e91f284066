//! Background thread hosting the Tokio runtime for the event forwarders.

use crate::{AppError, AppResult, HotkeyHandler, TrayRouter};

use std::{panic::Location, thread, time::Duration};

use error_location::ErrorLocation;
use tokio::sync::watch;
use tracing::{debug, error, info, instrument};

const RUNTIME_SHUTDOWN_TIMEOUT: Duration = Duration::from_millis(200);

/// Handle to the forwarder thread. Dropping it signals shutdown.
pub struct BackgroundRuntime {
    shutdown_tx: watch::Sender<bool>,
}

impl BackgroundRuntime {
    /// Spawn the runtime thread and start the given forwarders on it.
    ///
    /// Either forwarder may be absent when its OS facility failed to start.
    #[track_caller]
    #[instrument(skip_all, fields(hotkey = hotkey.is_some(), tray = tray.is_some()))]
    pub fn spawn(hotkey: Option<HotkeyHandler>, tray: Option<TrayRouter>) -> AppResult<Self> {
        let rt = tokio::runtime::Runtime::new().map_err(|e| AppError::IoError {
            source: e,
            location: ErrorLocation::from(Location::caller()),
        })?;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        thread::Builder::new()
            .name("nan-overlay-background".into())
            .spawn(move || {
                rt.block_on(async {
                    let hotkey_rx = shutdown_rx.clone();
                    tokio::join!(
                        async {
                            if let Some(handler) = hotkey
                                && let Err(e) = handler.run(hotkey_rx).await
                            {
                                error!(error = ?e, "Hotkey handler error");
                            }
                        },
                        async {
                            if let Some(router) = tray
                                && let Err(e) = router.run(shutdown_rx).await
                            {
                                error!(error = ?e, "Tray router error");
                            }
                        }
                    );
                });

                // Blocking forwarders may still sit in recv(); don't wait on them.
                rt.shutdown_timeout(RUNTIME_SHUTDOWN_TIMEOUT);
                debug!("Background runtime stopped");
            })
            .map_err(|e| AppError::IoError {
                source: e,
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!("Background runtime started");

        Ok(Self { shutdown_tx })
    }

    /// Ask both forwarders to stop.
    pub fn shutdown(&self) {
        if self.shutdown_tx.send(true).is_err() {
            debug!("Background runtime already stopped");
        }
    }
}

impl Drop for BackgroundRuntime {
    fn drop(&mut self) {
        self.shutdown();
    }
}
