//! OS-level registration of the active hotkey.

use crate::{AppError, AppResult, key_mapping};

use nan_overlay_core::HotkeyName;

use std::{
    panic::Location,
    sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    },
};

use error_location::ErrorLocation;
use global_hotkey::{GlobalHotKeyManager, hotkey::HotKey};
use tracing::{info, instrument, warn};

/// Owns the [`GlobalHotKeyManager`] and keeps exactly one hotkey registered.
///
/// Must be created and used on the UI thread: its event loop pumps the
/// messages needed for hotkey delivery, and dropping the manager
/// unregisters everything.
pub struct HotkeyRegistrar {
    manager: GlobalHotKeyManager,
    slots: HotkeySlots,
    active_id: Arc<AtomicU32>,
}

/// Bookkeeping for the registered hotkey and the one released for capture.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct HotkeySlots {
    registered: Option<HotKey>,
    suspended: Option<HotKey>,
}

impl HotkeySlots {
    pub(crate) fn registered(&self) -> Option<HotKey> {
        self.registered
    }

    /// Take the registered hotkey out so it can be released. It is kept as
    /// the fallback until another hotkey is registered.
    pub(crate) fn suspend(&mut self) -> Option<HotKey> {
        let hotkey = self.registered.take()?;
        self.suspended = Some(hotkey);
        Some(hotkey)
    }

    /// Start replacing the hotkey. Returns the still-registered key that
    /// must be released, and the key to restore if the new one is refused.
    pub(crate) fn begin_replace(&mut self) -> (Option<HotKey>, Option<HotKey>) {
        match self.registered.take() {
            Some(old) => {
                self.suspended = None;
                (Some(old), Some(old))
            }
            None => (None, self.suspended.take()),
        }
    }

    pub(crate) fn set_registered(&mut self, hotkey: HotKey) {
        self.registered = Some(hotkey);
        self.suspended = None;
    }
}

impl HotkeyRegistrar {
    /// Create the manager with nothing registered.
    #[track_caller]
    #[instrument]
    pub fn new() -> AppResult<Self> {
        let manager =
            GlobalHotKeyManager::new().map_err(|e| AppError::HotkeyRegistrationFailed {
                reason: format!("Failed to create manager: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(Self {
            manager,
            slots: HotkeySlots::default(),
            active_id: Arc::new(AtomicU32::new(0)),
        })
    }

    /// Id of the registered hotkey, shared with the forwarding thread.
    pub fn active_id(&self) -> Arc<AtomicU32> {
        Arc::clone(&self.active_id)
    }

    /// Register `name` as the global hotkey, replacing the previous one.
    ///
    /// If the new key cannot be registered the previous one is restored,
    /// including a key that was released for capture.
    #[track_caller]
    #[instrument(skip(self), fields(hotkey = %name))]
    pub fn register(&mut self, name: &HotkeyName) -> AppResult<()> {
        let code =
            key_mapping::hotkey_code(name).ok_or_else(|| AppError::HotkeyRegistrationFailed {
                reason: format!("No key code for {}", name),
                location: ErrorLocation::from(Location::caller()),
            })?;
        let hotkey = HotKey::new(None, code);

        if self.slots.registered() == Some(hotkey) {
            return Ok(());
        }

        let (release, fallback) = self.slots.begin_replace();
        if let Some(old) = release
            && let Err(e) = self.manager.unregister(old)
        {
            warn!(error = %e, "Failed to unregister previous hotkey");
        }

        if let Err(e) = self.manager.register(hotkey) {
            if let Some(old) = fallback {
                match self.manager.register(old) {
                    Ok(()) => {
                        self.slots.set_registered(old);
                        warn!(restored = old.id(), "Previous hotkey restored");
                    }
                    Err(e2) => warn!(error = %e2, "Failed to restore previous hotkey"),
                }
            }
            return Err(AppError::HotkeyRegistrationFailed {
                reason: format!("Failed to register {}: {}", name, e),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.active_id.store(hotkey.id(), Ordering::Release);
        self.slots.set_registered(hotkey);
        info!("Global hotkey registered");

        Ok(())
    }

    /// Release the OS grab so the overlay window receives the key itself.
    #[instrument(skip(self))]
    pub fn suspend(&mut self) {
        if let Some(hotkey) = self.slots.suspend() {
            match self.manager.unregister(hotkey) {
                Ok(()) => info!("Global hotkey released for capture"),
                Err(e) => warn!(error = %e, "Failed to release global hotkey"),
            }
        }
    }
}
