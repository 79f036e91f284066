//! Settings file access.
//!
//! Every mutation is flushed immediately with a full-file atomic rewrite.
//! Read failures never propagate out of the `load*` family: the overlay
//! must stay usable with no persisted state at all.

use crate::{
    CoreError, CoreResult, HotkeyName, Settings,
    settings::SETTINGS_FILE_NAME,
};

use std::{
    ffi::OsString,
    fs,
    io::{ErrorKind, Write},
    panic::Location,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};

/// Reads and writes the settings file at a fixed path.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the per-user configuration directory.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NoConfigDirectory`] if the platform has no home
    /// directory to resolve against.
    #[track_caller]
    pub fn default_location() -> CoreResult<Self> {
        let proj_dirs = ProjectDirs::from("com", "nanoverlay", "NANOverlay").ok_or_else(|| {
            CoreError::NoConfigDirectory {
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        Ok(Self::new(proj_dirs.config_dir().join(SETTINGS_FILE_NAME)))
    }

    /// Path of the settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the settings file with defaults if it does not exist yet,
    /// creating its directory as needed.
    #[track_caller]
    #[instrument(skip(self), fields(path = ?self.path))]
    pub fn ensure_settings_file(&self) -> CoreResult<()> {
        if self.path.exists() {
            debug!("Settings file present");
            return Ok(());
        }

        self.save(&Settings::default())?;
        info!("Default settings file created");

        Ok(())
    }

    /// Load settings, degrading to defaults on any problem.
    ///
    /// Invalid or missing values are replaced by their defaults and the
    /// corrected file is written back. An unreadable file is left untouched.
    #[instrument(skip(self), fields(path = ?self.path))]
    pub fn load(&self) -> Settings {
        let contents = match self.read() {
            Ok(Some(contents)) => contents,
            Ok(None) => {
                debug!("No settings file, using defaults");
                return Settings::default();
            }
            Err(e) => {
                warn!(error = %e, "Settings unreadable, using defaults");
                return Settings::default();
            }
        };

        let parsed = Settings::parse(&contents);

        if parsed.repaired {
            match self.save(&parsed.settings) {
                Ok(()) => info!("Settings file repaired"),
                Err(e) => warn!(error = %e, "Failed to rewrite repaired settings"),
            }
        }

        parsed.settings
    }

    /// Stored hotkey, or the default.
    pub fn load_hotkey(&self) -> HotkeyName {
        self.load().hotkey
    }

    /// Stored panel-open flag, or `false`.
    pub fn load_panel_open_state(&self) -> bool {
        self.load().panel_open
    }

    /// Rewrite the whole file from `settings` (write temp file, then rename).
    #[track_caller]
    #[instrument(skip(self), fields(path = ?self.path))]
    pub fn save(&self, settings: &Settings) -> CoreResult<()> {
        let dir = self.path.parent().filter(|d| !d.as_os_str().is_empty());
        if let Some(dir) = dir.filter(|d| !d.exists()) {
            fs::create_dir_all(dir).map_err(|source| CoreError::SettingsUnwritable {
                path: dir.to_path_buf(),
                source,
                location: ErrorLocation::from(Location::caller()),
            })?;
            debug!(dir = ?dir, "Created settings directory");
        }

        let temp_path = self.temp_path();
        let unwritable = |source: std::io::Error| CoreError::SettingsUnwritable {
            path: temp_path.clone(),
            source,
            location: ErrorLocation::from(Location::caller()),
        };

        let mut temp_file = fs::File::create(&temp_path).map_err(unwritable)?;
        temp_file
            .write_all(settings.to_file_contents().as_bytes())
            .map_err(unwritable)?;
        temp_file.sync_all().map_err(unwritable)?;
        drop(temp_file);

        fs::rename(&temp_path, &self.path).map_err(|source| CoreError::SettingsUnwritable {
            path: self.path.clone(),
            source,
            location: ErrorLocation::from(Location::caller()),
        })?;

        debug!(hotkey = %settings.hotkey, panel_open = settings.panel_open, "Settings saved");

        Ok(())
    }

    /// Persist `hotkey`, keeping the stored panel state.
    #[track_caller]
    pub fn save_hotkey(&self, hotkey: &HotkeyName) -> CoreResult<()> {
        let current = self.load();
        self.save(&Settings {
            hotkey: *hotkey,
            ..current
        })
    }

    /// Normalize and persist a user-supplied hotkey name.
    ///
    /// An invalid name is never written: the currently stored hotkey is kept
    /// instead. Returns the hotkey that ended up in the file.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn save_hotkey_name(&self, raw: &str) -> CoreResult<HotkeyName> {
        let current = self.load();

        let hotkey = match HotkeyName::normalize(raw) {
            Ok(name) => name,
            Err(e) => {
                warn!(error = %e, kept = %current.hotkey, "Rejected hotkey name");
                current.hotkey
            }
        };

        self.save(&Settings { hotkey, ..current })?;

        Ok(hotkey)
    }

    /// Persist the panel-open flag, keeping the stored hotkey.
    #[track_caller]
    pub fn save_panel_open_state(&self, open: bool) -> CoreResult<()> {
        let current = self.load();
        self.save(&Settings {
            panel_open: open,
            ..current
        })
    }

    #[track_caller]
    fn read(&self) -> CoreResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(CoreError::SettingsUnreadable {
                path: self.path.clone(),
                source,
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}
