/// Commands handed from background threads to the UI thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Show the overlay if hidden, hide it if shown.
    ToggleOverlay,
    /// Flush settings and exit.
    Quit,
}
