use crate::{AppCommand, AppError, AppResult};

use std::{
    panic::Location,
    sync::mpsc::{self, Receiver, Sender},
};

use eframe::egui;
use error_location::ErrorLocation;

/// Thread-safe handle for queueing [`AppCommand`]s to the UI thread.
///
/// Background threads never touch UI state directly: they enqueue a
/// command and wake the event loop, and the UI drains the queue on its
/// next frame.
#[derive(Clone)]
pub struct UiProxy {
    tx: Sender<AppCommand>,
    ctx: egui::Context,
}

impl UiProxy {
    /// Create a proxy and the receiver the UI thread drains.
    pub fn channel(ctx: egui::Context) -> (Self, Receiver<AppCommand>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx, ctx }, rx)
    }

    /// Queue `command` and request a repaint so it is handled promptly.
    #[track_caller]
    pub fn send(&self, command: AppCommand) -> AppResult<()> {
        self.tx
            .send(command)
            .map_err(|e| AppError::ChannelSendFailed {
                message: format!("Failed to send {:?}: {}", command, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.ctx.request_repaint();

        Ok(())
    }
}
