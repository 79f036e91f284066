//! The eframe application: owns all UI-thread state and drives the
//! overlay lifecycle once per frame.

use crate::{
    AppCommand, BackgroundRuntime, HotkeyHandler, HotkeyRegistrar, TrayManager, TrayRouter,
    UiProxy, key_mapping,
    ui::{OverlayView, PANEL_SIZE, ViewEvents},
};

use nan_overlay_core::{
    CaptureGate, CaptureOutcome, InputCapture, KeyPress, OverlayEffect, OverlayLifecycle,
    PanelState, Settings, SettingsStore, should_dispatch,
};

use std::{
    sync::mpsc::{Receiver, TryRecvError},
    time::{Duration, Instant},
};

use eframe::egui;
use tracing::{debug, error, info, instrument, warn};

/// Where the window waits while the overlay is hidden.
pub(crate) const PARKED_POSITION: [f32; 2] = [10000.0, 10000.0];

// A parked window still gets frames, so poll the command queue slowly.
const HIDDEN_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// UI-thread application state.
pub struct OverlayApp {
    store: SettingsStore,
    settings: Settings,
    lifecycle: OverlayLifecycle,
    capture: InputCapture,
    panel: PanelState,
    view: Option<OverlayView>,
    registrar: Option<HotkeyRegistrar>,
    tray: Option<TrayManager>,
    command_rx: Receiver<AppCommand>,
    background: Option<BackgroundRuntime>,
    quit_pending: bool,
    quitting: bool,
}

impl OverlayApp {
    /// Register the hotkey, build the tray and start the forwarders.
    ///
    /// Failures of the hotkey, tray or background thread are logged; the
    /// overlay keeps running with whatever is left.
    pub fn new(cc: &eframe::CreationContext<'_>, store: SettingsStore, settings: Settings) -> Self {
        let ctx = cc.egui_ctx.clone();
        let (proxy, command_rx) = UiProxy::channel(ctx.clone());
        let gate = CaptureGate::new();

        let mut registrar = match HotkeyRegistrar::new() {
            Ok(registrar) => Some(registrar),
            Err(e) => {
                error!(error = %e, "Global hotkey unavailable");
                None
            }
        };
        if let Some(registrar) = registrar.as_mut()
            && let Err(e) = registrar.register(&settings.hotkey)
        {
            error!(error = %e, "Failed to register global hotkey");
        }

        let tray = match TrayManager::new(&settings.hotkey) {
            Ok(tray) => Some(tray),
            Err(e) => {
                error!(error = %e, "System tray unavailable");
                None
            }
        };

        let hotkey_handler = registrar
            .as_ref()
            .map(|r| HotkeyHandler::new(r.active_id(), gate.clone(), proxy.clone()));
        let tray_router = tray.as_ref().map(|t| {
            TrayRouter::new(
                t.toggle_item_id().clone(),
                t.close_item_id().clone(),
                proxy.clone(),
            )
        });

        let background = match BackgroundRuntime::spawn(hotkey_handler, tray_router) {
            Ok(background) => Some(background),
            Err(e) => {
                error!(error = %e, "Failed to start background runtime");
                None
            }
        };

        park_window(&ctx);
        info!(hotkey = %settings.hotkey, "Overlay ready");

        Self {
            store,
            settings,
            lifecycle: OverlayLifecycle::default(),
            capture: InputCapture::new(gate),
            panel: PanelState::new(),
            view: None,
            registrar,
            tray,
            command_rx,
            background,
            quit_pending: false,
            quitting: false,
        }
    }

    fn drain_commands(&mut self, ctx: &egui::Context, now: Instant) {
        loop {
            match self.command_rx.try_recv() {
                Ok(AppCommand::ToggleOverlay) => {
                    let effect = self.lifecycle.request_toggle(now);
                    self.apply_effects(ctx, effect);
                }
                Ok(AppCommand::Quit) => self.quit(ctx, now),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    debug!("Command channel closed");
                    break;
                }
            }
        }
    }

    fn route_keys(&mut self, ctx: &egui::Context, now: Instant) {
        let presses: Vec<KeyPress> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        repeat: false,
                        ..
                    } => Some(key_mapping::key_press_from_egui(*key)),
                    _ => None,
                })
                .collect()
        });

        for key in presses {
            if self.capture.is_capturing() {
                let outcome = self
                    .capture
                    .handle_key(&key, &mut self.settings, &self.store);
                self.after_capture(outcome);
                continue;
            }

            // Close, not toggle: the OS grab may report this same press.
            let hotkey = &self.settings.hotkey;
            if key.is_escape() || should_dispatch(&key, hotkey, self.capture.gate()) {
                let effect = self.lifecycle.request_close(now);
                self.apply_effects(ctx, effect);
            }
        }
    }

    fn apply_effects(
        &mut self,
        ctx: &egui::Context,
        effects: impl IntoIterator<Item = OverlayEffect>,
    ) {
        for effect in effects {
            if self.quitting {
                break;
            }

            match effect {
                OverlayEffect::Create => self.create_view(ctx),
                OverlayEffect::Shown => debug!("Overlay fully shown"),
                OverlayEffect::Destroy => {
                    self.destroy_view(ctx);
                    if self.quit_pending {
                        self.finish_quit(ctx);
                    }
                }
            }
        }
    }

    #[instrument(skip_all)]
    fn create_view(&mut self, ctx: &egui::Context) {
        self.view = Some(OverlayView::new(ctx));
        self.panel.set_open(self.store.load_panel_open_state());
        show_window(ctx);
        info!(panel_open = self.panel.is_open(), "Overlay created");
    }

    #[instrument(skip_all)]
    fn destroy_view(&mut self, ctx: &egui::Context) {
        self.abort_capture();
        self.persist_panel_state();
        self.view = None;
        park_window(ctx);
        info!("Overlay destroyed");
    }

    fn handle_view_events(&mut self, events: ViewEvents) {
        if events.settings_clicked && self.panel.open() {
            if self.panel.position().is_none() {
                let position = self.panel.position_or_centered(events.screen, PANEL_SIZE);
                self.panel.set_position(position);
            }
            self.persist_panel_state();
        }

        if events.panel.close_clicked && self.panel.close() {
            self.abort_capture();
            self.persist_panel_state();
        }

        if let Some(delta) = events.panel.drag {
            self.panel.move_by(delta.x, delta.y);
        }

        if events.panel.field_clicked && self.capture.begin(&self.settings.hotkey) {
            if let Some(registrar) = self.registrar.as_mut() {
                registrar.suspend();
            }
        } else if events.clicked_outside_field {
            let outcome = self.capture.focus_lost();
            self.after_capture(outcome);
        }

        if self.panel.is_open() && self.panel.position().is_none() {
            let position = self.panel.position_or_centered(events.screen, PANEL_SIZE);
            self.panel.set_position(position);
        }
    }

    fn abort_capture(&mut self) {
        let outcome = self.capture.focus_lost();
        self.after_capture(outcome);
    }

    fn after_capture(&mut self, outcome: CaptureOutcome) {
        match outcome {
            CaptureOutcome::Ignored => {}
            CaptureOutcome::Committed(_) | CaptureOutcome::Aborted { .. } => self.rearm_hotkey(),
        }
    }

    /// Register the active hotkey with the OS again and refresh the tray.
    fn rearm_hotkey(&mut self) {
        let hotkey = self.settings.hotkey;

        if let Some(registrar) = self.registrar.as_mut()
            && let Err(e) = registrar.register(&hotkey)
        {
            error!(error = %e, "Failed to re-register global hotkey");
        }

        if let Some(tray) = self.tray.as_mut()
            && let Err(e) = tray.set_hotkey(&hotkey)
        {
            warn!(error = %e, "Failed to update tray tooltip");
        }
    }

    fn persist_panel_state(&mut self) {
        self.settings.panel_open = self.panel.is_open();
        if let Err(e) = self.store.save_panel_open_state(self.settings.panel_open) {
            warn!(error = %e, "Failed to persist panel state");
        }
    }

    /// Quit once the overlay is gone. A shown overlay fades out first.
    #[instrument(skip_all)]
    fn quit(&mut self, ctx: &egui::Context, now: Instant) {
        if self.quitting || self.quit_pending {
            return;
        }

        match quit_step(&self.lifecycle) {
            QuitStep::CloseOverlayFirst => {
                self.quit_pending = true;
                info!("Quit requested, closing overlay first");
                let effect = self.lifecycle.request_close(now);
                self.apply_effects(ctx, effect);
            }
            QuitStep::ExitNow => self.finish_quit(ctx),
        }
    }

    fn finish_quit(&mut self, ctx: &egui::Context) {
        if self.quitting {
            return;
        }
        self.quitting = true;

        self.abort_capture();
        if let Err(e) = self.store.save(&self.settings) {
            warn!(error = %e, "Failed to flush settings on exit");
        }

        if let Some(background) = self.background.take() {
            background.shutdown();
        }

        info!("Quitting");
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }
}

impl eframe::App for OverlayApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        self.drain_commands(ctx, now);
        if self.quitting {
            return;
        }

        if ctx.input(|i| i.viewport().close_requested()) {
            if self.lifecycle.has_window() {
                ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
                let effect = self.lifecycle.request_close(now);
                self.apply_effects(ctx, effect);
            } else {
                self.quit(ctx, now);
                return;
            }
        }

        let focused = ctx.input(|i| i.viewport().focused);
        if capture_lost_focus(self.capture.is_capturing(), focused) {
            debug!("Overlay window lost focus during capture");
            self.abort_capture();
        }

        if self.view.is_some() {
            self.route_keys(ctx, now);
        }

        let effects = self.lifecycle.tick(now);
        self.apply_effects(ctx, effects);

        let opacity = self.lifecycle.opacity(now);
        let capturing = self.capture.is_capturing();
        if let Some(view) = self.view.as_mut() {
            let events = view.show(ctx, opacity, &self.panel, &self.settings.hotkey, capturing);
            self.handle_view_events(events);
        }

        if self.lifecycle.is_animating() {
            ctx.request_repaint();
        } else if !self.lifecycle.has_window() {
            ctx.request_repaint_after(HIDDEN_POLL_INTERVAL);
        }
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        egui::Rgba::TRANSPARENT.to_array()
    }
}

/// What a quit request has to do first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum QuitStep {
    /// The overlay is shown or fading: fade it out, then exit.
    CloseOverlayFirst,
    ExitNow,
}

pub(crate) fn quit_step(lifecycle: &OverlayLifecycle) -> QuitStep {
    if lifecycle.has_window() {
        QuitStep::CloseOverlayFirst
    } else {
        QuitStep::ExitNow
    }
}

/// Whether an in-progress capture must be abandoned because the window
/// stopped being the keyboard target.
pub(crate) fn capture_lost_focus(capturing: bool, focused: Option<bool>) -> bool {
    capturing && focused == Some(false)
}

/// Commands that bring the parked window back over `monitor` and focus it.
pub(crate) fn show_commands(monitor: Option<egui::Vec2>) -> Vec<egui::ViewportCommand> {
    let mut commands = vec![
        egui::ViewportCommand::Minimized(false),
        egui::ViewportCommand::OuterPosition(egui::Pos2::ZERO),
    ];
    if let Some(size) = monitor {
        commands.push(egui::ViewportCommand::InnerSize(size));
    }
    commands.push(egui::ViewportCommand::Focus);
    commands
}

/// Commands that move the window out of sight and hand focus back.
pub(crate) fn park_commands() -> Vec<egui::ViewportCommand> {
    vec![
        egui::ViewportCommand::OuterPosition(egui::Pos2::from(PARKED_POSITION)),
        egui::ViewportCommand::InnerSize(egui::Vec2::ZERO),
        egui::ViewportCommand::Minimized(true),
    ]
}

fn show_window(ctx: &egui::Context) {
    let monitor = ctx.input(|i| i.viewport().monitor_size);
    for command in show_commands(monitor) {
        ctx.send_viewport_cmd(command);
    }
}

fn park_window(ctx: &egui::Context) {
    for command in park_commands() {
        ctx.send_viewport_cmd(command);
    }
}
