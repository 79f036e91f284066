mod fade;
mod lifecycle;
mod panel;

pub use {
    fade::Fade,
    lifecycle::{DEFAULT_FADE_DURATION, OverlayEffect, OverlayLifecycle, OverlayState},
    panel::{PanelPosition, PanelState},
};
