mod gate;
mod input_capture;

pub use {
    gate::CaptureGate,
    input_capture::{CaptureOutcome, CaptureState, InputCapture},
};
