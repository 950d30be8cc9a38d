mod controller;
mod transition;

pub use controller::{ViewportController, ViewportState, ZoomPhase};
pub use transition::ZoomTransition;
