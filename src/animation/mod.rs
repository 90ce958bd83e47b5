pub mod easing;
pub mod transitions;

// Re-export commonly used types for convenience
pub use easing::EasingType;
pub use transitions::{CameraTransition, TransitionState};
