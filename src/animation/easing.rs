use crate::core::camera::AnimationKind;

/// Easing curves for camera transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EasingType {
    Linear,
    Smooth,
}

impl EasingType {
    /// Apply easing function to a normalized time value (0.0 to 1.0)
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::Linear => t,
            // Smooth step (3t^2 - 2t^3)
            EasingType::Smooth => t * t * (3.0 - 2.0 * t),
        }
    }
}

impl From<AnimationKind> for EasingType {
    fn from(kind: AnimationKind) -> Self {
        match kind {
            AnimationKind::Smooth => EasingType::Smooth,
            AnimationKind::Linear => EasingType::Linear,
        }
    }
}
