use crate::animation::easing::EasingType;
use crate::core::{
    camera::{Animation, CameraState},
    geo::LatLng,
};
use std::time::Duration;

/// State of a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionState {
    Running,
    Completed,
}

/// A camera move played out over time
#[derive(Debug, Clone)]
pub struct CameraTransition {
    start: CameraState,
    target: CameraState,
    duration: Duration,
    easing: EasingType,
    elapsed: Duration,
    state: TransitionState,
}

impl CameraTransition {
    pub fn new(start: CameraState, target: CameraState, animation: Animation) -> Self {
        let state = if animation.is_immediate() {
            TransitionState::Completed
        } else {
            TransitionState::Running
        };

        Self {
            start,
            target,
            duration: animation.duration,
            easing: animation.kind.into(),
            elapsed: Duration::ZERO,
            state,
        }
    }

    pub fn target(&self) -> CameraState {
        self.target
    }

    pub fn is_finished(&self) -> bool {
        self.state == TransitionState::Completed
    }

    /// Progress in [0, 1] before easing
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Camera at the current point of the transition
    pub fn current(&self) -> CameraState {
        if self.is_finished() {
            return self.target;
        }
        interpolate(&self.start, &self.target, self.easing.apply(self.progress()))
    }

    /// Advances the clock and returns the camera at the new point
    pub fn update(&mut self, delta: Duration) -> CameraState {
        if self.state == TransitionState::Running {
            self.elapsed = self.elapsed.saturating_add(delta).min(self.duration);
            if self.elapsed >= self.duration {
                self.state = TransitionState::Completed;
            }
        }
        self.current()
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Interpolates along the shorter arc so 350° → 10° turns through north
fn lerp_degrees(a: f64, b: f64, t: f64) -> f64 {
    let delta = ((b - a) % 360.0 + 540.0) % 360.0 - 180.0;
    (a + delta * t).rem_euclid(360.0)
}

fn interpolate(start: &CameraState, target: &CameraState, t: f64) -> CameraState {
    CameraState {
        target: LatLng::new(
            lerp(start.target.lat, target.target.lat, t),
            lerp(start.target.lng, target.target.lng, t),
        ),
        zoom: lerp(start.zoom, target.zoom, t),
        azimuth: lerp_degrees(start.azimuth, target.azimuth, t),
        tilt: lerp(start.tilt, target.tilt, t),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera(lat: f64, lng: f64, zoom: f64) -> CameraState {
        CameraState::new(LatLng::new(lat, lng), zoom, 0.0, 0.0)
    }

    #[test]
    fn test_immediate_transition_is_finished() {
        let transition =
            CameraTransition::new(camera(0.0, 0.0, 5.0), camera(1.0, 1.0, 6.0), Animation::immediate());
        assert!(transition.is_finished());
        assert_eq!(transition.current(), camera(1.0, 1.0, 6.0));
    }

    #[test]
    fn test_linear_midpoint() {
        let mut transition = CameraTransition::new(
            camera(0.0, 0.0, 10.0),
            camera(10.0, 20.0, 12.0),
            Animation::linear(1.0),
        );
        let mid = transition.update(Duration::from_millis(500));
        assert!((mid.target.lat - 5.0).abs() < 1e-9);
        assert!((mid.target.lng - 10.0).abs() < 1e-9);
        assert!((mid.zoom - 11.0).abs() < 1e-9);
        assert!(!transition.is_finished());

        let end = transition.update(Duration::from_secs(5));
        assert_eq!(end, camera(10.0, 20.0, 12.0));
        assert!(transition.is_finished());
    }

    #[test]
    fn test_azimuth_takes_short_arc() {
        assert!((lerp_degrees(350.0, 10.0, 0.5) - 0.0).abs() < 1e-9);
        assert!((lerp_degrees(10.0, 350.0, 0.5) - 0.0).abs() < 1e-9);
        assert!((lerp_degrees(0.0, 90.0, 0.5) - 45.0).abs() < 1e-9);
    }
}
