use crate::core::geo::LatLng;
use crate::location::{LocationErrorCallback, LocationService, LocationUpdatedCallback};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

/// One entry of a location script
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ScriptStep {
    Fix(LatLng),
    Fail,
}

#[derive(Default)]
struct Slots {
    on_update: Option<LocationUpdatedCallback>,
    on_error: Option<LocationErrorCallback>,
}

/// Replays a fixed script of fixes and failures from a background thread
pub struct ScriptedLocationService {
    steps: Vec<ScriptStep>,
    interval: Duration,
    repeat: bool,
    default_location: LatLng,
    slots: Arc<Mutex<Slots>>,
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl ScriptedLocationService {
    pub fn new(steps: Vec<ScriptStep>, interval: Duration) -> Self {
        Self {
            steps,
            interval,
            repeat: false,
            default_location: LatLng::new(
                crate::core::constants::FALLBACK_LATITUDE,
                crate::core::constants::FALLBACK_LONGITUDE,
            ),
            slots: Arc::new(Mutex::new(Slots::default())),
            running: Arc::new(AtomicBool::new(false)),
            worker: None,
        }
    }

    /// Starts over from the first step after the last one
    pub fn repeating(mut self) -> Self {
        self.repeat = true;
        self
    }

    pub fn with_default_location(mut self, location: LatLng) -> Self {
        self.default_location = location;
        self
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Delivers one step on the calling thread
    pub fn deliver(&self, step: ScriptStep) {
        deliver(&self.slots, step);
    }
}

fn deliver(slots: &Mutex<Slots>, step: ScriptStep) {
    let Ok(slots) = slots.lock() else {
        log::error!("location callback slots poisoned, dropping {:?}", step);
        return;
    };
    match step {
        ScriptStep::Fix(location) => {
            if let Some(callback) = &slots.on_update {
                callback(location);
            }
        }
        ScriptStep::Fail => {
            if let Some(callback) = &slots.on_error {
                callback();
            }
        }
    }
}

impl LocationService for ScriptedLocationService {
    fn set_update_callback(&mut self, callback: LocationUpdatedCallback) {
        if let Ok(mut slots) = self.slots.lock() {
            slots.on_update = Some(callback);
        }
    }

    fn set_error_callback(&mut self, callback: LocationErrorCallback) {
        if let Ok(mut slots) = self.slots.lock() {
            slots.on_error = Some(callback);
        }
    }

    fn default_location(&self) -> LatLng {
        self.default_location
    }

    fn start(&mut self) {
        if self.running.swap(true, Ordering::SeqCst) {
            return;
        }

        let steps = self.steps.clone();
        let interval = self.interval;
        let repeat = self.repeat;
        let slots = self.slots.clone();
        let running = self.running.clone();

        let spawned = std::thread::Builder::new()
            .name("pinmap-location".to_string())
            .spawn(move || {
                'script: loop {
                    for step in &steps {
                        std::thread::sleep(interval);
                        if !running.load(Ordering::SeqCst) {
                            break 'script;
                        }
                        deliver(&slots, *step);
                    }
                    if !repeat || steps.is_empty() {
                        break;
                    }
                }
                running.store(false, Ordering::SeqCst);
            });

        match spawned {
            Ok(handle) => self.worker = Some(handle),
            Err(e) => {
                log::error!("failed to start location script: {}", e);
                self.running.store(false, Ordering::SeqCst);
            }
        }
    }

    fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::warn!("location script thread panicked");
            }
        }
    }
}

impl Drop for ScriptedLocationService {
    fn drop(&mut self) {
        self.stop();
    }
}
