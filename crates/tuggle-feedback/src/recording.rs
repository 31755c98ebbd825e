use std::cell::RefCell;
use std::rc::Rc;

use crate::haptics::{HapticBackend, HapticEvent, HapticPreset};

/// Backend that keeps every request for later inspection.
///
/// Clones share one log, so a test can keep a handle while the app owns
/// the backend.
#[derive(Clone, Debug)]
pub struct RecordingHaptics {
    events: Rc<RefCell<Vec<HapticEvent>>>,
    supported: bool,
}

impl RecordingHaptics {
    pub fn new() -> Self {
        Self {
            events: Rc::new(RefCell::new(Vec::new())),
            supported: true,
        }
    }

    /// A recorder that reports no engine, for exercising fallbacks.
    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Self::new()
        }
    }

    pub fn events(&self) -> Vec<HapticEvent> {
        self.events.borrow().clone()
    }

    pub fn take(&self) -> Vec<HapticEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn count_preset(&self, preset: HapticPreset) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| **event == HapticEvent::Preset(preset))
            .count()
    }

    pub fn count_transients(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| matches!(event, HapticEvent::Transient { .. }))
            .count()
    }
}

impl Default for RecordingHaptics {
    fn default() -> Self {
        Self::new()
    }
}

impl HapticBackend for RecordingHaptics {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn emit(&self, event: HapticEvent) {
        self.events.borrow_mut().push(event);
    }
}
