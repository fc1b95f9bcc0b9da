//! Several calculators on one page
//!
//! Clicks go to the instance that owns the clicked control and make it the
//! active instance. Keyboard input is document-wide and goes to the active
//! instance only.

use tracing::debug;

use super::driver::WasmDriver;
use crate::core::session::Render;

/// Handle to an instance in a [`SessionRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(usize);

impl SessionId {
    /// Position of the instance in registration order
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Owns every calculator instance and tracks which one is active
#[derive(Debug, Default)]
pub struct SessionRegistry {
    instances: Vec<WasmDriver>,
    active: Option<SessionId>,
}

impl SessionRegistry {
    /// Creates an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an instance; none becomes active until it is clicked
    pub fn register(&mut self, driver: WasmDriver) -> SessionId {
        self.instances.push(driver);
        SessionId(self.instances.len() - 1)
    }

    /// Number of instances
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Returns true if no instance is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Gets an instance
    #[must_use]
    pub fn get(&self, id: SessionId) -> Option<&WasmDriver> {
        self.instances.get(id.0)
    }

    /// The instance receiving keyboard input
    #[must_use]
    pub fn active(&self) -> Option<SessionId> {
        self.active
    }

    /// Makes `id` the active instance and marks only its container
    pub fn activate(&mut self, id: SessionId) {
        if id.0 >= self.instances.len() {
            return;
        }
        for (index, instance) in self.instances.iter_mut().enumerate() {
            instance.set_active(index == id.0);
        }
        if self.active != Some(id) {
            debug!(instance = id.0, "active calculator changed");
        }
        self.active = Some(id);
    }

    /// Handles a click inside instance `id`.
    ///
    /// Any click inside the calculator activates it, even off the keypad.
    pub fn click(&mut self, id: SessionId, element_id: &str) -> Option<Render> {
        if id.0 >= self.instances.len() {
            return None;
        }
        self.activate(id);
        self.instances.get_mut(id.0)?.click(element_id)
    }

    /// Routes a document-level key press to the active instance
    pub fn key_down(&mut self, key: &str, now_ms: u64) -> Option<Render> {
        let Some(active) = self.active else {
            debug!(key, "no active calculator, key dropped");
            return None;
        };
        self.instances.get_mut(active.0)?.press_key(key, now_ms)
    }

    /// Ends expired press flashes on every instance
    pub fn release_feedback(&mut self, now_ms: u64) {
        for instance in &mut self.instances {
            instance.release_feedback(now_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_calculators() -> (SessionRegistry, SessionId, SessionId) {
        let mut registry = SessionRegistry::new();
        let first = registry.register(WasmDriver::new());
        let second = registry.register(WasmDriver::new());
        (registry, first, second)
    }

    #[test]
    fn test_register_assigns_sequential_ids() {
        let (registry, first, second) = two_calculators();
        assert_eq!(first.index(), 0);
        assert_eq!(second.index(), 1);
        assert_eq!(registry.len(), 2);
        assert!(!registry.is_empty());
        assert_eq!(registry.active(), None);
    }

    #[test]
    fn test_keys_dropped_without_active_instance() {
        let (mut registry, first, _) = two_calculators();
        assert_eq!(registry.key_down("5", 0), None);
        assert_eq!(registry.get(first).unwrap().display_text(), "");
    }

    #[test]
    fn test_click_activates_and_routes() {
        let (mut registry, first, second) = two_calculators();
        let render = registry.click(second, "btn-4").unwrap();
        assert_eq!(render.display, "4");
        assert_eq!(registry.active(), Some(second));
        assert!(registry.get(second).unwrap().is_active());
        assert!(!registry.get(first).unwrap().is_active());
        assert_eq!(registry.get(first).unwrap().display_text(), "");
    }

    #[test]
    fn test_keys_follow_last_clicked_instance() {
        let (mut registry, first, second) = two_calculators();
        registry.click(first, "btn-1");
        registry.key_down("2", 0);
        registry.click(second, "btn-9");
        registry.key_down("8", 0);

        assert_eq!(registry.get(first).unwrap().display_text(), "12");
        assert_eq!(registry.get(second).unwrap().display_text(), "98");
        assert!(registry.get(second).unwrap().is_active());
        assert!(!registry.get(first).unwrap().is_active());
    }

    #[test]
    fn test_sessions_do_not_share_state() {
        let (mut registry, first, second) = two_calculators();
        registry.click(first, "btn-7");
        registry.click(first, "btn-add");
        registry.click(second, "btn-3");
        registry.click(second, "btn-equals");
        assert_eq!(registry.get(first).unwrap().history_text(), "7 +");
        assert_eq!(registry.get(second).unwrap().display_text(), "3");
        assert_eq!(registry.get(second).unwrap().history_text(), "");
    }

    #[test]
    fn test_click_off_keypad_still_activates() {
        let (mut registry, _, second) = two_calculators();
        assert_eq!(registry.click(second, "display-current"), None);
        assert_eq!(registry.active(), Some(second));
    }

    #[test]
    fn test_unknown_instance_ignored() {
        let (mut registry, first, _) = two_calculators();
        registry.click(first, "btn-1");
        assert_eq!(registry.click(SessionId(9), "btn-1"), None);
        registry.activate(SessionId(9));
        assert_eq!(registry.active(), Some(first));
    }

    #[test]
    fn test_release_feedback_reaches_every_instance() {
        let (mut registry, first, second) = two_calculators();
        registry.click(first, "btn-1");
        registry.key_down("1", 0);
        registry.click(second, "btn-2");
        registry.key_down("2", 50);
        registry.release_feedback(100);
        assert!(!registry.get(first).unwrap().is_pressed("btn-1"));
        assert!(registry.get(second).unwrap().is_pressed("btn-2"));
        registry.release_feedback(150);
        assert!(!registry.get(second).unwrap().is_pressed("btn-2"));
    }
}
