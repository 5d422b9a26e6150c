use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// The placeholder identity an unresolvable view token maps to.
/// Never tracked as a viewer.
pub const UNKNOWN_VIEWER: &str = "unknown";

#[derive(Debug)]
pub enum PresenceError {
    CallNotFound(String),
}

impl std::fmt::Display for PresenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PresenceError::CallNotFound(call_id) => {
                write!(f, "Call '{}' not found", call_id)
            }
        }
    }
}

impl std::error::Error for PresenceError {}

/// Authoritative map from call ID to the ordered set of viewer identities
/// currently watching.
///
/// Mutated by explicit join/leave signals and replaced wholesale per call
/// by webhook polling reconciliation. One exclusive lock guards the map,
/// held only for the duration of each operation; no I/O happens under it.
pub struct PresenceTracker {
    viewers_by_call: Mutex<HashMap<String, Vec<String>>>,
}

impl PresenceTracker {
    pub fn new() -> Self {
        Self {
            viewers_by_call: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<String>>> {
        // A poisoned lock only means a panic elsewhere; the map is still valid
        self.viewers_by_call
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Record a viewer as watching a call. Creates the call entry lazily.
    /// Returns whether the observable viewer set changed.
    pub fn join(&self, call_id: &str, viewer_id: &str) -> bool {
        if viewer_id == UNKNOWN_VIEWER {
            return false;
        }
        let mut map = self.lock();
        let viewers = map.entry(call_id.to_string()).or_default();
        if viewers.iter().any(|v| v == viewer_id) {
            return false;
        }
        viewers.push(viewer_id.to_string());
        debug!("Viewer '{}' joined call '{}'", viewer_id, call_id);
        true
    }

    /// Remove a viewer from a call, preserving the order of the rest.
    /// Returns whether the viewer was present; an unknown viewer within a
    /// known call is a silent no-op, an unknown call is an error.
    pub fn leave(&self, call_id: &str, viewer_id: &str) -> Result<bool, PresenceError> {
        let mut map = self.lock();
        let viewers = map
            .get_mut(call_id)
            .ok_or_else(|| PresenceError::CallNotFound(call_id.to_string()))?;
        match viewers.iter().position(|v| v == viewer_id) {
            Some(index) => {
                viewers.remove(index);
                debug!("Viewer '{}' left call '{}'", viewer_id, call_id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Replace a call's viewer set wholesale from a freshly observed batch,
    /// deduplicating in first-seen order and excluding unresolved identities.
    /// Returns whether the observable viewer set changed. A batch that
    /// resolves to nothing does not create an entry for an unknown call.
    pub fn reconcile(&self, call_id: &str, resolved_ids: &[String]) -> bool {
        let mut viewers: Vec<String> = Vec::new();
        for id in resolved_ids {
            if id != UNKNOWN_VIEWER && !viewers.contains(id) {
                viewers.push(id.clone());
            }
        }

        let mut map = self.lock();
        match map.get_mut(call_id) {
            Some(current) => {
                if *current == viewers {
                    return false;
                }
                *current = viewers;
            }
            None => {
                if viewers.is_empty() {
                    return false;
                }
                map.insert(call_id.to_string(), viewers);
            }
        }
        debug!("Reconciled viewers for call '{}'", call_id);
        true
    }

    /// Delete a call's entry entirely
    pub fn end(&self, call_id: &str) -> Result<(), PresenceError> {
        let mut map = self.lock();
        match map.remove(call_id) {
            Some(_) => {
                debug!("Call '{}' ended", call_id);
                Ok(())
            }
            None => Err(PresenceError::CallNotFound(call_id.to_string())),
        }
    }

    /// Current viewer sequence for a call; empty for an unknown call
    pub fn query(&self, call_id: &str) -> Vec<String> {
        self.lock().get(call_id).cloned().unwrap_or_default()
    }
}

impl Default for PresenceTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn join_is_idempotent() {
        let tracker = PresenceTracker::new();
        assert!(tracker.join("call1", "viewerA"));
        assert!(!tracker.join("call1", "viewerA"));
        assert!(!tracker.join("call1", "viewerA"));
        assert_eq!(tracker.query("call1"), ids(&["viewerA"]));
    }

    #[test]
    fn join_never_tracks_the_unknown_identity() {
        let tracker = PresenceTracker::new();
        assert!(!tracker.join("call1", "unknown"));
        assert!(tracker.query("call1").is_empty());
    }

    #[test]
    fn join_preserves_arrival_order() {
        let tracker = PresenceTracker::new();
        tracker.join("call1", "b");
        tracker.join("call1", "a");
        tracker.join("call1", "c");
        assert_eq!(tracker.query("call1"), ids(&["b", "a", "c"]));
    }

    #[test]
    fn leave_removes_and_preserves_order_of_the_rest() {
        let tracker = PresenceTracker::new();
        tracker.join("call1", "a");
        tracker.join("call1", "b");
        tracker.join("call1", "c");
        assert!(tracker.leave("call1", "b").unwrap());
        assert_eq!(tracker.query("call1"), ids(&["a", "c"]));
    }

    #[test]
    fn leave_of_absent_viewer_in_known_call_is_a_silent_noop() {
        let tracker = PresenceTracker::new();
        tracker.join("call1", "a");
        assert!(!tracker.leave("call1", "b").unwrap());
        assert_eq!(tracker.query("call1"), ids(&["a"]));
    }

    #[test]
    fn leave_of_unknown_call_is_an_error() {
        let tracker = PresenceTracker::new();
        assert!(matches!(
            tracker.leave("nope", "a"),
            Err(PresenceError::CallNotFound(_))
        ));
    }

    #[test]
    fn reconcile_dedupes_and_excludes_unknown_in_first_seen_order() {
        let tracker = PresenceTracker::new();
        let changed = tracker.reconcile("call1", &ids(&["a", "b", "a", "unknown"]));
        assert!(changed);
        assert_eq!(tracker.query("call1"), ids(&["a", "b"]));
    }

    #[test]
    fn reconcile_replaces_wholesale() {
        let tracker = PresenceTracker::new();
        tracker.join("call1", "a");
        tracker.join("call1", "b");
        assert!(tracker.reconcile("call1", &ids(&["c"])));
        assert_eq!(tracker.query("call1"), ids(&["c"]));
    }

    #[test]
    fn reconcile_reports_no_change_for_identical_batch() {
        let tracker = PresenceTracker::new();
        tracker.join("call1", "a");
        assert!(!tracker.reconcile("call1", &ids(&["a"])));
    }

    #[test]
    fn reconcile_with_no_resolvable_viewers_does_not_create_an_entry() {
        let tracker = PresenceTracker::new();
        assert!(!tracker.reconcile("call1", &ids(&["unknown"])));
        assert!(tracker.end("call1").is_err());
    }

    #[test]
    fn end_removes_entry_and_second_end_is_not_found() {
        let tracker = PresenceTracker::new();
        tracker.join("call1", "a");
        tracker.end("call1").unwrap();
        assert!(tracker.query("call1").is_empty());
        assert!(matches!(
            tracker.end("call1"),
            Err(PresenceError::CallNotFound(_))
        ));
    }

    #[test]
    fn query_of_unknown_call_is_empty_not_an_error() {
        let tracker = PresenceTracker::new();
        assert!(tracker.query("missing").is_empty());
    }
}
