//! URL fragment holder and fragment-change notifications.

use parking_lot::{Mutex, RwLock};
use tokio::sync::broadcast;

const EVENT_CAPACITY: usize = 64;

/// Current URL fragment (without the leading `#`).
///
/// `set_hash` behaves like assigning `location.hash`: subscribers are notified
/// only when the value actually changes.
pub struct Location {
    fragment: RwLock<String>,
    events: Mutex<Option<broadcast::Sender<String>>>,
}

impl Location {
    pub fn new(initial: &str) -> Self {
        let (tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            fragment: RwLock::new(normalize(initial).to_string()),
            events: Mutex::new(Some(tx)),
        }
    }

    pub fn fragment(&self) -> String {
        self.fragment.read().clone()
    }

    /// Change the fragment, emitting a change event if it differs.
    ///
    /// Returns whether an event was emitted.
    pub fn set_hash(&self, hash: &str) -> bool {
        let hash = normalize(hash);
        {
            let mut fragment = self.fragment.write();
            if *fragment == hash {
                return false;
            }
            *fragment = hash.to_string();
        }

        tracing::debug!(fragment = hash, "Fragment changed");
        match self.events.lock().as_ref() {
            Some(tx) => tx.send(hash.to_string()).is_ok(),
            None => false,
        }
    }

    /// Change the fragment without notifying subscribers.
    pub fn replace_hash(&self, hash: &str) {
        *self.fragment.write() = normalize(hash).to_string();
    }

    /// Subscribe to fragment changes. Closed receivers never see events again.
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        match self.events.lock().as_ref() {
            Some(tx) => tx.subscribe(),
            None => {
                let (tx, rx) = broadcast::channel(1);
                drop(tx);
                rx
            }
        }
    }

    /// Stop emitting events; current subscribers observe a closed channel.
    pub fn close(&self) {
        self.events.lock().take();
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new("")
    }
}

fn normalize(hash: &str) -> &str {
    let hash = hash.trim();
    hash.strip_prefix('#').unwrap_or(hash)
}
