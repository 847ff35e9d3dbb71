//! Per-instance relay state

use std::sync::RwLock;

use serde::Serialize;

use veil_crypto::identity::Identity;

/// Observability slots: last-write-wins, never correctness-bearing.
#[derive(Debug, Default, Clone, Serialize)]
pub struct DebugSnapshot {
    pub last_received_encrypted: Option<String>,
    pub last_decrypted_layer: Option<String>,
    pub last_forward_address: Option<u64>,
}

/// State owned by one relay instance.
///
/// The debug slots are explicit fields scoped to this instance's lifetime
/// and exposed only through read accessors.
pub struct RelayState {
    identity: Identity,
    debug: RwLock<DebugSnapshot>,
}

impl RelayState {
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            debug: RwLock::new(DebugSnapshot::default()),
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn record_received(&self, wire: &str) {
        self.debug.write().unwrap().last_received_encrypted = Some(wire.to_string());
    }

    pub fn record_peeled(&self, plain_layer: &str, next: u64) {
        let mut slots = self.debug.write().unwrap();
        slots.last_decrypted_layer = Some(plain_layer.to_string());
        slots.last_forward_address = Some(next);
    }

    pub fn debug_snapshot(&self) -> DebugSnapshot {
        self.debug.read().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_start_empty() {
        let state = RelayState::new(Identity::generate());
        let snapshot = state.debug_snapshot();
        assert!(snapshot.last_received_encrypted.is_none());
        assert!(snapshot.last_decrypted_layer.is_none());
        assert!(snapshot.last_forward_address.is_none());
    }

    #[test]
    fn test_record_and_read_back() {
        let state = RelayState::new(Identity::generate());
        state.record_received("abc||def");
        state.record_peeled("0000004002inner", 4002);

        let snapshot = state.debug_snapshot();
        assert_eq!(snapshot.last_received_encrypted.as_deref(), Some("abc||def"));
        assert_eq!(
            snapshot.last_decrypted_layer.as_deref(),
            Some("0000004002inner")
        );
        assert_eq!(snapshot.last_forward_address, Some(4002));
    }

    #[test]
    fn test_last_write_wins() {
        let state = RelayState::new(Identity::generate());
        state.record_received("first");
        state.record_received("second");
        assert_eq!(
            state.debug_snapshot().last_received_encrypted.as_deref(),
            Some("second")
        );
    }
}
