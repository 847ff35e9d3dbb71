//! Per-instance user state

use std::sync::RwLock;

use serde::Serialize;

/// Observability slots: last-write-wins, never correctness-bearing.
#[derive(Debug, Default, Clone, Serialize)]
pub struct DebugSnapshot {
    pub last_received_message: Option<String>,
    pub last_sent_message: Option<String>,
    pub last_circuit: Option<Vec<u32>>,
}

/// State owned by one user endpoint instance.
pub struct UserState {
    debug: RwLock<DebugSnapshot>,
}

impl UserState {
    pub fn new() -> Self {
        Self {
            debug: RwLock::new(DebugSnapshot::default()),
        }
    }

    pub fn record_received(&self, message: &str) {
        self.debug.write().unwrap().last_received_message = Some(message.to_string());
    }

    pub fn record_sent(&self, message: &str) {
        self.debug.write().unwrap().last_sent_message = Some(message.to_string());
    }

    pub fn record_circuit(&self, circuit: &[u32]) {
        self.debug.write().unwrap().last_circuit = Some(circuit.to_vec());
    }

    pub fn debug_snapshot(&self) -> DebugSnapshot {
        self.debug.read().unwrap().clone()
    }
}

impl Default for UserState {
    fn default() -> Self {
        Self::new()
    }
}
