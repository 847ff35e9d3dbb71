//! In-memory node registry

use dashmap::DashMap;
use thiserror::Error;

use veil_onion::Node;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("registry full")]
    Full,
}

/// Flat upsertable relay list keyed by node id.
pub struct NodeStore {
    nodes: DashMap<u32, String>,
    max_nodes: usize,
}

impl NodeStore {
    pub fn new(max_nodes: usize) -> Self {
        Self {
            nodes: DashMap::new(),
            max_nodes,
        }
    }

    /// Idempotent upsert: re-registering an id rotates the stored key.
    pub fn upsert(&self, node_id: u32, public_key: String) -> Result<(), StoreError> {
        if !self.nodes.contains_key(&node_id) && self.nodes.len() >= self.max_nodes {
            return Err(StoreError::Full);
        }
        self.nodes.insert(node_id, public_key);
        Ok(())
    }

    /// Snapshot of all registered nodes, ordered by id.
    pub fn snapshot(&self) -> Vec<Node> {
        let mut nodes: Vec<Node> = self
            .nodes
            .iter()
            .map(|entry| Node {
                node_id: *entry.key(),
                public_key: entry.value().clone(),
            })
            .collect();
        nodes.sort_by_key(|n| n.node_id);
        nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_and_snapshot() {
        let store = NodeStore::new(16);
        store.upsert(2, "pkB".to_string()).unwrap();
        store.upsert(1, "pkA".to_string()).unwrap();

        let nodes = store.snapshot();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].node_id, 1);
        assert_eq!(nodes[0].public_key, "pkA");
        assert_eq!(nodes[1].node_id, 2);
    }

    #[test]
    fn test_upsert_rotates_key() {
        let store = NodeStore::new(16);
        store.upsert(1, "old".to_string()).unwrap();
        store.upsert(1, "new".to_string()).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.snapshot()[0].public_key, "new");
    }

    #[test]
    fn test_capacity_bound() {
        let store = NodeStore::new(2);
        store.upsert(1, "a".to_string()).unwrap();
        store.upsert(2, "b".to_string()).unwrap();

        assert!(matches!(
            store.upsert(3, "c".to_string()),
            Err(StoreError::Full)
        ));
        // Re-registration of a known id still works at capacity.
        store.upsert(2, "b2".to_string()).unwrap();
    }
}
