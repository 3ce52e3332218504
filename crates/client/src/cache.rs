//! Normalized client-side cache.
//!
//! Entities are stored once per `(EntityKind, id)` and list query results are
//! stored as ordered references into that store, keyed by operation and
//! variables. A write for an entity merges its fields over whatever is
//! already stored, so every list that references it sees the update.
//!
//! List fetches are ticketed: each [`NormalizedCache::begin_list`] hands out
//! a sequence number, and committing a ticket older than the newest one
//! issued for the same key is discarded.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Organization,
    Project,
    Task,
    TaskComment,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Organization => "Organization",
            Self::Project => "Project",
            Self::Task => "Task",
            Self::TaskComment => "TaskComment",
        }
    }
}

/// Reference to one cached entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: String,
}

/// Identity of a list query: operation name plus canonical variables.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListKey {
    operation: &'static str,
    variables: String,
}

impl ListKey {
    pub fn new(operation: &'static str, variables: &Value) -> Self {
        // serde_json maps are ordered by key, so equal variables render equally.
        Self {
            operation,
            variables: variables.to_string(),
        }
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }
}

/// Permission to commit one list result.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Ticket {
    key: ListKey,
    seq: u64,
}

impl Ticket {
    pub fn key(&self) -> &ListKey {
        &self.key
    }
}

#[derive(Debug)]
struct CachedList {
    kind: EntityKind,
    refs: Vec<EntityRef>,
}

#[derive(Debug, Default)]
pub struct NormalizedCache {
    entities: HashMap<EntityRef, Map<String, Value>>,
    lists: HashMap<ListKey, CachedList>,
    issued: HashMap<ListKey, u64>,
}

impl NormalizedCache {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- entities ----

    /// Merge an entity object into the store. Returns its reference, or
    /// `None` when the value is not an object with a string `id`.
    pub fn write_entity(&mut self, kind: EntityKind, value: &Value) -> Option<EntityRef> {
        let object = value.as_object()?;
        let id = object.get("id")?.as_str()?.to_string();
        let entity = EntityRef { kind, id };
        let stored = self.entities.entry(entity.clone()).or_default();
        for (field, incoming) in object {
            stored.insert(field.clone(), incoming.clone());
        }
        Some(entity)
    }

    pub fn read_entity(&self, kind: EntityKind, id: &str) -> Option<Value> {
        let entity = EntityRef {
            kind,
            id: id.to_string(),
        };
        self.entities
            .get(&entity)
            .map(|fields| Value::Object(fields.clone()))
    }

    pub fn read_entity_as<T: DeserializeOwned>(
        &self,
        kind: EntityKind,
        id: &str,
    ) -> Option<Result<T, serde_json::Error>> {
        self.read_entity(kind, id).map(serde_json::from_value)
    }

    /// Drop an entity and every list reference to it.
    pub fn evict(&mut self, kind: EntityKind, id: &str) {
        let entity = EntityRef {
            kind,
            id: id.to_string(),
        };
        self.entities.remove(&entity);
        for list in self.lists.values_mut() {
            list.refs.retain(|r| r != &entity);
        }
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    // ---- lists ----

    /// Issue a ticket for fetching `key`. Any ticket issued earlier for the
    /// same key becomes stale.
    pub fn begin_list(&mut self, key: ListKey) -> Ticket {
        let seq = self.issued.entry(key.clone()).or_insert(0);
        *seq += 1;
        Ticket { key, seq: *seq }
    }

    /// Whether a newer ticket for the same key has been issued since.
    pub fn is_stale(&self, ticket: &Ticket) -> bool {
        self.issued
            .get(&ticket.key)
            .is_some_and(|latest| *latest > ticket.seq)
    }

    /// Store a list result. Each item is merged into the entity store and the
    /// list itself is replaced wholesale. Returns `false` and changes nothing
    /// when the ticket is stale.
    pub fn commit_list(&mut self, ticket: Ticket, kind: EntityKind, items: &[Value]) -> bool {
        if self.is_stale(&ticket) {
            tracing::debug!(
                operation = ticket.key.operation,
                seq = ticket.seq,
                "Discarding stale list response"
            );
            return false;
        }
        let refs = items
            .iter()
            .filter_map(|item| self.write_entity(kind, item))
            .collect();
        self.lists.insert(ticket.key, CachedList { kind, refs });
        true
    }

    /// Resolve a cached list through the entity store.
    pub fn read_list(&self, key: &ListKey) -> Option<Vec<Value>> {
        let list = self.lists.get(key)?;
        Some(
            list.refs
                .iter()
                .filter_map(|r| self.read_entity(list.kind, &r.id))
                .collect(),
        )
    }

    pub fn read_list_as<T: DeserializeOwned>(
        &self,
        key: &ListKey,
    ) -> Option<Result<Vec<T>, serde_json::Error>> {
        self.read_list(key)
            .map(|items| items.into_iter().map(serde_json::from_value).collect())
    }

    /// Drop a cached list and return the references it held. Tickets already
    /// issued for `key` become stale so an in-flight fetch cannot restore it.
    pub fn remove_list(&mut self, key: &ListKey) -> Vec<EntityRef> {
        if let Some(seq) = self.issued.get_mut(key) {
            *seq += 1;
        }
        self.lists
            .remove(key)
            .map(|list| list.refs)
            .unwrap_or_default()
    }

    /// Keys of every cached list for one operation.
    pub fn list_keys(&self, operation: &str) -> Vec<ListKey> {
        self.lists
            .keys()
            .filter(|k| k.operation == operation)
            .cloned()
            .collect()
    }
}
