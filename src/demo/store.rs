//! In-memory contact store and event log.
//!
//! Both are constructed explicitly and cloned into handlers; clones share
//! the same data.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use super::models::Contact;

/// Contacts shared by every handler clone.
#[derive(Debug, Clone, Default)]
pub struct ContactStore {
    contacts: Arc<RwLock<Vec<Contact>>>,
}

impl ContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding Peter Parker (1) and Tony Stark (2).
    pub fn seeded() -> Self {
        let store = Self::new();
        store.create("Peter Parker");
        store.create("Tony Stark");
        store
    }

    pub fn all(&self) -> Vec<Contact> {
        self.contacts.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn find(&self, id: i64) -> Option<Contact> {
        self.contacts
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    /// Contacts whose name contains `value`, ignoring case.
    pub fn search(&self, value: &str) -> Vec<Contact> {
        let needle = value.to_lowercase();
        self.contacts
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Append a contact with the next free id.
    pub fn create(&self, name: impl Into<String>) -> Contact {
        let mut contacts = self.contacts.write().unwrap_or_else(|e| e.into_inner());
        let id = contacts.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let contact = Contact {
            id,
            name: name.into(),
        };
        contacts.push(contact.clone());
        contact
    }

    /// Rename a contact; `None` when the id is unknown.
    pub fn update(&self, id: i64, name: impl Into<String>) -> Option<Contact> {
        let mut contacts = self.contacts.write().unwrap_or_else(|e| e.into_inner());
        let contact = contacts.iter_mut().find(|c| c.id == id)?;
        contact.name = name.into();
        Some(contact.clone())
    }

    /// Remove a contact; `false` when the id is unknown.
    pub fn delete(&self, id: i64) -> bool {
        let mut contacts = self.contacts.write().unwrap_or_else(|e| e.into_inner());
        let before = contacts.len();
        contacts.retain(|c| c.id != id);
        contacts.len() != before
    }

    /// Remove every contact matching `value`. An empty value matches nothing.
    pub fn delete_matching(&self, value: &str) -> bool {
        if value.is_empty() {
            return false;
        }
        let needle = value.to_lowercase();
        let mut contacts = self.contacts.write().unwrap_or_else(|e| e.into_inner());
        let before = contacts.len();
        contacts.retain(|c| !c.name.to_lowercase().contains(&needle));
        contacts.len() != before
    }
}

/// Names of executed queries/commands plus a `GetContactsQuery` counter.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<String>>>,
    contact_queries: Arc<AtomicUsize>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, event: impl Into<String>) {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn count_contact_query(&self) {
        self.contact_queries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn contact_queries(&self) -> usize {
        self.contact_queries.load(Ordering::Relaxed)
    }
}
