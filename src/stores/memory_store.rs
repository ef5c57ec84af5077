use crate::models::user::{NewUser, User, UserChanges};
use crate::stores::{StoreError, UserStore};
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};

/// In-memory user store
///
/// Users are keyed by id. A second map indexes usernames so that the
/// uniqueness check and the reservation of a name happen under one shard lock.
pub struct MemoryUserStore {
    users: DashMap<i64, User>,
    usernames: DashMap<String, i64>,
    next_id: AtomicI64,
}

impl MemoryUserStore {
    /// Create a new empty store. Ids start at 1.
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            usernames: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let id = match self.usernames.get(username) {
            Some(entry) => *entry.value(),
            None => return Ok(None),
        };

        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_many(&self) -> Result<Vec<User>, StoreError> {
        let mut users: Vec<User> = self
            .users
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        users.sort_by_key(|user| user.id);

        Ok(users)
    }

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let id = match self.usernames.entry(new_user.username.clone()) {
            Entry::Occupied(_) => return Err(StoreError::Conflict("username".to_string())),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                slot.insert(id);
                id
            }
        };

        let user = User {
            id,
            email: new_user.email,
            username: new_user.username,
            password: new_user.password,
            is_active: new_user.is_active,
        };
        self.users.insert(id, user.clone());

        Ok(user)
    }

    async fn update(&self, id: i64, changes: UserChanges) -> Result<User, StoreError> {
        if !self.users.contains_key(&id) {
            return Err(StoreError::NotFound(id));
        }

        // Reserve the new username before touching the record
        let mut reserved: Option<String> = None;
        if let Some(name) = changes.username.as_ref() {
            match self.usernames.entry(name.clone()) {
                Entry::Occupied(owner) => {
                    if *owner.get() != id {
                        return Err(StoreError::Conflict("username".to_string()));
                    }
                }
                Entry::Vacant(slot) => {
                    slot.insert(id);
                    reserved = Some(name.clone());
                }
            }
        }

        let (previous_username, updated) = match self.users.get_mut(&id) {
            Some(mut entry) => {
                let previous = entry.username.clone();
                changes.apply_to(entry.value_mut());
                (previous, entry.value().clone())
            }
            None => {
                // Deleted concurrently
                if let Some(name) = reserved {
                    self.usernames.remove_if(&name, |_, owner| *owner == id);
                }
                return Err(StoreError::NotFound(id));
            }
        };

        if reserved.is_some() {
            self.usernames
                .remove_if(&previous_username, |_, owner| *owner == id);
        }

        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        match self.users.remove(&id) {
            Some((_, user)) => {
                self.usernames
                    .remove_if(&user.username, |_, owner| *owner == id);
                Ok(())
            }
            None => Err(StoreError::NotFound(id)),
        }
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.users.len())
    }
}
