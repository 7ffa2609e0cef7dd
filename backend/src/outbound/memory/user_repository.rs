//! In-memory `UserRepository`.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, User, UserAccount, UserId};

use super::poisoned;

#[derive(Default)]
struct Accounts {
    by_id: HashMap<Uuid, UserAccount>,
    id_by_email: HashMap<String, Uuid>,
}

/// Mutex-guarded account store keyed by id with an email index.
#[derive(Default)]
pub struct MemoryUserRepository {
    accounts: Mutex<Accounts>,
}

impl MemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut guard = self
            .accounts
            .lock()
            .map_err(|_| UserPersistenceError::connection(poisoned("user")))?;
        let email = account.user.email().as_ref();
        if guard.id_by_email.contains_key(email) {
            return Err(UserPersistenceError::duplicate_email(email));
        }

        let id = *account.user.id().as_uuid();
        guard.id_by_email.insert(email.to_owned(), id);
        guard.by_id.insert(id, account.clone());
        Ok(())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let guard = self
            .accounts
            .lock()
            .map_err(|_| UserPersistenceError::connection(poisoned("user")))?;
        Ok(guard
            .id_by_email
            .get(email.as_ref())
            .and_then(|id| guard.by_id.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let guard = self
            .accounts
            .lock()
            .map_err(|_| UserPersistenceError::connection(poisoned("user")))?;
        Ok(guard
            .by_id
            .get(id.as_uuid())
            .map(|account| account.user.clone()))
    }
}
