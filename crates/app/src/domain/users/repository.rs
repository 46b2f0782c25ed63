//! Users Repository

use jiff::Timestamp;
use rustc_hash::FxHashMap;

use crate::domain::users::records::{UserRecord, UserUuid};

/// User rows keyed by username.
pub(crate) type UsersTable = FxHashMap<String, UserRecord>;

#[derive(Debug, Clone, Default)]
pub(crate) struct InMemoryUsersRepository;

impl InMemoryUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) fn find_by_username(&self, table: &UsersTable, username: &str) -> Option<UserRecord> {
        table.get(username).cloned()
    }

    /// Insert a new user, or return `None` if the username is taken.
    pub(crate) fn create_user(
        &self,
        table: &mut UsersTable,
        username: String,
        password_hash: String,
    ) -> Option<UserRecord> {
        if table.contains_key(&username) {
            return None;
        }

        let record = UserRecord {
            uuid: UserUuid::new(),
            username: username.clone(),
            password_hash,
            created_at: Timestamp::now(),
        };

        table.insert(username, record.clone());

        Some(record)
    }
}
