//! User Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// User Record
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub username: String,

    /// Argon2 PHC string; never the raw password.
    pub password_hash: String,

    pub created_at: Timestamp,
}
