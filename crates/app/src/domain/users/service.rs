//! Users service.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use argon2::Argon2;
use async_trait::async_trait;
use mockall::automock;
use tokio::{
    sync::{Mutex, OnceCell},
    task,
};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::domain::users::{
    data::{Credentials, NewUser},
    errors::UsersServiceError,
    password::{hash_password, verify_password},
    records::UserRecord,
    repository::{InMemoryUsersRepository, UsersTable},
};

/// Verified against on logins for unknown usernames.
const DECOY_PASSWORD: &str = "storefront-decoy-password";

/// User accounts keyed by username.
///
/// Hashing and verification run on the blocking pool, outside the lock.
#[derive(Clone)]
pub struct InMemoryUsersService {
    table: Arc<Mutex<UsersTable>>,
    repository: InMemoryUsersRepository,
    argon2: Argon2<'static>,
    decoy_hash: Arc<OnceCell<String>>,
}

impl Debug for InMemoryUsersService {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("InMemoryUsersService")
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

impl Default for InMemoryUsersService {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUsersService {
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher(Argon2::default())
    }

    /// Build a service that hashes new passwords with the given Argon2 settings.
    #[must_use]
    pub fn with_hasher(argon2: Argon2<'static>) -> Self {
        Self {
            table: Arc::new(Mutex::new(UsersTable::default())),
            repository: InMemoryUsersRepository::new(),
            argon2,
            decoy_hash: Arc::new(OnceCell::new()),
        }
    }

    async fn hash(&self, password: Zeroizing<String>) -> Result<String, UsersServiceError> {
        let argon2 = self.argon2.clone();

        task::spawn_blocking(move || hash_password(&argon2, &password))
            .await?
            .map_err(Into::into)
    }

    async fn verify(
        &self,
        password: Zeroizing<String>,
        hash: String,
    ) -> Result<(), UsersServiceError> {
        let argon2 = self.argon2.clone();

        task::spawn_blocking(move || verify_password(&argon2, &password, &hash))
            .await?
            .map_err(Into::into)
    }

    /// Hash of [`DECOY_PASSWORD`] made with this service's settings, so a
    /// check against it costs the same as one against a real account.
    async fn decoy_hash(&self) -> Result<String, UsersServiceError> {
        self.decoy_hash
            .get_or_try_init(|| self.hash(Zeroizing::new(DECOY_PASSWORD.to_string())))
            .await
            .cloned()
    }
}

#[async_trait]
impl UsersService for InMemoryUsersService {
    async fn register(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        if user.username.trim().is_empty() || user.password.is_empty() {
            return Err(UsersServiceError::InvalidData);
        }

        let password_hash = self.hash(user.password).await?;

        let mut table = self.table.lock().await;

        let created = self
            .repository
            .create_user(&mut table, user.username, password_hash)
            .ok_or(UsersServiceError::AlreadyExists)?;

        debug!(user_uuid = %created.uuid, "registered user");

        Ok(created)
    }

    async fn login(&self, credentials: Credentials) -> Result<UserRecord, UsersServiceError> {
        let user = {
            let table = self.table.lock().await;

            self.repository
                .find_by_username(&table, &credentials.username)
        };

        let Some(user) = user else {
            warn!("login attempt for unknown user");

            let decoy = self.decoy_hash().await?;

            return match self.verify(credentials.password, decoy).await {
                Err(error @ UsersServiceError::HashingTask(_)) => Err(error),
                _ => Err(UsersServiceError::InvalidCredentials),
            };
        };

        self.verify(credentials.password, user.password_hash.clone())
            .await?;

        debug!(user_uuid = %user.uuid, "user logged in");

        Ok(user)
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Register a new user, hashing their password.
    async fn register(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Check a username/password pair, returning the matching user.
    async fn login(&self, credentials: Credentials) -> Result<UserRecord, UsersServiceError>;
}
