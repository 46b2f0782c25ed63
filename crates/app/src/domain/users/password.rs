//! Password hashing.

use argon2::{
    Argon2,
    password_hash::{
        self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

/// Hash a password into a PHC string with a fresh random salt.
pub(crate) fn hash_password(
    argon2: &Argon2<'_>,
    password: &str,
) -> Result<String, password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
}

/// Check `password` against a stored PHC string.
///
/// A mismatch is reported as [`password_hash::Error::Password`]. The hash's
/// own parameters are used, so hashes made with other settings still verify.
pub(crate) fn verify_password(
    argon2: &Argon2<'_>,
    password: &str,
    hash: &str,
) -> Result<(), password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;

    argon2.verify_password(password.as_bytes(), &parsed)
}
