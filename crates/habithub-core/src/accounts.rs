//! Account creation and credential verification.
//!
//! Credentials are stored as `salt_hex$digest_hex` where the digest is
//! SHA-256 over the 16-byte random salt followed by the password. The
//! user snapshot persisted next to the credential never contains any
//! credential material.

use sha2::{Digest, Sha256};

use crate::error::{AccountError, Result};
use crate::storage::Database;
use crate::user::User;

/// Structural email check: exactly one '@', non-empty sides, no
/// whitespace anywhere.
pub fn validate_email(email: &str) -> bool {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty() && !domain.is_empty() && !email.chars().any(char::is_whitespace)
        }
        _ => false,
    }
}

/// Credential store keyed by email, backed by the users table.
pub struct AccountStore<'a> {
    db: &'a Database,
}

impl<'a> AccountStore<'a> {
    pub fn new(db: &'a Database) -> Self {
        AccountStore { db }
    }

    /// Register a new account and return its fresh snapshot.
    ///
    /// # Errors
    /// Rejects malformed emails and emails that already have an
    /// account.
    pub fn create(
        &self,
        email: &str,
        password: &str,
        username: Option<String>,
        avatar: Option<String>,
    ) -> Result<User> {
        if !validate_email(email) {
            return Err(AccountError::InvalidEmail(email.to_string()).into());
        }
        if self.exists(email)? {
            return Err(AccountError::EmailTaken(email.to_string()).into());
        }

        let salt = generate_salt()?;
        let digest = hash_password(&salt, password);
        let credential = format!("{}${}", hex::encode(salt), digest);

        let mut user = User::new(email);
        user.username = username;
        user.avatar = avatar;
        let snapshot = serde_json::to_string(&user)?;
        self.db.insert_account(email, &credential, &snapshot)?;
        Ok(user)
    }

    /// Check a password against the stored credential and return the
    /// snapshot on success.
    pub fn verify(&self, email: &str, password: &str) -> Result<User> {
        let row = self
            .db
            .account(email)?
            .ok_or_else(|| AccountError::UnknownEmail(email.to_string()))?;
        let (salt, stored_digest) = split_credential(&row.password_hash)?;
        let digest = hash_password(&salt, password);
        if !constant_time_eq(&digest, stored_digest) {
            return Err(AccountError::WrongPassword.into());
        }
        Ok(serde_json::from_str(&row.snapshot)?)
    }

    /// Whether an account exists for the email.
    pub fn exists(&self, email: &str) -> Result<bool> {
        Ok(self.db.account_exists(email)?)
    }

    /// Load the stored snapshot without checking a password.
    pub fn load_snapshot(&self, email: &str) -> Result<User> {
        let row = self
            .db
            .account(email)?
            .ok_or_else(|| AccountError::UnknownEmail(email.to_string()))?;
        Ok(serde_json::from_str(&row.snapshot)?)
    }

    /// Persist a snapshot for an existing account. The credential is
    /// left untouched.
    pub fn save_snapshot(&self, user: &User) -> Result<()> {
        let snapshot = serde_json::to_string(user)?;
        if !self.db.update_snapshot(&user.email, &snapshot)? {
            return Err(AccountError::UnknownEmail(user.email.clone()).into());
        }
        Ok(())
    }
}

fn generate_salt() -> Result<[u8; 16], AccountError> {
    let mut salt = [0u8; 16];
    getrandom::getrandom(&mut salt).map_err(|e| AccountError::SaltGeneration(e.to_string()))?;
    Ok(salt)
}

fn hash_password(salt: &[u8], password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

fn split_credential(stored: &str) -> Result<(Vec<u8>, &str), AccountError> {
    let (salt_hex, digest) = stored
        .split_once('$')
        .ok_or(AccountError::CorruptCredential)?;
    let salt = hex::decode(salt_hex).map_err(|_| AccountError::CorruptCredential)?;
    Ok((salt, digest))
}

// Constant-time comparison to prevent timing attacks.
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}
