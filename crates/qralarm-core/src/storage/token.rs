//! Per-install stop-key token.
//!
//! Exactly one token exists per installation. It is minted on first use and
//! never regenerated unless the storage is cleared; silencing a ringing
//! alarm requires scanning a QR code whose payload equals this string
//! byte-for-byte.

use rand::Rng;

use super::Database;
use crate::error::StorageError;

const TOKEN_KEY: &str = "token";

/// Opaque per-install secret string.
pub type Token = String;

/// Persistent store for the single stop-key token.
pub struct TokenStore<'a> {
    db: &'a Database,
}

impl<'a> TokenStore<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Return the persisted token, minting and persisting one if absent.
    ///
    /// Idempotent: once a token is stored, repeated calls return it
    /// unchanged.
    ///
    /// # Errors
    /// Storage failures are fatal; the app cannot function without a token.
    pub fn ensure(&self) -> Result<Token, StorageError> {
        if let Some(existing) = self.db.kv_get(TOKEN_KEY)? {
            return Ok(existing);
        }
        let token = mint_token();
        self.db.kv_set(TOKEN_KEY, &token)?;
        Ok(token)
    }

    /// Return the persisted token without minting one.
    pub fn get(&self) -> Result<Option<Token>, StorageError> {
        self.db.kv_get(TOKEN_KEY)
    }
}

/// Mint a fresh token: a random hex component plus an epoch-millis hex
/// component. Unpredictable enough that an unrelated QR cannot match it.
fn mint_token() -> Token {
    let random: u64 = rand::thread_rng().gen();
    let now_ms = chrono::Utc::now().timestamp_millis();
    format!("SINK-{random:016x}{now_ms:x}")
}
