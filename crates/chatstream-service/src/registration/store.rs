//! Keyed store of pending registrations with expiry

use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rand::RngCore;

/// Random bytes per verification token
const TOKEN_BYTES: usize = 32;

/// Registration data held until the token is redeemed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRegistration {
    pub username: String,
    pub email: String,
    /// Argon2 PHC string; the plain password is never parked
    pub hashed_password: String,
    pub expires_at: DateTime<Utc>,
}

impl PendingRegistration {
    #[inline]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Generate a url-safe verification token
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Concurrent token -> pending registration map
///
/// Redemption is a single `remove`, so two racing verifications of one token
/// resolve to exactly one winner.
#[derive(Debug, Clone, Default)]
pub struct PendingRegistrationStore {
    entries: Arc<DashMap<String, PendingRegistration>>,
}

impl PendingRegistrationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Park a registration under a fresh token and return the token
    pub fn issue(&self, pending: PendingRegistration) -> String {
        loop {
            let token = generate_token();
            match self.entries.entry(token.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(pending);
                    return token;
                }
                Entry::Occupied(_) => continue,
            }
        }
    }

    /// Remove and return the registration if it exists and has not expired
    pub fn take(&self, token: &str, now: DateTime<Utc>) -> Option<PendingRegistration> {
        let (_, pending) = self.entries.remove(token)?;
        if pending.is_expired(now) {
            return None;
        }
        Some(pending)
    }

    /// Put a taken registration back under its token so it can be redeemed again
    pub fn reinstate(&self, token: &str, pending: PendingRegistration) {
        self.entries.insert(token.to_string(), pending);
    }

    /// Drop a registration without redeeming it
    pub fn discard(&self, token: &str) {
        self.entries.remove(token);
    }

    /// Evict expired entries, returning how many were removed
    pub fn sweep_expired(&self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, pending| !pending.is_expired(now));
        before.saturating_sub(self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
