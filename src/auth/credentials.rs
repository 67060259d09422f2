use thiserror::Error;
use tracing::info;

use crate::store::{KvStore, StoreError, keys};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Please fill all fields.")]
    MissingFields,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of comparing submitted credentials with the stored pair.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    LoggedIn,
    Incorrect,
}

impl LoginOutcome {
    pub fn message(self) -> Option<&'static str> {
        match self {
            LoginOutcome::LoggedIn => None,
            LoginOutcome::Incorrect => Some("Incorrect email or password!"),
        }
    }
}

/// Store the credential pair, replacing whatever was there.
pub fn sign_up(store: &mut KvStore, email: &str, password: &str) -> Result<(), AuthError> {
    if email.is_empty() || password.is_empty() {
        return Err(AuthError::MissingFields);
    }
    store.set_many([(keys::EMAIL, email), (keys::PASSWORD, password)])?;
    info!("registered local account");
    Ok(())
}

/// Compare the submitted pair with the stored one and set the logged-in flag on a match.
pub fn login(store: &mut KvStore, email: &str, password: &str) -> Result<LoginOutcome, AuthError> {
    let matches =
        store.get(keys::EMAIL) == Some(email) && store.get(keys::PASSWORD) == Some(password);
    if !matches {
        return Ok(LoginOutcome::Incorrect);
    }
    store.set_flag(keys::LOGGED_IN, true)?;
    info!("logged in");
    Ok(LoginOutcome::LoggedIn)
}

pub fn logout(store: &mut KvStore) -> Result<(), AuthError> {
    store.set_flag(keys::LOGGED_IN, false)?;
    info!("logged out");
    Ok(())
}

pub fn is_logged_in(store: &KvStore) -> bool {
    store.flag(keys::LOGGED_IN)
}
