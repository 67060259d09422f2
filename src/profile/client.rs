use reqwest::StatusCode;
use reqwest::blocking::Client;
use thiserror::Error;
use tracing::{info, warn};

use crate::store::{KvStore, StoreError};

use super::model::Profile;

pub const SAVED_MESSAGE: &str = "Profile updated successfully!";
pub const SAVE_FAILED_MESSAGE: &str = "Failed to update profile on server.";

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("failed to save profile locally: {0}")]
    Store(#[from] StoreError),
    #[error("profile update request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("profile update rejected with {0}")]
    Rejected(StatusCode),
}

impl ProfileError {
    /// What the account screen shows for this failure.
    pub fn message(&self) -> &'static str {
        SAVE_FAILED_MESSAGE
    }
}

pub struct ProfileClient {
    endpoint: String,
    http: Client,
}

impl ProfileClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http: Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST the profile as JSON. Anything but a 2xx is an error.
    pub fn update(&self, profile: &Profile) -> Result<(), ProfileError> {
        let response = self.http.post(&self.endpoint).json(profile).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProfileError::Rejected(status));
        }
        Ok(())
    }
}

/// Persist locally, then push to the server. Local writes are not undone when
/// the push fails.
pub fn save(profile: &Profile, store: &mut KvStore, client: &ProfileClient) -> Result<(), ProfileError> {
    profile.persist(store)?;
    match client.update(profile) {
        Ok(()) => {
            info!(endpoint = client.endpoint(), "profile updated");
            Ok(())
        }
        Err(e) => {
            warn!(endpoint = client.endpoint(), "profile update failed: {e}");
            Err(e)
        }
    }
}
