use thiserror::Error;

use crate::remote::RemoteError;

#[derive(Debug, Error)]
pub enum FleetError {
    #[error("reference not found: {0}")]
    ReferenceNotFound(String),

    #[error("session email is not verified")]
    SessionNotVerified,

    #[error("remote write failed: {0}")]
    Remote(#[from] RemoteError),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The primary write was applied but the follow-up cascade write was
    /// not; the two records disagree until the cascade is replayed.
    #[error("cascade update for {entity} failed: {source}")]
    Cascade {
        entity: String,
        #[source]
        source: RemoteError,
    },

    #[error("internal error: {0}")]
    Internal(String),
}
