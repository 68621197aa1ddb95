//! Auth service errors.

use thiserror::Error;

use crate::auth::verifier::VerifierError;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// The credential is not even shaped like a credential.
    #[error("credential format is invalid")]
    Malformed,

    /// The verifier looked at the credential and said no.
    #[error("credential rejected")]
    Rejected,

    /// The verifier could not be consulted.
    #[error("verifier error")]
    Verifier(#[source] VerifierError),
}
