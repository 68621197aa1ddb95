//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::{
        credential::parse_credential,
        errors::AuthServiceError,
        verifier::{CredentialVerifier, VerifierError},
    },
    domain::users::models::UserUuid,
};

/// Turns a bearer credential into a user identity, or fails.
#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn authenticate(&self, token: &str) -> Result<UserUuid, AuthServiceError>;
}

/// Structural check first, then the external verifier.
#[derive(Clone)]
pub struct VerifierAuthService {
    verifier: Arc<dyn CredentialVerifier>,
}

impl VerifierAuthService {
    #[must_use]
    pub fn new(verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self { verifier }
    }
}

#[async_trait]
impl AuthService for VerifierAuthService {
    async fn authenticate(&self, token: &str) -> Result<UserUuid, AuthServiceError> {
        parse_credential(token).map_err(|_| AuthServiceError::Malformed)?;

        match self.verifier.verify(token).await {
            Ok(user) => Ok(user),
            Err(VerifierError::Rejected) => Err(AuthServiceError::Rejected),
            Err(error) => Err(AuthServiceError::Verifier(error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::auth::verifier::MockCredentialVerifier;

    use super::*;

    #[tokio::test]
    async fn malformed_credential_never_reaches_the_verifier() {
        let mut verifier = MockCredentialVerifier::new();

        verifier.expect_verify().never();

        let service = VerifierAuthService::new(Arc::new(verifier));

        let result = service.authenticate("not-a-credential").await;

        assert!(
            matches!(result, Err(AuthServiceError::Malformed)),
            "expected Malformed, got {result:?}"
        );
    }

    #[tokio::test]
    async fn well_formed_credential_is_forwarded() -> TestResult {
        let user = UserUuid::new();

        let mut verifier = MockCredentialVerifier::new();

        verifier
            .expect_verify()
            .once()
            .withf(|token| token == "aaa.bbb.ccc")
            .return_once(move |_| Ok(user));

        let service = VerifierAuthService::new(Arc::new(verifier));

        assert_eq!(service.authenticate("aaa.bbb.ccc").await?, user);

        Ok(())
    }

    #[tokio::test]
    async fn verifier_rejection_maps_to_rejected() {
        let mut verifier = MockCredentialVerifier::new();

        verifier
            .expect_verify()
            .once()
            .return_once(|_| Err(VerifierError::Rejected));

        let service = VerifierAuthService::new(Arc::new(verifier));

        let result = service.authenticate("aaa.bbb.ccc").await;

        assert!(
            matches!(result, Err(AuthServiceError::Rejected)),
            "expected Rejected, got {result:?}"
        );
    }
}
