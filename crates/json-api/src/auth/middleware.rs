//! Auth middleware.
//!
//! Accepts the credential either as `authorization: Bearer <token>` or as a
//! raw `token` header. Failures are rendered as the standard envelope, never
//! as a transport-level error.

use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::error;

use bazaar_app::auth::AuthServiceError;

use crate::{
    envelope::{Envelope, INTERNAL_MESSAGE, NoData},
    extensions::*,
};

pub(crate) const MISSING_MESSAGE: &str = "Not Authorized. Please login again";
pub(crate) const INVALID_MESSAGE: &str = "Invalid token. Please login again";

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_token(req) else {
        res.render(Envelope::<NoData>::fail(MISSING_MESSAGE));

        return;
    };

    let Some(state) = depot.shared_state() else {
        res.render(Envelope::<NoData>::fail(INTERNAL_MESSAGE));

        return;
    };

    let user = match state.app.auth.authenticate(&token).await {
        Ok(user) => user,
        Err(AuthServiceError::Malformed | AuthServiceError::Rejected) => {
            res.render(Envelope::<NoData>::fail(INVALID_MESSAGE));

            return;
        }
        Err(AuthServiceError::Verifier(source)) => {
            error!("failed to consult credential verifier: {source}");

            res.render(Envelope::<NoData>::fail(INTERNAL_MESSAGE));

            return;
        }
    };

    depot.insert_user_uuid(user);

    ctrl.call_next(req, depot, res).await;
}

fn extract_token(req: &Request) -> Option<String> {
    if let Some(value) = req.headers().get(AUTHORIZATION)
        && let Ok(value) = value.to_str()
    {
        let mut parts = value.splitn(2, ' ');

        let scheme = parts.next()?;
        let token = parts.next()?.trim();

        if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
            return Some(token.to_string());
        }

        return None;
    }

    let token = req.headers().get("token")?.to_str().ok()?.trim();

    if token.is_empty() {
        return None;
    }

    Some(token.to_string())
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use bazaar_app::{auth::MockAuthService, domain::users::models::UserUuid};

    use crate::test_helpers::state_with_auth;

    use super::*;

    #[salvo::handler]
    async fn echo_user(depot: &mut Depot, res: &mut Response) {
        let user = depot
            .user_uuid()
            .map_or_else(|| "missing".to_string(), |uuid| uuid.to_string());

        res.render(user);
    }

    fn make_service(auth: MockAuthService) -> Service {
        let state = state_with_auth(auth);

        let router = Router::new()
            .hoop(inject(state))
            .hoop(handler)
            .push(Router::new().get(echo_user));

        Service::new(router)
    }

    #[tokio::test]
    async fn missing_credential_fails_in_envelope() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate().never();

        let mut res = TestClient::get("http://example.com")
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: Envelope<NoData> = res.take_json().await?;

        assert!(!body.success);
        assert_eq!(body.message.as_deref(), Some(MISSING_MESSAGE));

        Ok(())
    }

    #[tokio::test]
    async fn rejected_credential_fails_in_envelope() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate()
            .once()
            .withf(|token| token == "aaa.bbb.ccc")
            .return_once(|_| Err(AuthServiceError::Rejected));

        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer aaa.bbb.ccc", true)
            .send(&make_service(auth))
            .await;

        let body: Envelope<NoData> = res.take_json().await?;

        assert!(!body.success);
        assert_eq!(body.message.as_deref(), Some(INVALID_MESSAGE));

        Ok(())
    }

    #[tokio::test]
    async fn bearer_header_reaches_the_handler() -> TestResult {
        let user = UserUuid::new();

        let mut auth = MockAuthService::new();

        auth.expect_authenticate()
            .once()
            .withf(|token| token == "aaa.bbb.ccc")
            .return_once(move |_| Ok(user));

        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer aaa.bbb.ccc", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.take_string().await?, user.to_string());

        Ok(())
    }

    #[tokio::test]
    async fn raw_token_header_is_accepted() -> TestResult {
        let user = UserUuid::new();

        let mut auth = MockAuthService::new();

        auth.expect_authenticate()
            .once()
            .withf(|token| token == "aaa.bbb.ccc")
            .return_once(move |_| Ok(user));

        let mut res = TestClient::get("http://example.com")
            .add_header("token", "aaa.bbb.ccc", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.take_string().await?, user.to_string());

        Ok(())
    }

    #[tokio::test]
    async fn non_bearer_authorization_is_rejected() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate().never();

        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Basic abc123", true)
            .send(&make_service(auth))
            .await;

        let body: Envelope<NoData> = res.take_json().await?;

        assert!(!body.success);

        Ok(())
    }
}
