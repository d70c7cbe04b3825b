//! Authentication and authorization integration tests
//!
//! Covers token verification through the request guard, the uniform 401
//! body, role gating on admin routes, and refresh.

use axum::http::{Method, StatusCode};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use campus_auth::{Identity, Role};
use serde_json::Value;
use tower::ServiceExt;

use crate::common::{
    authed_request, parse_body, raw_auth_request, unauthed_request, TestApp, START, TEST_TTL,
};

/// Status plus parsed JSON body for a GET with the given token
async fn get_with_token(app: &TestApp, uri: &str, jwt: &str) -> (StatusCode, Value) {
    let resp = app
        .router()
        .oneshot(authed_request(Method::GET, uri, jwt))
        .await
        .unwrap();
    let status = resp.status();
    (status, parse_body(resp).await)
}

fn generic_unauthorized() -> Value {
    serde_json::json!({
        "error": {
            "code": "UNAUTHORIZED",
            "message": "Invalid or expired session",
        }
    })
}

mod test_token_verification {
    use super::*;

    #[tokio::test]
    async fn test_whoami_echoes_issued_identity() {
        let app = TestApp::new();
        let token = app
            .auth
            .issue(
                &Identity {
                    subject_id: 123,
                    email: "user@test.com".to_string(),
                    role: Role::Student,
                    display_name: "John Doe".to_string(),
                },
                TEST_TTL,
            )
            .unwrap();

        let (status, body) = get_with_token(&app, "/v1/auth/whoami", &token).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user_id"], 123);
        assert_eq!(body["email"], "user@test.com");
        assert_eq!(body["role"], "student");
        assert_eq!(body["name"], "John Doe");
        assert_eq!(body["issued_at"], START);
        assert_eq!(body["expires_at"], START + TEST_TTL);
        assert_eq!(body["expires_in"], TEST_TTL);

        app.clock.advance(100);
        let (_, body) = get_with_token(&app, "/v1/auth/whoami", &token).await;
        assert_eq!(body["expires_in"], TEST_TTL - 100);
    }

    #[tokio::test]
    async fn test_missing_authorization_header() {
        let app = TestApp::new();
        let resp = app
            .router()
            .oneshot(unauthed_request(Method::GET, "/v1/auth/whoami"))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(parse_body(resp).await, generic_unauthorized());
    }

    #[tokio::test]
    async fn test_invalid_authorization_format() {
        let app = TestApp::new();
        let token = app.token_for(Role::Student);
        let resp = app
            .router()
            .oneshot(raw_auth_request(
                Method::GET,
                "/v1/auth/whoami",
                &format!("Token {}", token),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(parse_body(resp).await, generic_unauthorized());
    }

    #[tokio::test]
    async fn test_replaced_signature_is_rejected() {
        let app = TestApp::new();
        let token = app.token_for(Role::Student);
        let (message, _) = token.rsplit_once('.').unwrap();
        let tampered = format!("{}.invalid_signature", message);

        let (status, body) = get_with_token(&app, "/v1/auth/whoami", &tampered).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, generic_unauthorized());
    }

    #[tokio::test]
    async fn test_self_promoted_role_is_rejected() {
        let app = TestApp::new();
        let token = app.token_for(Role::Student);
        let parts: Vec<&str> = token.split('.').collect();

        // Rewrite the payload to claim admin, keeping the student's signature
        let mut payload: Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(parts[1]).unwrap()).unwrap();
        payload["role"] = Value::String("admin".to_string());
        let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&payload).unwrap());
        let forged = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

        let (status, body) = get_with_token(&app, "/v1/admin/session", &forged).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, generic_unauthorized());
    }

    #[tokio::test]
    async fn test_token_from_other_deployment_is_rejected() {
        let app = TestApp::new();
        let other = campus_auth::AuthBackend::new(
            campus_auth::AuthConfig::new("another-secret", crate::common::TEST_ISSUER, TEST_TTL)
                .unwrap(),
        );
        let token = other
            .issue(&crate::common::identity_for(Role::Admin), TEST_TTL)
            .unwrap();

        let (status, _) = get_with_token(&app, "/v1/auth/whoami", &token).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_malformed_tokens_share_one_response() {
        let app = TestApp::new();
        for jwt in ["abc", "abc.def", "a.b.c", "..", "not a token at all"] {
            let (status, body) = get_with_token(&app, "/v1/auth/whoami", jwt).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "token {:?}", jwt);
            assert_eq!(body, generic_unauthorized(), "token {:?}", jwt);
        }
    }
}

mod test_expiry {
    use super::*;

    #[tokio::test]
    async fn test_one_second_token_expires() {
        let app = TestApp::new();
        let token = app
            .auth
            .issue(&crate::common::identity_for(Role::Teacher), 1)
            .unwrap();

        let (status, _) = get_with_token(&app, "/v1/auth/whoami", &token).await;
        assert_eq!(status, StatusCode::OK);

        app.clock.advance(1);

        let (status, body) = get_with_token(&app, "/v1/auth/whoami", &token).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, generic_unauthorized());
    }

    #[tokio::test]
    async fn test_token_valid_until_last_second() {
        let app = TestApp::new();
        let token = app.token_for(Role::Student);

        app.clock.advance(TEST_TTL - 1);
        let (status, _) = get_with_token(&app, "/v1/auth/whoami", &token).await;
        assert_eq!(status, StatusCode::OK);

        app.clock.advance(1);
        let (status, _) = get_with_token(&app, "/v1/auth/whoami", &token).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_token_issued_in_the_past_is_expired() {
        let app = TestApp::new();
        app.clock.set(START - 5_000 - TEST_TTL);
        let token = app.token_for(Role::Student);
        app.clock.set(START);

        let (status, body) = get_with_token(&app, "/v1/auth/whoami", &token).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, generic_unauthorized());
    }
}

mod test_role_gate {
    use super::*;

    #[tokio::test]
    async fn test_admin_route_by_role() {
        let app = TestApp::new();

        for role in Role::ALL {
            let token = app.token_for(role);
            let (status, body) = get_with_token(&app, "/v1/admin/session", &token).await;

            if role == Role::Admin {
                assert_eq!(status, StatusCode::OK);
                assert_eq!(body["role"], "admin");
            } else {
                assert_eq!(status, StatusCode::FORBIDDEN, "role {}", role);
                assert_eq!(body["error"]["code"], "FORBIDDEN");
                assert_eq!(body["error"]["message"], "Insufficient permissions");
            }
        }
    }

    #[tokio::test]
    async fn test_admin_route_without_token_is_unauthorized() {
        let app = TestApp::new();
        let resp = app
            .router()
            .oneshot(unauthed_request(Method::GET, "/v1/admin/session"))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_expired_admin_token_is_unauthorized_not_forbidden() {
        let app = TestApp::new();
        let token = app.token_for(Role::Admin);
        app.clock.advance(TEST_TTL);

        let (status, _) = get_with_token(&app, "/v1/admin/session", &token).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}

mod test_refresh {
    use super::*;

    #[tokio::test]
    async fn test_refresh_issues_later_expiring_token() {
        let app = TestApp::with_ttl(600);
        let original = app.auth.issue(&crate::common::identity_for(Role::Student), 60).unwrap();

        app.clock.advance(30);

        let resp = app
            .router()
            .oneshot(authed_request(Method::POST, "/v1/auth/refresh", &original))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = parse_body(resp).await;
        assert_eq!(body["token_type"], "Bearer");
        assert_eq!(body["expires_in"], 600);

        let refreshed = body["token"].as_str().unwrap().to_string();
        let claims = app.auth.verify(&refreshed).unwrap();
        assert_eq!(claims.identity(), crate::common::identity_for(Role::Student));
        assert_eq!(claims.issued_at, START + 30);
        assert_eq!(claims.expires_at, START + 30 + 600);

        // Original dies on schedule; the refreshed one keeps working
        app.clock.advance(30);
        let (status, _) = get_with_token(&app, "/v1/auth/whoami", &original).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let (status, _) = get_with_token(&app, "/v1/auth/whoami", &refreshed).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_refresh_requires_valid_token() {
        let app = TestApp::new();
        let resp = app
            .router()
            .oneshot(unauthed_request(Method::POST, "/v1/auth/refresh"))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
