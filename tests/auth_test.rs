mod common;

use common::{MockSpotify, settings_for, spawn};
use serde_json::json;
use spotstats::config::Settings;
use spotstats::management::CredentialStore;
use spotstats::spotify::auth::{self, TokenRequest};
use spotstats::spotify::build_client;
use spotstats::types::{Credentials, TokenResponse};
use tempfile::tempdir;

fn cached(access: Option<&str>, refresh: Option<&str>) -> Credentials {
    Credentials {
        access_token: access.map(str::to_string),
        refresh_token: refresh.map(str::to_string),
        ..Credentials::default()
    }
}

#[test]
fn test_refresh_token_takes_precedence() {
    let settings = Settings {
        auth_code: Some("code".to_string()),
        ..Settings::default()
    };

    let request = TokenRequest::for_credentials(&cached(Some("old"), Some("r1")), &settings);
    assert_eq!(
        request,
        Some(TokenRequest::Refresh {
            refresh_token: "r1".to_string()
        })
    );
}

#[test]
fn test_code_exchange_without_refresh_token() {
    let settings = Settings {
        auth_code: Some("code".to_string()),
        ..Settings::default()
    };

    let request = TokenRequest::for_credentials(&cached(Some("old"), None), &settings).unwrap();
    assert_eq!(request.grant_type(), "authorization_code");
    assert_eq!(
        request.form(),
        vec![
            ("grant_type", "authorization_code"),
            ("code", "code"),
            ("redirect_uri", "http://localhost/"),
        ]
    );
}

#[test]
fn test_no_grant_without_refresh_token_or_code() {
    assert_eq!(
        TokenRequest::for_credentials(&Credentials::default(), &Settings::default()),
        None
    );
}

#[test]
fn test_basic_auth_header() {
    assert_eq!(auth::basic_auth_header("id", "secret"), "Basic aWQ6c2VjcmV0");
}

#[test]
fn test_apply_keeps_refresh_token_when_not_reissued() {
    let mut credentials = cached(Some("old"), Some("r1"));
    auth::apply_token_response(
        &mut credentials,
        TokenResponse {
            access_token: Some("new".to_string()),
            ..TokenResponse::default()
        },
    );
    assert_eq!(credentials, cached(Some("new"), Some("r1")));

    auth::apply_token_response(
        &mut credentials,
        TokenResponse {
            access_token: Some("newer".to_string()),
            refresh_token: Some("r2".to_string()),
            ..TokenResponse::default()
        },
    );
    assert_eq!(credentials, cached(Some("newer"), Some("r2")));
}

#[tokio::test]
async fn test_get_token_refreshes_cached_token() {
    let mock = MockSpotify {
        token_response: json!({ "access_token": "fresh", "token_type": "Bearer", "expires_in": 3600 }),
        ..MockSpotify::default()
    };
    let base = spawn(mock.clone()).await;
    let dir = tempdir().unwrap();
    let settings = Settings {
        auth_code: Some("unused".to_string()),
        ..settings_for(&base, dir.path())
    };
    let store = CredentialStore::new(settings.cache_file.clone());
    store.save(&cached(Some("stale"), Some("r1"))).await.unwrap();

    let client = build_client(&settings).unwrap();
    let token = auth::get_token(&client, &settings, &store).await;

    assert_eq!(token.as_deref(), Some("fresh"));
    let recorded = mock.recorded();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].form["grant_type"], "refresh_token");
    assert_eq!(recorded[0].form["refresh_token"], "r1");
    assert!(!recorded[0].form.contains_key("code"));
    assert_eq!(
        recorded[0].authorization.as_deref(),
        Some("Basic Y2xpZW50OnNoaA==")
    );
    assert_eq!(store.load().await, cached(Some("fresh"), Some("r1")));
}

#[tokio::test]
async fn test_get_token_exchanges_code_on_first_run() {
    let mock = MockSpotify {
        token_response: json!({ "access_token": "first", "refresh_token": "r-new" }),
        ..MockSpotify::default()
    };
    let base = spawn(mock.clone()).await;
    let dir = tempdir().unwrap();
    let settings = Settings {
        auth_code: Some("one-time".to_string()),
        ..settings_for(&base, dir.path())
    };
    let store = CredentialStore::new(settings.cache_file.clone());

    let client = build_client(&settings).unwrap();
    let token = auth::get_token(&client, &settings, &store).await;

    assert_eq!(token.as_deref(), Some("first"));
    let recorded = mock.recorded();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].form["grant_type"], "authorization_code");
    assert_eq!(recorded[0].form["code"], "one-time");
    assert_eq!(recorded[0].form["redirect_uri"], "http://localhost/");
    assert_eq!(store.load().await, cached(Some("first"), Some("r-new")));
}

#[tokio::test]
async fn test_get_token_rejected_grant_clears_access_token() {
    let mock = MockSpotify {
        token_response: json!({ "error": "invalid_grant", "error_description": "Refresh token revoked" }),
        ..MockSpotify::default()
    };
    let base = spawn(mock.clone()).await;
    let dir = tempdir().unwrap();
    let settings = settings_for(&base, dir.path());
    let store = CredentialStore::new(settings.cache_file.clone());
    store.save(&cached(Some("stale"), Some("r1"))).await.unwrap();

    let client = build_client(&settings).unwrap();
    let token = auth::get_token(&client, &settings, &store).await;

    assert_eq!(token, None);
    assert_eq!(store.load().await, cached(None, Some("r1")));
}

#[tokio::test]
async fn test_get_token_unreachable_endpoint_keeps_cache() {
    let dir = tempdir().unwrap();
    let settings = Settings {
        token_url: "http://127.0.0.1:1/api/token".to_string(),
        ..settings_for("http://127.0.0.1:1", dir.path())
    };
    let store = CredentialStore::new(settings.cache_file.clone());
    store.save(&cached(Some("stale"), Some("r1"))).await.unwrap();

    let client = build_client(&settings).unwrap();
    let token = auth::get_token(&client, &settings, &store).await;

    assert_eq!(token.as_deref(), Some("stale"));
    assert_eq!(store.load().await, cached(Some("stale"), Some("r1")));
}

#[tokio::test]
async fn test_get_token_without_any_grant_still_persists() {
    let dir = tempdir().unwrap();
    let settings = settings_for("http://127.0.0.1:1", dir.path());
    let store = CredentialStore::new(settings.cache_file.clone());

    let client = build_client(&settings).unwrap();
    let token = auth::get_token(&client, &settings, &store).await;

    assert_eq!(token, None);
    assert!(settings.cache_file.is_file());
    assert_eq!(store.load().await, Credentials::default());
}
