use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::Client;

use crate::{
    config::Settings,
    info,
    management::CredentialStore,
    types::{Credentials, TokenResponse},
    warning,
};

/// Grant sent to the token endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenRequest {
    /// Exchange a cached refresh token for a new access token.
    Refresh { refresh_token: String },
    /// First run: exchange the one-time authorization code.
    AuthorizationCode { code: String, redirect_uri: String },
}

impl TokenRequest {
    /// Picks the grant for the cached credentials.
    ///
    /// A cached refresh token always wins. Without one, the authorization
    /// code from the settings is used; `None` means neither is available.
    pub fn for_credentials(credentials: &Credentials, settings: &Settings) -> Option<Self> {
        if let Some(refresh_token) = credentials.refresh_token.as_ref().filter(|t| !t.is_empty()) {
            return Some(TokenRequest::Refresh {
                refresh_token: refresh_token.clone(),
            });
        }

        settings
            .auth_code
            .as_ref()
            .map(|code| TokenRequest::AuthorizationCode {
                code: code.clone(),
                redirect_uri: settings.redirect_uri.clone(),
            })
    }

    pub fn grant_type(&self) -> &'static str {
        match self {
            TokenRequest::Refresh { .. } => "refresh_token",
            TokenRequest::AuthorizationCode { .. } => "authorization_code",
        }
    }

    /// Form fields of the request body.
    pub fn form(&self) -> Vec<(&'static str, &str)> {
        let mut form = vec![("grant_type", self.grant_type())];
        match self {
            TokenRequest::Refresh { refresh_token } => {
                form.push(("refresh_token", refresh_token.as_str()));
            }
            TokenRequest::AuthorizationCode { code, redirect_uri } => {
                form.push(("code", code.as_str()));
                form.push(("redirect_uri", redirect_uri.as_str()));
            }
        }
        form
    }
}

/// `Authorization` header value for the client credentials.
pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    let encoded = STANDARD.encode(format!("{client_id}:{client_secret}"));
    format!("Basic {encoded}")
}

/// Posts a grant to the token endpoint.
///
/// Error statuses are not turned into errors here: the endpoint answers
/// them with a JSON body carrying `error` and `error_description`, which
/// the caller reports.
pub async fn request_token(
    client: &Client,
    settings: &Settings,
    request: &TokenRequest,
) -> Result<TokenResponse, reqwest::Error> {
    let res = client
        .post(&settings.token_url)
        .header(
            "Authorization",
            basic_auth_header(&settings.client_id, &settings.client_secret),
        )
        .form(&request.form())
        .send()
        .await?;

    res.json::<TokenResponse>().await
}

/// Merges a token response into the cached credentials.
///
/// The access token is always replaced. The refresh token is only replaced
/// when a new one was issued, otherwise the cached one stays valid.
pub fn apply_token_response(credentials: &mut Credentials, response: TokenResponse) {
    credentials.access_token = response.access_token;
    if let Some(refresh_token) = response.refresh_token {
        credentials.refresh_token = Some(refresh_token);
    }
}

/// Obtains the access token for this run.
///
/// Loads the credential cache, refreshes (or exchanges the authorization
/// code) and persists the result. Exchange failures are logged and do not
/// abort: the returned value is whatever access token the credentials hold
/// afterwards, possibly `None`, and later calls fail on their own.
pub async fn get_token(
    client: &Client,
    settings: &Settings,
    store: &CredentialStore,
) -> Option<String> {
    let mut credentials = store.load().await;

    match TokenRequest::for_credentials(&credentials, settings) {
        Some(request) => {
            info!("Requesting access token ({})...", request.grant_type());
            match request_token(client, settings, &request).await {
                Ok(response) => {
                    if let Some(err) = &response.error {
                        warning!(
                            "Token endpoint rejected the {} grant: {} {}",
                            request.grant_type(),
                            err,
                            response.error_description.as_deref().unwrap_or_default()
                        );
                    }
                    apply_token_response(&mut credentials, response);
                }
                Err(e) => warning!("Token exchange failed. Err: {}", e),
            }
        }
        None => warning!(
            "No refresh token cached and SPOTIFY_CODE is not set, continuing without a new token."
        ),
    }

    if let Err(e) = store.save(&credentials).await {
        warning!(
            "Failed to save credentials to {}. Err: {}",
            store.path().display(),
            e
        );
    }

    credentials.access_token
}
