//! Authenticated request client with one-shot refresh and retry.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use crate::auth::{AccessToken, Credentials, Registration, Session, SessionObserver};
use crate::config::ClientConfig;
use crate::error::{AuthError, Error};
use crate::http::endpoints::{
    AUTHENTICATE, AuthenticationResponse, DEMO_RESOURCE, LOGOUT, REFRESH_TOKEN, REGISTER,
};
use crate::http::{HttpClient, RequestDescriptor};
use crate::types::ApiUrl;

/// Client for the authentication service and the resources it protects.
///
/// The client owns a [`Session`]; a token installed by
/// [`authenticate`](Self::authenticate), [`register`](Self::register), or
/// [`refresh`](Self::refresh) is sent with every later request from any
/// clone of the client.
///
/// Requests sent through [`fetch_with_retry`](Self::fetch_with_retry)
/// recover from a 401 or 403 by refreshing the session once and reissuing
/// the request once. Any other failure is returned unchanged.
///
/// # Example
///
/// ```no_run
/// use authgate::{ApiUrl, AuthClient, Credentials};
///
/// # async fn example() -> Result<(), authgate::Error> {
/// let api = ApiUrl::new("http://localhost:8080/api/v1")?;
/// let client = AuthClient::new(api)?;
/// client.authenticate(&Credentials::new("a@b.com", "x")).await?;
///
/// let hello = client.fetch_protected_resource("/demo-controller").await?;
/// println!("{}", hello);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AuthClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    session: Session,
    observer: Arc<dyn SessionObserver>,
}

impl AuthClient {
    /// Create a client for the service at `base` with default settings.
    pub fn new(base: ApiUrl) -> Result<Self, Error> {
        Self::with_config(ClientConfig::new(base))
    }

    /// Create a client from a full configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self, Error> {
        let http = HttpClient::new(&config)?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                session: Session::new(),
                observer: config.observer(),
            }),
        })
    }

    /// Returns the session shared by all clones of this client.
    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    /// Returns the base URL of the service.
    pub fn base(&self) -> &ApiUrl {
        self.inner.http.base()
    }

    /// Install a bearer token obtained elsewhere.
    pub async fn set_credential(&self, token: AccessToken) -> u64 {
        self.inner.session.set_credential(token).await
    }

    // ========================================================================
    // Session Operations
    // ========================================================================

    /// Log in and install the returned access token.
    ///
    /// # Errors
    ///
    /// [`AuthError::AuthenticationFailed`] if the service rejects the form,
    /// [`AuthError::MissingAccessToken`] if it accepts it without a token.
    #[instrument(skip(self, credentials), fields(email = %credentials.email()))]
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<(), Error> {
        info!("Authenticating");

        let request = RequestDescriptor::post(AUTHENTICATE, credentials)?;
        let token = self
            .exchange(&request, |status| AuthError::AuthenticationFailed { status })
            .await?;
        let generation = self.inner.session.set_credential(token).await;

        debug!(generation, "Authenticated");
        Ok(())
    }

    /// Register an account and install the returned access token.
    ///
    /// # Errors
    ///
    /// [`AuthError::RegistrationFailed`] if the service rejects the form,
    /// [`AuthError::MissingAccessToken`] if it accepts it without a token.
    #[instrument(skip(self, registration), fields(email = %registration.email()))]
    pub async fn register(&self, registration: &Registration) -> Result<(), Error> {
        info!("Registering account");

        let request = RequestDescriptor::post(REGISTER, registration)?;
        let token = self
            .exchange(&request, |status| AuthError::RegistrationFailed { status })
            .await?;
        let generation = self.inner.session.set_credential(token).await;

        debug!(generation, "Registered");
        Ok(())
    }

    /// Exchange the session cookie for a new access token.
    ///
    /// On failure the session observer is notified and the current token is
    /// left in place.
    ///
    /// # Errors
    ///
    /// Always [`AuthError::RefreshFailed`], whatever went wrong.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<(), Error> {
        let _guard = self.inner.session.lock_refresh().await;
        self.refresh_locked().await
    }

    /// End the session on the service. Failures are logged and ignored.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        let request = RequestDescriptor::get(LOGOUT);

        match self.send(&request).await {
            Ok(_) => info!("Logged out"),
            Err(e) => debug!(error = %e, "Logout failed, ignoring"),
        }
    }

    // ========================================================================
    // Requests
    // ========================================================================

    /// Send `request` once with the current credential. No refresh or retry.
    pub async fn send(&self, request: &RequestDescriptor) -> Result<reqwest::Response, Error> {
        let authorization = self.inner.session.authorization().await;
        self.inner
            .http
            .send(request, authorization.header.as_ref())
            .await
    }

    /// Send `request`, recovering from one 401/403 by refresh and retry,
    /// and return the response body as text.
    pub async fn fetch_with_retry(&self, request: &RequestDescriptor) -> Result<String, Error> {
        let response = self.send_with_retry(request).await?;
        Ok(response.text().await?)
    }

    /// Like [`fetch_with_retry`](Self::fetch_with_retry), decoding the body
    /// as JSON.
    pub async fn fetch_json_with_retry<T: DeserializeOwned>(
        &self,
        request: &RequestDescriptor,
    ) -> Result<T, Error> {
        let response = self.send_with_retry(request).await?;
        Ok(response.json::<T>().await?)
    }

    /// GET a protected resource with refresh and retry.
    pub async fn fetch_protected_resource(&self, path: &str) -> Result<String, Error> {
        self.fetch_with_retry(&RequestDescriptor::get(path)).await
    }

    /// GET the demo resource.
    pub async fn fetch_demo(&self) -> Result<String, Error> {
        self.fetch_protected_resource(DEMO_RESOURCE).await
    }

    /// At most one refresh and one retry per call.
    #[instrument(skip(self, request), fields(method = %request.method(), path = request.path()))]
    async fn send_with_retry(
        &self,
        request: &RequestDescriptor,
    ) -> Result<reqwest::Response, Error> {
        let authorization = self.inner.session.authorization().await;

        match self
            .inner
            .http
            .send(request, authorization.header.as_ref())
            .await
        {
            Ok(response) => return Ok(response),
            Err(Error::Protocol(e)) if e.is_auth_error() => {
                info!(status = e.status, "Authorization rejected, refreshing session");
            }
            Err(e) => return Err(e),
        }

        self.refresh_after(authorization.generation).await?;

        debug!("Retrying request with refreshed credential");
        let authorization = self.inner.session.authorization().await;
        self.inner
            .http
            .send(request, authorization.header.as_ref())
            .await
    }

    /// Refresh unless another task already replaced the credential we sent.
    async fn refresh_after(&self, seen_generation: u64) -> Result<(), Error> {
        let _guard = self.inner.session.lock_refresh().await;

        if self.inner.session.generation().await != seen_generation {
            debug!("Credential already replaced by another request, skipping refresh");
            return Ok(());
        }

        self.refresh_locked().await
    }

    /// Caller must hold the refresh gate.
    async fn refresh_locked(&self) -> Result<(), Error> {
        info!("Refreshing session");

        match self.request_refresh().await {
            Ok(token) => {
                let generation = self.inner.session.set_credential(token).await;
                debug!(generation, "Session refreshed successfully");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Session refresh failed, login required");
                self.inner.observer.session_expired(&e);
                Err(e.into())
            }
        }
    }

    async fn request_refresh(&self) -> Result<AccessToken, AuthError> {
        let request = RequestDescriptor::post_empty(REFRESH_TOKEN);

        let response = match self.send(&request).await {
            Ok(response) => response,
            Err(Error::Protocol(e)) => {
                return Err(AuthError::refresh_failed(
                    Some(e.status),
                    format!("service answered HTTP {}", e.status),
                ));
            }
            Err(e) => return Err(AuthError::refresh_failed(None, e.to_string())),
        };

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| AuthError::refresh_failed(Some(status), e.to_string()))?;
        let body: AuthenticationResponse = serde_json::from_str(&text)
            .map_err(|e| AuthError::refresh_failed(Some(status), format!("malformed body: {}", e)))?;

        let token = body.into_access_token().ok_or_else(|| {
            AuthError::refresh_failed(Some(status), "response did not contain an access token")
        })?;
        AccessToken::new(token)
            .map_err(|e| AuthError::refresh_failed(Some(status), e.to_string()))
    }

    /// Send a login-style request and pull the access token out of the reply.
    async fn exchange(
        &self,
        request: &RequestDescriptor,
        rejected: impl FnOnce(u16) -> AuthError,
    ) -> Result<AccessToken, Error> {
        let response = match self.send(request).await {
            Ok(response) => response,
            Err(Error::Protocol(e)) => return Err(rejected(e.status).into()),
            Err(e) => return Err(e),
        };

        let text = response.text().await?;
        let body: AuthenticationResponse =
            serde_json::from_str(&text).map_err(|_| AuthError::MissingAccessToken)?;

        let token = body
            .into_access_token()
            .ok_or(AuthError::MissingAccessToken)?;
        debug!("Access token received");
        AccessToken::new(token).map_err(|_| AuthError::MissingAccessToken.into())
    }
}

impl std::fmt::Debug for AuthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthClient")
            .field("base", self.inner.http.base())
            .field("session", &self.inner.session)
            .finish()
    }
}
