pub mod refresh;

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::models::Identity;
use crate::session::{LoggingNavigator, MemorySessionStore, Navigator, SessionStore};

use refresh::{RefreshGate, RefreshStatus, RefreshTicket};

/// API client with cookie-based session auth.
///
/// Any request that comes back 401 (outside the refresh/login endpoints)
/// triggers one coordinated session refresh and is retried exactly once;
/// a second 401 propagates to the caller. When the refresh itself fails,
/// the cached identity is cleared and the navigator is sent to the login
/// screen, once per failed cycle.
///
/// Cloning is cheap and clones share the same session, cookies, and
/// refresh coordination.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    config: Config,
    session: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    gate: RefreshGate,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    user: Identity,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl ApiClient {
    /// Client with an in-memory session store and a log-only navigator.
    pub fn new(config: Config) -> ApiResult<Self> {
        Self::with_hooks(
            config,
            Arc::new(MemorySessionStore::default()),
            Arc::new(LoggingNavigator),
        )
    }

    /// Client with caller-supplied session persistence and login navigation.
    pub fn with_hooks(
        config: Config,
        session: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                config,
                session,
                navigator,
                gate: RefreshGate::default(),
            }),
        })
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// The locally cached identity, if a session has been established.
    pub fn current_user(&self) -> Option<Identity> {
        self.inner.session.load_user()
    }

    /// Establish a session. Excluded from the refresh protocol: a 401 here
    /// means bad credentials and propagates directly.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<Identity> {
        let url = self.url(&self.inner.config.auth_path("login"));
        let resp = self
            .inner
            .http
            .post(&url)
            .json(&LoginRequest { email, password })
            .send()
            .await?;
        let login: LoginResponse = Self::decode(resp).await?;

        self.inner.session.save_user(&login.user);
        Ok(login.user)
    }

    /// Terminate the session. The cached identity is cleared whether or not
    /// the server call succeeds.
    pub async fn logout(&self) -> ApiResult<()> {
        let path = self.inner.config.auth_path("logout");
        let url = self.url(&path);
        let result = self.send_with_recovery(&path, |http| http.post(&url)).await;
        self.inner.session.clear_user();

        match result {
            Ok(resp) if resp.status().is_success() => Ok(()),
            Ok(resp) => Err(Self::error_for(resp).await),
            Err(err) => Err(err),
        }
    }

    /// Manually refresh the session, reporting success.
    ///
    /// Runs outside the coordinated recovery path and has no side effects
    /// on failure; explicit "resume session" flows decide what to do next.
    pub async fn refresh_session(&self) -> bool {
        match self.call_refresh().await {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(error = %err, "manual session refresh failed");
                false
            }
        }
    }

    /// Probe the identity endpoint; any failure is reported as `false`.
    ///
    /// On success the returned identity replaces the cached one.
    pub async fn check_session_valid(&self) -> bool {
        let path = self.inner.config.auth_path("me");
        let url = self.url(&path);
        let result = self.send_with_recovery(&path, |http| http.get(&url)).await;

        match result {
            Ok(resp) if resp.status().is_success() => match resp.json::<Identity>().await {
                Ok(user) => {
                    self.inner.session.save_user(&user);
                    true
                }
                Err(_) => false,
            },
            _ => false,
        }
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.url(path);
        let resp = self.send_with_recovery(path, |http| http.get(&url)).await?;
        Self::decode(resp).await
    }

    pub(crate) async fn get_json_query<T, Q>(&self, path: &str, query: &Q) -> ApiResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.url(path);
        let resp = self
            .send_with_recovery(path, |http| http.get(&url).query(query))
            .await?;
        Self::decode(resp).await
    }

    pub(crate) async fn post_json<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        let resp = self
            .send_with_recovery(path, |http| http.post(&url).json(body))
            .await?;
        Self::decode(resp).await
    }

    pub(crate) async fn put_json<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        let resp = self
            .send_with_recovery(path, |http| http.put(&url).json(body))
            .await?;
        Self::decode(resp).await
    }

    pub(crate) async fn delete_empty(&self, path: &str) -> ApiResult<()> {
        let url = self.url(path);
        let resp = self
            .send_with_recovery(path, |http| http.delete(&url))
            .await?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_for(resp).await)
        }
    }

    /// Send a request, recovering once from an expired session.
    ///
    /// The builder closure is invoked per attempt so the retry is a fresh
    /// request, not a reuse of a consumed one.
    async fn send_with_recovery<F>(&self, path: &str, build: F) -> ApiResult<reqwest::Response>
    where
        F: Fn(&reqwest::Client) -> reqwest::RequestBuilder,
    {
        let mut retried = false;
        loop {
            let resp = build(&self.inner.http).send().await?;

            if resp.status() == StatusCode::UNAUTHORIZED
                && !retried
                && !self.is_refresh_exempt(path)
            {
                self.recover_session().await?;
                retried = true;
                continue;
            }

            return Ok(resp);
        }
    }

    /// Refresh and login calls never join the refresh cycle; their
    /// failures propagate directly.
    fn is_refresh_exempt(&self, path: &str) -> bool {
        path == self.inner.config.auth_path("refresh")
            || path == self.inner.config.auth_path("login")
    }

    /// Join the current refresh cycle, driving it if this call arrived first.
    ///
    /// Only the owner performs the failure side effects (cache clear and
    /// login redirect), so they happen once per failed cycle no matter how
    /// many requests were blocked on it.
    async fn recover_session(&self) -> ApiResult<()> {
        match self.inner.gate.join().await {
            RefreshTicket::Owner(tx) => {
                tracing::debug!("session expired, refreshing");
                match self.call_refresh().await {
                    Ok(()) => {
                        self.inner.gate.settle(tx, RefreshStatus::Succeeded).await;
                        Ok(())
                    }
                    Err(err) => {
                        let reason = err.to_string();
                        self.inner
                            .gate
                            .settle(tx, RefreshStatus::Failed(reason.clone()))
                            .await;
                        self.force_logout();
                        Err(ApiError::SessionExpired(reason))
                    }
                }
            }
            RefreshTicket::Waiter(rx) => match RefreshGate::wait(rx).await {
                RefreshStatus::Succeeded => Ok(()),
                RefreshStatus::Failed(reason) => Err(ApiError::SessionExpired(reason)),
                // wait only resolves once the cycle has settled
                RefreshStatus::Pending => {
                    Err(ApiError::SessionExpired("refresh abandoned".to_string()))
                }
            },
        }
    }

    /// One refresh call, bounded by the configured timeout.
    async fn call_refresh(&self) -> ApiResult<()> {
        let url = self.url(&self.inner.config.auth_path("refresh"));
        let timeout = Duration::from_secs(self.inner.config.refresh_timeout_secs);

        let resp = tokio::time::timeout(timeout, self.inner.http.post(&url).send())
            .await
            .map_err(|_| ApiError::SessionExpired("refresh timed out".to_string()))??;

        if resp.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_for(resp).await)
        }
    }

    fn force_logout(&self) {
        self.inner.session.clear_user();
        if !self.inner.navigator.at_login() {
            self.inner.navigator.goto_login();
        }
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> ApiResult<T> {
        if resp.status().is_success() {
            Ok(resp.json::<T>().await?)
        } else {
            Err(Self::error_for(resp).await)
        }
    }

    async fn error_for(resp: reqwest::Response) -> ApiError {
        let status = resp.status();
        let message = match resp.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        };

        if status == StatusCode::UNAUTHORIZED {
            ApiError::Unauthorized(message)
        } else {
            ApiError::Server {
                status: status.as_u16(),
                message,
            }
        }
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}{}",
            self.inner.config.api_base_url.trim_end_matches('/'),
            path
        )
    }
}
