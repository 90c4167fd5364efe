use crate::{ConfigError, Credentials};
use std::{path::PathBuf, str::FromStr, time::Duration};
use url::Url;

/// Where the CA certificates are read from unless told otherwise.
pub const DEFAULT_TRUST_BUNDLE: &str = "/etc/ssl/certs/ca-certificates.crt";

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(10);

/// Everything needed to establish a [`crate::Session`].
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub(crate) credentials: Credentials,
    pub(crate) trust_bundle: PathBuf,
    pub(crate) request_timeout: Duration,
    pub(crate) idle_timeout: Duration,
    pub(crate) base_url: Option<Url>,
    pub(crate) user_agent: String,
    pub(crate) token_policy: TokenPolicy,
    pub(crate) reused_identity: Option<u64>,
    pub(crate) system_proxy: bool,
}

impl Config {
    pub fn new<H, U, P>(hostname: H, username: U, password: P) -> Self
    where
        H: Into<String>,
        U: Into<String>,
        P: Into<String>,
    {
        Config::from_credentials(Credentials::new(hostname, username, password))
    }

    pub fn from_credentials(credentials: Credentials) -> Self {
        Config {
            credentials,
            trust_bundle: PathBuf::from(DEFAULT_TRUST_BUNDLE),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            base_url: None,
            user_agent: String::from(crate::DEFAULT_USER_AGENT),
            token_policy: TokenPolicy::default(),
            reused_identity: None,
            system_proxy: true,
        }
    }

    /// Trust the CA certificates in this PEM file instead of
    /// [`DEFAULT_TRUST_BUNDLE`].
    pub fn trust_bundle<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.trust_bundle = path.into();
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// How long a pooled connection may sit idle before it is closed.
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Send requests to this URL instead of `https://{hostname}/`.
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    pub fn user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn token_policy(mut self, policy: TokenPolicy) -> Self {
        self.token_policy = policy;
        self
    }

    /// Skip the login request and act on behalf of a person we already know
    /// the ID for.
    pub fn reuse_identity(mut self, person_id: u64) -> Self {
        self.reused_identity = Some(person_id);
        self
    }

    /// Whether to honour the `HTTP_PROXY`/`HTTPS_PROXY` environment
    /// variables (the default).
    pub fn system_proxy(mut self, enabled: bool) -> Self {
        self.system_proxy = enabled;
        self
    }

    pub fn credentials(&self) -> &Credentials { &self.credentials }

    /// The URL every `api/...` resource is resolved against. Always ends in
    /// a `/`.
    pub fn resolve_base_url(&self) -> Result<Url, ConfigError> {
        let mut url = match self.base_url {
            Some(ref url) => url.clone(),
            None => {
                let raw = format!("https://{}/", self.credentials.hostname());
                Url::parse(&raw).map_err(|source| {
                    ConfigError::InvalidBaseUrl { url: raw, source }
                })?
            },
        };

        if url.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl {
                url: url.to_string(),
                source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
            });
        }

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(url)
    }
}

/// When to exchange the login session for a long-lived login token.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TokenPolicy {
    /// Always request `persons/{id}/logintoken` after logging in.
    Always,
    /// Only request a token when the login didn't give us a session cookie.
    WhenNoCookie,
    /// Never request a token, the session cookie is the credential.
    Never,
}

impl TokenPolicy {
    pub(crate) fn should_fetch(self, have_cookie: bool) -> bool {
        match self {
            TokenPolicy::Always => true,
            TokenPolicy::WhenNoCookie => !have_cookie,
            TokenPolicy::Never => false,
        }
    }
}

impl Default for TokenPolicy {
    fn default() -> TokenPolicy { TokenPolicy::Always }
}

impl FromStr for TokenPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<TokenPolicy, Self::Err> {
        match s {
            "always" => Ok(TokenPolicy::Always),
            "when-no-cookie" => Ok(TokenPolicy::WhenNoCookie),
            "never" => Ok(TokenPolicy::Never),
            other => Err(format!(
                "\"{}\" isn't a token policy (expected always, when-no-cookie or never)",
                other
            )),
        }
    }
}
