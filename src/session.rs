use crate::{
    endpoints, transport::Transport, Config, Credentials, Error, Event,
    FinanceAccount, FinanceClient, FinancePeriod, LogObserver, Observer,
    Person, Relationship,
};
use serde::Serialize;
use serde_derive::Deserialize;
use std::{
    fmt::Debug,
    sync::Arc,
    time::{Duration, SystemTime},
};

/// The `build` and `version` reported by the server's `info` resource.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerInfo {
    pub build: String,
    pub version: String,
}

/// The credential an authenticated request is sent with.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CredentialKind {
    /// `Authorization: Login {token}`.
    Token,
    /// The session cookie handed out by the server.
    Cookie,
}

/// A cookie captured from a `Set-Cookie` response header.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
    pub domain: Option<String>,
    pub path: Option<String>,
    pub expires: Option<SystemTime>,
    pub max_age: Option<Duration>,
    pub secure: bool,
    pub http_only: bool,
}

impl SessionCookie {
    /// The value to send back in a `Cookie` header.
    pub fn header_value(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

impl<'a> From<&reqwest::cookie::Cookie<'a>> for SessionCookie {
    fn from(cookie: &reqwest::cookie::Cookie<'a>) -> SessionCookie {
        SessionCookie {
            name: cookie.name().to_string(),
            value: cookie.value().to_string(),
            domain: cookie.domain().map(String::from),
            path: cookie.path().map(String::from),
            expires: cookie.expires(),
            max_age: cookie.max_age(),
            secure: cookie.secure(),
            http_only: cookie.http_only(),
        }
    }
}

/// An authenticated connection to a ChurchTools server.
///
/// The only way to get a [`Session`] is [`Session::login()`], so holding one
/// means the server answered the `info` request, we know who we are logged
/// in as, and a login token or session cookie is available.
#[derive(Debug)]
pub struct Session {
    credentials: Credentials,
    info: ServerInfo,
    person_id: u64,
    transport: Transport,
}

impl Session {
    /// Log in, reporting progress to the [`log`] crate.
    pub async fn login(config: Config) -> Result<Session, Error> {
        Session::login_observed(config, Arc::new(LogObserver)).await
    }

    /// Log in, sending lifecycle [`Event`]s to `observer`.
    ///
    /// The steps are:
    ///
    /// 1. build the HTTP client, trusting only the configured CA bundle
    /// 2. fetch the unauthenticated `info` resource
    /// 3. send the username and password to `login` (skipped if
    ///    [`Config::reuse_identity()`] was used)
    /// 4. exchange the login session for a login token, as permitted by the
    ///    [`crate::TokenPolicy`]
    ///
    /// Each step must succeed before the next one is attempted.
    pub async fn login_observed(
        config: Config,
        observer: Arc<dyn Observer>,
    ) -> Result<Session, Error> {
        let mut transport = Transport::new(&config, observer)?;

        let info = endpoints::get_info(&transport).await?;
        transport.observer().notify(&Event::ServerInfoFetched(&info));

        let person_id = match config.reused_identity {
            Some(person_id) => {
                transport
                    .observer()
                    .notify(&Event::IdentityReused { person_id });
                person_id
            },
            None => {
                let login = endpoints::login(
                    &mut transport,
                    config.credentials.username(),
                    config.credentials.password(),
                )
                .await?;
                transport.observer().notify(&Event::LoggedIn {
                    person_id: login.person_id,
                    status: login.status.as_deref(),
                });
                login.person_id
            },
        };

        let policy = config.token_policy;
        if policy.should_fetch(transport.cookie().is_some()) {
            let token =
                endpoints::get_login_token(&transport, person_id).await?;
            transport.set_token(token);
            transport
                .observer()
                .notify(&Event::LoginTokenIssued { person_id });
        } else {
            transport
                .observer()
                .notify(&Event::LoginTokenSkipped { policy });
        }

        let credential =
            transport.credential_kind().ok_or(Error::NoCredential)?;
        transport.observer().notify(&Event::Ready {
            person_id,
            credential,
        });

        Ok(Session {
            credentials: config.credentials,
            info,
            person_id,
            transport,
        })
    }

    pub fn credentials(&self) -> &Credentials { &self.credentials }

    pub fn server_info(&self) -> &ServerInfo { &self.info }

    /// The URL `api/...` resources are resolved against.
    pub fn base_url(&self) -> &url::Url { self.transport.base_url() }

    /// The ID of the person we are logged in as.
    pub fn person_id(&self) -> u64 { self.person_id }

    pub fn token(&self) -> Option<&str> { self.transport.token() }

    pub fn cookie(&self) -> Option<&SessionCookie> { self.transport.cookie() }

    /// The credential the next authenticated request will carry.
    pub fn credential(&self) -> CredentialKind {
        // a Session is never constructed without one
        self.transport
            .credential_kind()
            .unwrap_or(CredentialKind::Cookie)
    }

    /// Send a `GET` request to `api/{resource}` and return the raw body.
    pub async fn get(
        &self,
        resource: &str,
        needs_auth: bool,
    ) -> Result<Vec<u8>, Error> {
        self.transport.get(resource, needs_auth).await
    }

    /// Send `payload` as JSON to `api/{resource}` and return the raw body.
    ///
    /// If the response sets any cookies, the first one becomes the session
    /// cookie.
    pub async fn post<P>(
        &mut self,
        resource: &str,
        payload: &P,
    ) -> Result<Vec<u8>, Error>
    where
        P: Debug + Serialize + ?Sized,
    {
        self.transport.post(resource, payload).await
    }

    /// Send a `DELETE` request to `api/{resource}` and return the raw body.
    pub async fn delete(&self, resource: &str) -> Result<Vec<u8>, Error> {
        self.transport.delete(resource).await
    }

    /// Every person visible to the logged in user, fetched page by page.
    pub async fn persons(&self) -> Result<Vec<Person>, Error> {
        endpoints::get_persons(&self.transport).await
    }

    pub async fn relationships(
        &self,
        person_id: u64,
    ) -> Result<Vec<Relationship>, Error> {
        endpoints::get_relationships(&self.transport, person_id).await
    }

    /// The finance accounts belonging to an accounting period.
    pub async fn finance_accounts(
        &self,
        accounting_period_id: u64,
    ) -> Result<Vec<FinanceAccount>, Error> {
        endpoints::get_finance_accounts(&self.transport, accounting_period_id)
            .await
    }

    pub async fn finance_clients(&self) -> Result<Vec<FinanceClient>, Error> {
        endpoints::get_finance_clients(&self.transport).await
    }

    pub async fn finance_periods(&self) -> Result<Vec<FinancePeriod>, Error> {
        endpoints::get_finance_periods(&self.transport).await
    }
}
