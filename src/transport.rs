//! The HTTP plumbing shared by every endpoint.

use crate::{
    session::{CredentialKind, SessionCookie},
    Config, ConfigError, Error, Event, Observer,
};
use reqwest::{
    header::{AUTHORIZATION, CONTENT_TYPE, COOKIE},
    Certificate, Client, Method, RequestBuilder, Response, StatusCode,
};
use serde::Serialize;
use std::{
    fmt::{self, Debug, Formatter},
    sync::Arc,
};
use url::Url;

/// The resource which must never be sent an existing credential.
pub(crate) const LOGIN_RESOURCE: &str = "login";

/// A HTTP client pointed at a ChurchTools instance, plus whatever credential
/// we have collected so far.
pub(crate) struct Transport {
    client: Client,
    base_url: Url,
    token: Option<String>,
    cookie: Option<SessionCookie>,
    observer: Arc<dyn Observer>,
}

impl Transport {
    /// Build the HTTP client, trusting only the certificates in the
    /// configured bundle.
    pub(crate) fn new(
        config: &Config,
        observer: Arc<dyn Observer>,
    ) -> Result<Transport, ConfigError> {
        config.credentials.validate()?;
        let base_url = config.resolve_base_url()?;
        let certificates = load_trust_bundle(config)?;
        let certificate_count = certificates.len();

        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout)
            .pool_idle_timeout(config.idle_timeout)
            .tls_built_in_root_certs(false);
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let client = certificates
            .into_iter()
            .fold(builder, |builder, cert| builder.add_root_certificate(cert))
            .build()
            .map_err(ConfigError::HttpClient)?;

        observer.notify(&Event::TransportReady {
            base_url: &base_url,
            certificates: certificate_count,
        });

        Ok(Transport {
            client,
            base_url,
            token: None,
            cookie: None,
            observer,
        })
    }

    pub(crate) fn base_url(&self) -> &Url { &self.base_url }

    pub(crate) fn token(&self) -> Option<&str> { self.token.as_deref() }

    pub(crate) fn cookie(&self) -> Option<&SessionCookie> {
        self.cookie.as_ref()
    }

    pub(crate) fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub(crate) fn observer(&self) -> &dyn Observer { &*self.observer }

    /// Which credential the next authenticated request would carry.
    pub(crate) fn credential_kind(&self) -> Option<CredentialKind> {
        if self.token.is_some() {
            Some(CredentialKind::Token)
        } else if self.cookie.is_some() {
            Some(CredentialKind::Cookie)
        } else {
            None
        }
    }

    pub(crate) fn url(&self, resource: &str) -> String {
        format!("{}api/{}", self.base_url, normalize(resource))
    }

    /// Send a `GET` request, optionally with the current credential.
    pub(crate) async fn get(
        &self,
        resource: &str,
        needs_auth: bool,
    ) -> Result<Vec<u8>, Error> {
        let request = self.request(Method::GET, resource, needs_auth);
        let response = self.send(resource, request).await?;

        read_body(resource, check_status(resource, response).await?).await
    }

    /// Send a JSON payload. Any cookie set by the response replaces the
    /// stored session cookie, even when the server rejects the request.
    pub(crate) async fn post<P>(
        &mut self,
        resource: &str,
        payload: &P,
    ) -> Result<Vec<u8>, Error>
    where
        P: Debug + Serialize + ?Sized,
    {
        let body = serde_json::to_vec(payload).map_err(Error::Encode)?;
        log::trace!("Payload: {:#?}", payload);

        let needs_auth = normalize(resource) != LOGIN_RESOURCE;
        let request =
            self.request(Method::POST, resource, needs_auth).body(body);
        let response = self.send(resource, request).await?;

        let first_cookie =
            response.cookies().next().map(|c| SessionCookie::from(&c));
        if let Some(cookie) = first_cookie {
            self.observer.notify(&Event::CookieRefreshed {
                resource,
                name: &cookie.name,
            });
            self.cookie = Some(cookie);
        }

        read_body(resource, check_status(resource, response).await?).await
    }

    /// Send a `DELETE` request with the current credential.
    pub(crate) async fn delete(&self, resource: &str) -> Result<Vec<u8>, Error> {
        let request = self.request(Method::DELETE, resource, true);
        let response = self.send(resource, request).await?;

        read_body(resource, check_status(resource, response).await?).await
    }

    pub(crate) fn request(
        &self,
        method: Method,
        resource: &str,
        needs_auth: bool,
    ) -> RequestBuilder {
        let request = self
            .client
            .request(method, self.url(resource))
            .header(CONTENT_TYPE, "application/json");

        if needs_auth {
            self.authorize(request)
        } else {
            request
        }
    }

    /// Attach the login token if we have one, otherwise fall back to the
    /// session cookie.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        if let Some(ref token) = self.token {
            request.header(AUTHORIZATION, format!("Login {}", token))
        } else if let Some(ref cookie) = self.cookie {
            request.header(COOKIE, cookie.header_value())
        } else {
            log::debug!("No credential available, sending the request as-is");
            request
        }
    }

    async fn send(
        &self,
        resource: &str,
        request: RequestBuilder,
    ) -> Result<Response, Error> {
        log::debug!("Sending a request to {}", self.url(resource));

        let response = request.send().await?;
        log::trace!("Status: {}", response.status());
        log::trace!("Headers: {:#?}", response.headers());

        Ok(response)
    }
}

impl Debug for Transport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("cookie", &self.cookie.as_ref().map(|c| &c.name))
            .finish()
    }
}

fn normalize(resource: &str) -> &str { resource.trim_start_matches('/') }

/// Turn a 401 or 403 into [`Error::Unauthorized`], everything else is handed
/// back untouched.
async fn check_status(
    resource: &str,
    response: Response,
) -> Result<Response, Error> {
    let status = response.status();
    if status != StatusCode::UNAUTHORIZED && status != StatusCode::FORBIDDEN {
        return Ok(response);
    }

    let body = response.text().await?;
    log::trace!("Response: {}", body);

    Err(Error::Unauthorized {
        resource: resource.to_string(),
        status,
        body,
    })
}

async fn read_body(
    resource: &str,
    response: Response,
) -> Result<Vec<u8>, Error> {
    let body = response.bytes().await?;
    log::trace!(
        "Response from {}: {}",
        resource,
        String::from_utf8_lossy(&body)
    );

    Ok(body.to_vec())
}

fn load_trust_bundle(config: &Config) -> Result<Vec<Certificate>, ConfigError> {
    let path = &config.trust_bundle;

    let pem = std::fs::read(path).map_err(|source| {
        ConfigError::ReadTrustBundle {
            path: path.clone(),
            source,
        }
    })?;
    let certificates = Certificate::from_pem_bundle(&pem).map_err(|source| {
        ConfigError::InvalidTrustBundle {
            path: path.clone(),
            source,
        }
    })?;

    if certificates.is_empty() {
        return Err(ConfigError::EmptyTrustBundle { path: path.clone() });
    }

    Ok(certificates)
}
