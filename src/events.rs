//! Lifecycle notifications emitted while a [`crate::Session`] is set up and
//! used.

use crate::{CredentialKind, ServerInfo, TokenPolicy};
use url::Url;

/// Something noteworthy happened to the session.
#[derive(Debug, Copy, Clone, PartialEq)]
#[non_exhaustive]
pub enum Event<'a> {
    /// The HTTP client was built and the trust bundle loaded.
    TransportReady { base_url: &'a Url, certificates: usize },
    /// The `info` request succeeded.
    ServerInfoFetched(&'a ServerInfo),
    /// The server accepted the username and password.
    LoggedIn { person_id: u64, status: Option<&'a str> },
    /// The login request was skipped because the caller already knew who
    /// they are.
    IdentityReused { person_id: u64 },
    /// A login token was issued, subsequent requests will use it.
    LoginTokenIssued { person_id: u64 },
    /// The login token exchange was skipped.
    LoginTokenSkipped { policy: TokenPolicy },
    /// A response replaced the stored session cookie.
    CookieRefreshed { resource: &'a str, name: &'a str },
    /// The session is ready to make authenticated requests.
    Ready { person_id: u64, credential: CredentialKind },
}

/// Receives [`Event`]s as they happen.
pub trait Observer: Send + Sync {
    fn notify(&self, event: &Event<'_>);
}

impl<F> Observer for F
where
    F: Fn(&Event<'_>) + Send + Sync,
{
    fn notify(&self, event: &Event<'_>) { self(event) }
}

/// The default [`Observer`], which forwards every event to the [`log`]
/// crate.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn notify(&self, event: &Event<'_>) {
        match *event {
            Event::TransportReady {
                base_url,
                certificates,
            } => log::debug!(
                "Talking to {} (trusting {} certificates)",
                base_url,
                certificates
            ),
            Event::ServerInfoFetched(info) => log::info!(
                "Connected to ChurchTools {} (build {})",
                info.version,
                info.build
            ),
            Event::LoggedIn { person_id, status } => log::info!(
                "Logged in as person {} ({})",
                person_id,
                status.unwrap_or("no status")
            ),
            Event::IdentityReused { person_id } => {
                log::debug!("Reusing the identity of person {}", person_id)
            },
            Event::LoginTokenIssued { person_id } => {
                log::debug!("Received a login token for person {}", person_id)
            },
            Event::LoginTokenSkipped { policy } => log::debug!(
                "Not requesting a login token ({:?})",
                policy
            ),
            Event::CookieRefreshed { resource, name } => log::debug!(
                "The response from \"{}\" refreshed the \"{}\" cookie",
                resource,
                name
            ),
            Event::Ready {
                person_id,
                credential,
            } => log::debug!(
                "Session for person {} is ready, authenticating with {:?}",
                person_id,
                credential
            ),
        }
    }
}
