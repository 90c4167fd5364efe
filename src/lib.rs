//! An unofficial interface to the ChurchTools REST API.
//!
//! Everything goes through a [`Session`], which is only handed out once the
//! login handshake has completed.
//!
//! ```rust,no_run
//! use churchtools::{Config, Session};
//!
//! # async fn run() -> Result<(), churchtools::Error> {
//! let config = Config::new("demo.church.tools", "alice", "hunter2");
//! let session = Session::login(config).await?;
//!
//! for person in session.persons().await? {
//!     println!("{} {}", person.first_name, person.last_name);
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

mod config;
mod credentials;
mod endpoints;
mod error;
mod events;
mod index;
mod session;
mod transport;

pub use config::{Config, TokenPolicy, DEFAULT_TRUST_BUNDLE};
pub use credentials::Credentials;
pub use endpoints::{
    DomainAttributes, Email, FinanceAccount, FinanceClient, FinancePeriod,
    LoginData, Meta, MetaPerson, Permissions, Person, Relationship, Relative,
};
pub use error::{ConfigError, Error};
pub use events::{Event, LogObserver, Observer};
pub use index::{FinanceIndex, PersonIndex};
pub use session::{CredentialKind, ServerInfo, Session, SessionCookie};

/// The default user agent to use when communicating with a ChurchTools
/// server.
pub const DEFAULT_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "-", env!("CARGO_PKG_VERSION"));
