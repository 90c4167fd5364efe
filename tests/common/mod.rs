//! An in-process stand-in for a ChurchTools server which hands out canned
//! responses and remembers every request it received.

#![allow(dead_code)]

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Method, Response, StatusCode, Uri},
    Router,
};
use churchtools::{Config, Event, Observer};
use hyper_util::{
    rt::{TokioExecutor, TokioIo},
    server::conn::auto,
    service::TowerToHyperService,
};
use rustls::pki_types::{pem::PemObject, CertificateDer, PrivateKeyDer};
use std::{
    collections::HashMap,
    net::SocketAddr,
    path::PathBuf,
    sync::{Arc, Mutex, Once},
};
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;
use url::Url;

static CRYPTO_INIT: Once = Once::new();

pub const PERSON_ID: u64 = 42;
pub const TOKEN: &str = "tok123";

/// A response to hand back for a particular request.
#[derive(Debug, Clone)]
pub struct Reply {
    status: u16,
    body: String,
    cookies: Vec<String>,
}

impl Reply {
    pub fn json(body: &str) -> Reply {
        Reply {
            status: 200,
            body: body.to_string(),
            cookies: Vec::new(),
        }
    }

    pub fn status(mut self, status: u16) -> Reply {
        self.status = status;
        self
    }

    /// Add a `Set-Cookie` header.
    pub fn cookie(mut self, cookie: &str) -> Reply {
        self.cookies.push(cookie.to_string());
        self
    }
}

/// What the server saw.
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub cookie: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl Recorded {
    pub fn line(&self) -> String { format!("{} {}", self.method, self.path) }
}

#[derive(Debug, Default)]
struct Inner {
    replies: Mutex<HashMap<(String, String), Reply>>,
    requests: Mutex<Vec<Recorded>>,
}

pub struct MockServer {
    addr: SocketAddr,
    scheme: &'static str,
    inner: Arc<Inner>,
}

impl MockServer {
    pub async fn start() -> MockServer {
        let inner = Arc::new(Inner::default());
        let app = Router::new().fallback(handle).with_state(Arc::clone(&inner));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        MockServer {
            addr,
            scheme: "http",
            inner,
        }
    }

    /// Serve over HTTPS with `server.pem`, a `localhost`/`127.0.0.1`
    /// certificate signed by `ca.pem`.
    pub async fn start_tls() -> MockServer {
        CRYPTO_INIT.call_once(|| {
            rustls::crypto::ring::default_provider()
                .install_default()
                .expect("failed to install crypto provider");
        });

        let certs = CertificateDer::pem_file_iter(fixture("server.pem"))
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        let key = PrivateKeyDer::from_pem_file(fixture("server.key")).unwrap();
        let tls = rustls::ServerConfig::builder()
            .with_no_client_auth()
            .with_single_cert(certs, key)
            .unwrap();
        let acceptor = TlsAcceptor::from(Arc::new(tls));

        let inner = Arc::new(Inner::default());
        let app = Router::new().fallback(handle).with_state(Arc::clone(&inner));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let acceptor = acceptor.clone();
                let app = app.clone();
                tokio::spawn(async move {
                    // clients that don't trust our certificate stop here
                    let stream = match acceptor.accept(stream).await {
                        Ok(stream) => stream,
                        Err(_) => return,
                    };
                    let _ = auto::Builder::new(TokioExecutor::new())
                        .serve_connection(
                            TokioIo::new(stream),
                            TowerToHyperService::new(app),
                        )
                        .await;
                });
            }
        });

        MockServer {
            addr,
            scheme: "https",
            inner,
        }
    }

    pub fn url(&self) -> Url {
        Url::parse(&format!("{}://{}/", self.scheme, self.addr)).unwrap()
    }

    /// Reply to `method path` (e.g. `GET /api/info`) with `reply`.
    pub fn on(&self, method: &str, path: &str, reply: Reply) {
        self.inner
            .replies
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), reply);
    }

    /// The canned responses for a login where everything goes to plan.
    pub fn happy_bootstrap(&self) {
        self.on(
            "GET",
            "/api/info",
            Reply::json(r#"{"build":"b1","version":"1.0"}"#),
        );
        self.on(
            "POST",
            "/api/login",
            Reply::json(r#"{"data":{"status":"ok","personId":42}}"#),
        );
        self.on(
            "GET",
            "/api/persons/42/logintoken",
            Reply::json(r#"{"data":"tok123"}"#),
        );
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.inner.requests.lock().unwrap().clone()
    }

    /// Every request as `METHOD /path?query`, in the order received.
    pub fn lines(&self) -> Vec<String> {
        self.requests().iter().map(Recorded::line).collect()
    }

    pub fn last(&self) -> Recorded {
        self.requests().pop().expect("No requests were received")
    }

    pub fn config(&self) -> Config {
        Config::new("demo.church.tools", "alice", "hunter2")
            .base_url(self.url())
            .trust_bundle(fixture("ca.pem"))
            .system_proxy(false)
    }
}

async fn handle(
    State(inner): State<Arc<Inner>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response<Body> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(String::from)
    };
    let path = uri
        .path_and_query()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    inner.requests.lock().unwrap().push(Recorded {
        method: method.to_string(),
        path: path.clone(),
        authorization: header("authorization"),
        cookie: header("cookie"),
        content_type: header("content-type"),
        body,
    });

    let reply = inner
        .replies
        .lock()
        .unwrap()
        .get(&(method.to_string(), path))
        .cloned();

    match reply {
        Some(reply) => {
            let mut response = Response::builder()
                .status(reply.status)
                .header("content-type", "application/json");
            for cookie in &reply.cookies {
                response = response.header("set-cookie", cookie.as_str());
            }
            response.body(Body::from(reply.body)).unwrap()
        },
        None => Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Body::empty())
            .unwrap(),
    }
}

pub fn fixture(name: &str) -> PathBuf {
    [env!("CARGO_MANIFEST_DIR"), "tests", "fixtures", name]
        .iter()
        .collect()
}

/// Remembers the [`Event`]s it was notified about.
#[derive(Debug, Default)]
pub struct Recorder {
    events: Mutex<Vec<&'static str>>,
}

impl Recorder {
    /// The name of each event, e.g. `"LoggedIn"`.
    pub fn kinds(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().clone()
    }
}

impl Observer for Recorder {
    fn notify(&self, event: &Event<'_>) {
        let kind = match event {
            Event::TransportReady { .. } => "TransportReady",
            Event::ServerInfoFetched(_) => "ServerInfoFetched",
            Event::LoggedIn { .. } => "LoggedIn",
            Event::IdentityReused { .. } => "IdentityReused",
            Event::LoginTokenIssued { .. } => "LoginTokenIssued",
            Event::LoginTokenSkipped { .. } => "LoginTokenSkipped",
            Event::CookieRefreshed { .. } => "CookieRefreshed",
            Event::Ready { .. } => "Ready",
            _ => "Other",
        };
        self.events.lock().unwrap().push(kind);
    }
}
