// Core data models for the route tester
// Declarative Kong configuration, derived probes, and recorded outcomes

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// HTTP methods a route can declare
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    GET,
    POST,
    PUT,
    DELETE,
    PATCH,
    OPTIONS,
    HEAD,
    /// Any other token Kong accepts (TRACE, CONNECT, custom verbs)
    Other(String),
}

impl Method {
    /// Methods a route accepts when it declares none.
    pub fn default_set() -> Vec<Method> {
        vec![Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::PATCH]
    }

    /// POST, PUT and PATCH probes are sent with a JSON body.
    pub fn carries_body(&self) -> bool {
        matches!(self, Method::POST | Method::PUT | Method::PATCH)
    }

    pub fn to_reqwest(&self) -> Result<reqwest::Method, ProbeError> {
        reqwest::Method::from_bytes(self.to_string().as_bytes())
            .map_err(|_| ProbeError::InvalidMethod(self.to_string()))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::GET => write!(f, "GET"),
            Method::POST => write!(f, "POST"),
            Method::PUT => write!(f, "PUT"),
            Method::DELETE => write!(f, "DELETE"),
            Method::PATCH => write!(f, "PATCH"),
            Method::OPTIONS => write!(f, "OPTIONS"),
            Method::HEAD => write!(f, "HEAD"),
            Method::Other(name) => write!(f, "{}", name),
        }
    }
}

impl From<&str> for Method {
    fn from(s: &str) -> Self {
        let upper = s.trim().to_ascii_uppercase();
        match upper.as_str() {
            "GET" => Method::GET,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            "PATCH" => Method::PATCH,
            "OPTIONS" => Method::OPTIONS,
            "HEAD" => Method::HEAD,
            _ => Method::Other(upper),
        }
    }
}

impl FromStr for Method {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Method::from(s))
    }
}

/// Treat an explicit YAML `null` the same as a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A Kong declarative configuration document.
///
/// Built once per run and never mutated afterwards. Unknown top-level keys
/// (`consumers`, `upstreams`, ...) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Configuration {
    #[serde(rename = "_format_version", default)]
    pub format_version: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub services: Vec<Service>,
}

/// An upstream grouping of routes with optional shared plugins.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Service {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    /// Informational only; probes go to the base URL from [`TestConfig`].
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
    #[serde(default, deserialize_with = "nullable")]
    pub plugins: Vec<Plugin>,
    #[serde(default, deserialize_with = "nullable")]
    pub routes: Vec<Route>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Route {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub paths: Vec<String>,
    /// Empty means the route accepts every method in [`Method::default_set`].
    #[serde(default, deserialize_with = "nullable")]
    pub methods: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub hosts: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub plugins: Vec<Plugin>,
    #[serde(rename = "regex_priority", default, deserialize_with = "nullable")]
    pub priority: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Plugin {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub config: BTreeMap<String, Value>,
}

impl Plugin {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            config: BTreeMap::new(),
        }
    }
}

/// One concrete request synthesized from a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
    pub service: String,
    pub route: String,
    pub path: String,
    pub method: Method,
    pub auth_required: bool,
}

/// Why a probe never produced a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("invalid HTTP method: {0}")]
    InvalidMethod(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("request failed: {0}")]
    Request(String),
    #[error("failed to read response body: {0}")]
    Body(String),
}

impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProbeError::Timeout(err.to_string())
        } else if err.is_connect() {
            ProbeError::Connect(err.to_string())
        } else if err.is_body() || err.is_decode() {
            ProbeError::Body(err.to_string())
        } else {
            ProbeError::Request(err.to_string())
        }
    }
}

/// Marker message carried by every dry-run outcome.
pub const DRY_RUN_MARKER: &str = "DRY RUN";

/// The recorded result of executing one probe.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub probe: Probe,
    /// 0 when no response was received.
    pub status: u16,
    pub error: Option<ProbeError>,
    pub message: Option<String>,
    pub elapsed: Duration,
}

impl Outcome {
    pub fn dry_run(probe: Probe) -> Self {
        Self {
            probe,
            status: 0,
            error: None,
            message: Some(DRY_RUN_MARKER.to_string()),
            elapsed: Duration::ZERO,
        }
    }

    pub fn failed(probe: Probe, error: ProbeError, elapsed: Duration) -> Self {
        Self {
            probe,
            status: 0,
            error: Some(error),
            message: None,
            elapsed,
        }
    }

    pub fn is_dry_run(&self) -> bool {
        self.status == 0 && self.error.is_none() && self.message.as_deref() == Some(DRY_RUN_MARKER)
    }
}

/// Run settings, fixed at the CLI boundary and passed into the engine by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct TestConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub test_auth_routes: bool,
    pub test_unauth_routes: bool,
    pub verbose: bool,
    pub dry_run: bool,
    /// 0 means unlimited.
    pub max_requests: usize,
    pub request_timeout: Duration,
    /// Unconditional delay between two consecutive requests.
    pub pacing: Duration,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            token: None,
            test_auth_routes: true,
            test_unauth_routes: true,
            verbose: false,
            dry_run: false,
            max_requests: 0,
            request_timeout: Duration::from_secs(10),
            pacing: Duration::from_millis(100),
        }
    }
}

impl TestConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// An empty token is the same as no token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = if token.is_empty() { None } else { Some(token) };
        self
    }

    pub fn with_route_filter(mut self, test_auth_routes: bool, test_unauth_routes: bool) -> Self {
        self.test_auth_routes = test_auth_routes;
        self.test_unauth_routes = test_unauth_routes;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_max_requests(mut self, max_requests: usize) -> Self {
        self.max_requests = max_requests;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Whether a route with the given classification is selected for testing.
    pub fn selects(&self, auth_required: bool) -> bool {
        if auth_required {
            self.test_auth_routes
        } else {
            self.test_unauth_routes
        }
    }
}
