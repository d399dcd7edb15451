// Authentication handling for the route tester
// Infers which routes are gated by the `auth` plugin and attaches credentials to probes

use crate::models::{Plugin, Route, Service};

/// Name of the plugin that marks a route as authenticated.
pub const AUTH_PLUGIN: &str = "auth";

fn has_auth_plugin(plugins: &[Plugin]) -> bool {
    plugins.iter().any(|p| p.name == AUTH_PLUGIN)
}

/// A route requires auth iff the route or its owning service carries the `auth` plugin.
pub fn requires_auth(route: &Route, service: &Service) -> bool {
    has_auth_plugin(&route.plugins) || has_auth_plugin(&service.plugins)
}

pub trait AuthStrategy {
    fn apply_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder;
}

/// Sends `Authorization: Bearer <token>`.
pub struct BearerAuth {
    pub token: String,
}

impl AuthStrategy for BearerAuth {
    fn apply_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.bearer_auth(&self.token)
    }
}
