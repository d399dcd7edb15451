// Probe planning
//
// Derives the ordered list of probes for a configuration:
// services -> routes -> declared paths -> methods.
//
// - Infrastructure services (see is_infrastructure_service) are never probed
// - A route is skipped when the TestConfig toggle for its auth class is off
// - Routes without methods get Method::default_set()
// - Paths with named captures are materialized
//
// The request budget is not applied here; the engine enforces it while executing.

use crate::auth::requires_auth;
use crate::materialize::concrete_path;
use crate::models::{Configuration, Method, Probe, Route, Service, TestConfig};

/// Non-production services that are skipped by exact name.
pub const SKIPPED_SERVICES: &[&str] = &["atlantis", "atlantis-legacy"];

pub fn is_infrastructure_service(name: &str) -> bool {
    name.contains("test") || name.contains("health-check") || SKIPPED_SERVICES.contains(&name)
}

/// Methods to probe for a route, in declaration order.
pub fn route_methods(route: &Route) -> Vec<Method> {
    if route.methods.is_empty() {
        return Method::default_set();
    }
    route.methods.iter().map(|m| Method::from(m.as_str())).collect()
}

/// Probes for a single route of `service`.
pub fn route_probes(service: &Service, route: &Route) -> Vec<Probe> {
    let auth_required = requires_auth(route, service);
    let methods = route_methods(route);

    let mut probes = Vec::with_capacity(route.paths.len() * methods.len());
    for template in &route.paths {
        let path = concrete_path(template);
        for method in &methods {
            probes.push(Probe {
                service: service.name.clone(),
                route: route.name.clone(),
                path: path.clone(),
                method: method.clone(),
                auth_required,
            });
        }
    }
    probes
}

/// Every probe selected by `test_config`, in execution order.
pub fn plan(config: &Configuration, test_config: &TestConfig) -> Vec<Probe> {
    let mut probes = Vec::new();

    for service in &config.services {
        if is_infrastructure_service(&service.name) {
            tracing::info!(service = %service.name, "Skipping infrastructure service");
            continue;
        }

        for route in &service.routes {
            let auth_required = requires_auth(route, service);
            if !test_config.selects(auth_required) {
                tracing::debug!(
                    service = %service.name,
                    route = %route.name,
                    auth_required,
                    "Route filtered out by auth toggle"
                );
                continue;
            }
            probes.extend(route_probes(service, route));
        }
    }

    probes
}
