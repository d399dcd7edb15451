// Probe engine for the route tester
// Sequential reqwest requests under a request budget with fixed pacing

use crate::auth::{AuthStrategy, BearerAuth};
use crate::models::{Configuration, Outcome, Probe, ProbeError, TestConfig};
use crate::planner::plan;
use crate::response_analysis::extract_error_message;
use reqwest::header::CONTENT_TYPE;
use reqwest::{redirect, Client};
use std::time::Instant;

/// JSON body sent with POST, PUT and PATCH probes.
pub const SAMPLE_BODY: &str = r#"{"test": "data"}"#;

/// Counts issued probes against an optional cap. `limit == 0` is unlimited.
#[derive(Debug, Clone, Copy)]
pub struct RequestBudget {
    limit: usize,
    used: usize,
}

impl RequestBudget {
    pub fn new(limit: usize) -> Self {
        Self { limit, used: 0 }
    }

    /// Claim one request; false once the cap is reached.
    pub fn try_take(&mut self) -> bool {
        if self.limit > 0 && self.used >= self.limit {
            return false;
        }
        self.used += 1;
        true
    }

    pub fn used(&self) -> usize {
        self.used
    }
}

pub struct ProbeEngine {
    pub client: Client,
    config: TestConfig,
    auth: Option<BearerAuth>,
}

impl ProbeEngine {
    /// Build an engine whose client never follows redirects and times out
    /// each request after `config.request_timeout`.
    pub fn new(config: TestConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .redirect(redirect::Policy::none())
            .pool_max_idle_per_host(10)
            .build()?;
        let auth = config.token.clone().map(|token| BearerAuth { token });
        Ok(Self { client, config, auth })
    }

    pub fn config(&self) -> &TestConfig {
        &self.config
    }

    /// Derive probes from `configuration` and execute them in order.
    pub async fn execute(&self, configuration: &Configuration) -> Vec<Outcome> {
        self.execute_with(configuration, |_| {}).await
    }

    /// Like [`execute`](Self::execute), calling `on_outcome` as each outcome is recorded.
    ///
    /// Stops without error once `max_requests` probes have run.
    pub async fn execute_with<F>(&self, configuration: &Configuration, mut on_outcome: F) -> Vec<Outcome>
    where
        F: FnMut(&Outcome),
    {
        let probes = plan(configuration, &self.config);
        let mut budget = RequestBudget::new(self.config.max_requests);
        let mut outcomes = Vec::new();

        tracing::info!(
            planned = probes.len(),
            max_requests = self.config.max_requests,
            dry_run = self.config.dry_run,
            base_url = %self.config.base_url,
            "Starting route probes"
        );

        for probe in probes {
            if !budget.try_take() {
                tracing::info!(limit = self.config.max_requests, "Request budget exhausted");
                break;
            }

            let outcome = if self.config.dry_run {
                Outcome::dry_run(probe)
            } else {
                if budget.used() > 1 && !self.config.pacing.is_zero() {
                    tokio::time::sleep(self.config.pacing).await;
                }
                self.send(probe).await
            };

            on_outcome(&outcome);
            outcomes.push(outcome);
        }

        tracing::info!(executed = outcomes.len(), "Route probes finished");
        outcomes
    }

    /// Issue a single probe. Never retries; failures are recorded on the outcome.
    pub async fn send(&self, probe: Probe) -> Outcome {
        let url = format!("{}{}", self.config.base_url, probe.path);
        tracing::debug!(
            service = %probe.service,
            route = %probe.route,
            method = %probe.method,
            url = %url,
            auth_required = probe.auth_required,
            "Sending probe"
        );

        let started = Instant::now();
        let method = match probe.method.to_reqwest() {
            Ok(m) => m,
            Err(e) => return Outcome::failed(probe, e, started.elapsed()),
        };

        let mut req = self.client.request(method, &url);
        if probe.method.carries_body() {
            req = req.header(CONTENT_TYPE, "application/json").body(SAMPLE_BODY);
        }
        if probe.auth_required {
            if let Some(auth) = &self.auth {
                req = auth.apply_auth(req);
            }
        }

        let resp = match req.send().await {
            Ok(resp) => resp,
            Err(e) => {
                let error = ProbeError::from(e);
                tracing::warn!(method = %probe.method, url = %url, error = %error, "Probe failed");
                return Outcome::failed(probe, error, started.elapsed());
            }
        };

        let status = resp.status().as_u16();
        let mut outcome = Outcome {
            probe,
            status,
            error: None,
            message: None,
            elapsed: started.elapsed(),
        };

        if status >= 400 {
            match resp.text().await {
                Ok(body) => outcome.message = extract_error_message(&body),
                Err(e) => {
                    tracing::debug!(url = %url, error = %e, "Could not read error body");
                }
            }
            outcome.elapsed = started.elapsed();
        }

        outcome
    }
}
