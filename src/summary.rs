// Result aggregation
// Folds the outcome sequence into counts, breakdowns and the anomaly list

use crate::models::Outcome;
use crate::verdict::{classify, is_anomalous, OutcomeClass};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub total: usize,
    pub successful: usize,
    pub auth_failed: usize,
    pub other_errors: usize,
    /// Outcomes in no bucket (status 0 without an error, e.g. dry runs).
    pub unclassified: usize,
    pub by_status_code: BTreeMap<u16, usize>,
    pub by_service: BTreeMap<String, usize>,
    /// Public routes that answered 401, in execution order.
    pub anomalies: Vec<Outcome>,
}

impl Summary {
    /// Percentage of `total`; 0.0 when nothing ran.
    pub fn percent(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 / self.total as f64 * 100.0
        }
    }

    fn record(&mut self, outcome: &Outcome) {
        self.total += 1;
        *self.by_status_code.entry(outcome.status).or_insert(0) += 1;
        *self.by_service.entry(outcome.probe.service.clone()).or_insert(0) += 1;

        match classify(outcome) {
            OutcomeClass::Success => self.successful += 1,
            OutcomeClass::AuthFailed => self.auth_failed += 1,
            OutcomeClass::OtherError => self.other_errors += 1,
            OutcomeClass::Unclassified => self.unclassified += 1,
        }

        if is_anomalous(outcome) {
            self.anomalies.push(outcome.clone());
        }
    }
}

pub fn summarize(outcomes: &[Outcome]) -> Summary {
    let mut summary = Summary::default();
    for outcome in outcomes {
        summary.record(outcome);
    }
    summary
}
