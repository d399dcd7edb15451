// Outcome classification
// Decides whether a probe succeeded, hit an auth wall, or failed otherwise

use crate::models::Outcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeClass {
    /// 2xx or 3xx.
    Success,
    /// 401.
    AuthFailed,
    /// Any other status >= 400, or a transport error.
    OtherError,
    /// Status 0 without an error (dry runs). Counted in no bucket.
    Unclassified,
}

/// Classify from status and whether the request failed in transport.
///
/// Rules, in order:
/// 1. 200..400 = Success
/// 2. 401 = AuthFailed
/// 3. >= 400, or transport error = OtherError
/// 4. anything else = Unclassified
pub fn classify_status(status: u16, transport_error: bool) -> OutcomeClass {
    match status {
        200..=399 => OutcomeClass::Success,
        401 => OutcomeClass::AuthFailed,
        400..=u16::MAX => OutcomeClass::OtherError,
        _ if transport_error => OutcomeClass::OtherError,
        _ => OutcomeClass::Unclassified,
    }
}

pub fn classify(outcome: &Outcome) -> OutcomeClass {
    classify_status(outcome.status, outcome.error.is_some())
}

/// A public route answering 401: the auth requirement inferred from the
/// config does not match what the gateway enforces.
pub fn is_anomalous(outcome: &Outcome) -> bool {
    outcome.status == 401 && !outcome.probe.auth_required
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_ranges() {
        assert_eq!(classify_status(200, false), OutcomeClass::Success);
        assert_eq!(classify_status(204, false), OutcomeClass::Success);
        assert_eq!(classify_status(302, false), OutcomeClass::Success);
        assert_eq!(classify_status(399, false), OutcomeClass::Success);
        assert_eq!(classify_status(401, false), OutcomeClass::AuthFailed);
        assert_eq!(classify_status(400, false), OutcomeClass::OtherError);
        assert_eq!(classify_status(403, false), OutcomeClass::OtherError);
        assert_eq!(classify_status(503, false), OutcomeClass::OtherError);
    }

    #[test]
    fn transport_failures_are_errors() {
        assert_eq!(classify_status(0, true), OutcomeClass::OtherError);
    }

    #[test]
    fn zero_without_error_is_unclassified() {
        assert_eq!(classify_status(0, false), OutcomeClass::Unclassified);
        assert_eq!(classify_status(101, false), OutcomeClass::Unclassified);
    }
}
