// Environment templating for Kong declarative configs
//
// Expands `${NAME}` and `${NAME:OP DEFAULT}` placeholders on the raw document
// text before it is parsed. This is a test-environment stand-in, not a shell
// expansion: the DEFAULT written in the placeholder is never consulted.
//
// Resolution order for each placeholder:
//   1. the environment variable NAME, when set and non-empty
//   2. SERVICE_ADDRESS_FALLBACK, when NAME contains "SERVICE_ADDRESS"
//   3. PLACEHOLDER_VALUE
//
// Example:
//   Input:  "url: ${API_URL:=http://localhost:8080}"   (API_URL unset)
//   Output: "url: http://placeholder"

use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// Substituted for unset variables whose name mentions SERVICE_ADDRESS.
pub const SERVICE_ADDRESS_FALLBACK: &str = "http://services.sms.community:10000";

/// Substituted for every other unset variable.
pub const PLACEHOLDER_VALUE: &str = "http://placeholder";

lazy_static! {
    // NAME, then an optional `:` + single operator char + default text.
    static ref PLACEHOLDER: Regex = Regex::new(r"\$\{([^:}]+)(:[^}]+)?\}").unwrap();
}

/// Resolve placeholders against the process environment.
pub fn resolve(raw: &str) -> String {
    resolve_with(raw, |name| std::env::var(name).ok())
}

/// Resolve placeholders using `lookup` in place of the process environment.
pub fn resolve_with<F>(raw: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    PLACEHOLDER
        .replace_all(raw, |caps: &Captures| {
            let name = &caps[1];
            match lookup(name) {
                Some(value) if !value.is_empty() => value,
                _ if name.contains("SERVICE_ADDRESS") => SERVICE_ADDRESS_FALLBACK.to_string(),
                _ => PLACEHOLDER_VALUE.to_string(),
            }
        })
        .into_owned()
}
