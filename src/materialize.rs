// Path materialization
//
// Turns a Kong regex path template into a concrete path that can be requested.
// Matching is literal substring replacement, not regex evaluation: each entry of
// REPLACEMENTS replaces every occurrence of its pattern text, in table order.
// Named captures come before the bare character classes they contain, so
// "(?<test_id>[0-9a-fA-F-]+)" becomes "test-id-123" rather than having its
// inner class rewritten first.
//
// Example:
//   Input:  "/api/v1/users/(?<user_id>[^/]+)/profile"
//   Output: "/api/v1/users/user123/profile"

/// Marker for a named capture group; only paths containing it are materialized
/// when probes are derived.
pub const NAMED_CAPTURE: &str = "(?<";

/// Ordered (pattern text, example value) table.
pub const REPLACEMENTS: &[(&str, &str)] = &[
    ("(?<client_id>[0-9a-fA-F-]+)", "3a45625e-fd29-47a5-8294-e30fe2d3d391"),
    ("(?<seat_id>[0-9a-fA-F-]+)", "123e4567-e89b-12d3-a456-426614174000"),
    ("(?<invite_token>[0-9a-fA-F-]+)", "987fcdeb-51a2-43e1-b210-0123456789ab"),
    ("(?<test_id>[0-9a-fA-F-]+)", "test-id-123"),
    ("(?<user_id>[^/]+)", "user123"),
    ("(?<embed_id>[0-9a-fA-F-]+)", "embed-456"),
    ("[0-9a-fA-F-]+", "abc123def456"),
    ("[a-zA-Z0-9_-]+", "test-value"),
    ("[^/]+", "example"),
    ("(.*)", "path"),
];

pub fn has_capture_syntax(template: &str) -> bool {
    template.contains(NAMED_CAPTURE)
}

/// Rewrite every known regex idiom in `template` to its example value.
pub fn materialize(template: &str) -> String {
    REPLACEMENTS
        .iter()
        .fold(template.to_string(), |path, (pattern, example)| {
            path.replace(pattern, example)
        })
}

/// The path a probe is sent to: materialized when it has a named capture, verbatim otherwise.
pub fn concrete_path(template: &str) -> String {
    if has_capture_syntax(template) {
        materialize(template)
    } else {
        template.to_string()
    }
}
