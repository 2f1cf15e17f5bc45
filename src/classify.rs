//! Diagnostic message classification.
//!
//! Maps a raw diagnostic string to a stable category id through an
//! ordered table of literal patterns. The id strings are an external
//! interface: downstream tooling keys on them, so entries must never be
//! renamed and table order must stay auditable.

/// Category id returned when no rule matches.
pub const FALLBACK_CATEGORY: &str = "other";

/// Prefix-match rules, evaluated first, in order. Longer or more
/// specific entries precede any broader ones that could also match.
pub const PREFIX_RULES: &[(&str, &str)] = &[
    // info channel
    ("undefined reference to function", "undefined-function-reference"),
    ("undefined reference to variable", "undefined-variable-reference"),
    ("calling external", "calling-external"),
    ("calling __user_main with extra arguments", "calling-user-main"),
    ("Large alloc", "large-alloc"),
    ("execve", "execve"),
    ("executable has module level assembly", "module-level-assembly"),
    // failure channel
    ("unable to load symbol", "symbol-loading"),
    ("failed external call", "external-call"),
];

/// Substring-match rules, evaluated after the prefix table, in order.
pub const SUBSTRING_RULES: &[(&str, &str)] = &[
    ("has inline asm", "inline-asm"),
    ("silently ignoring", "silently-ignoring"),
    ("when main() has less than two arguments", "posix-runtime"),
];

/// Classify a raw diagnostic message into a stable category id.
///
/// First match wins: prefix rules in table order, then substring rules
/// in table order, then [`FALLBACK_CATEGORY`]. Pure function of the
/// input; whether the category names an info or a failure is decided by
/// the caller's severity channel, not by this table.
pub fn classify(raw: &str) -> &'static str {
    for (pattern, id) in PREFIX_RULES {
        if raw.starts_with(pattern) {
            return id;
        }
    }
    for (pattern, id) in SUBSTRING_RULES {
        if raw.contains(pattern) {
            return id;
        }
    }
    FALLBACK_CATEGORY
}
