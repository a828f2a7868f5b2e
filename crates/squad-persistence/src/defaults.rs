//! Well-known shared documents and their default bodies.
//!
//! Default bodies are written only when a document is missing, so an
//! operator's edits survive restarts and upgrades.

/// Key of the shared goals document.
pub const GOALS: &str = "goals";

/// Key of the shared decision log.
pub const DECISIONS: &str = "decisions";

/// Key of the shared status document.
pub const STATUS: &str = "status";

/// Default body of the goals document.
pub const DEFAULT_GOALS: &str = "# Team Goals

## Current Focus
- No goals recorded yet.

## Long Term
- No goals recorded yet.
";

/// Default body of the decision log.
pub const DEFAULT_DECISIONS: &str = "# Decision Log

Record decisions as they are made, newest last.
";

/// Default body of the status document.
pub const DEFAULT_STATUS: &str = "# Team Status

No status updates yet.
";

/// Every well-known document key paired with its default body.
pub const WELL_KNOWN_DOCUMENTS: [(&str, &str); 3] = [
    (GOALS, DEFAULT_GOALS),
    (DECISIONS, DEFAULT_DECISIONS),
    (STATUS, DEFAULT_STATUS),
];
