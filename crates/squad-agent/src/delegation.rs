//! Delegation tag parsing.
//!
//! Agents hand work to a teammate by embedding a tag of the form
//! `[DELEGATE: <Agent> <task>]` in their reply. The grammar:
//!
//! ```text
//! tag    = "[" ws* "DELEGATE" ws* ":" ws* target ws+ task "]"
//! target = 1*( ALPHA / DIGIT / "_" )
//! task   = 1*( any character except "]" )     ; may span lines, trimmed
//! ```
//!
//! The keyword is matched ASCII case-insensitively. Only the first
//! well-formed tag in a reply is returned; malformed candidates are skipped.

use serde::{Deserialize, Serialize};

const KEYWORD: &str = "DELEGATE";

/// A request, extracted from a reply, for another agent to handle a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegationRequest {
    /// Target token as written in the tag (usually a display name).
    pub target_agent: String,
    /// Task text, trimmed.
    pub task: String,
}

impl DelegationRequest {
    /// Create a delegation request.
    pub fn new(target_agent: impl Into<String>, task: impl Into<String>) -> Self {
        Self {
            target_agent: target_agent.into(),
            task: task.into(),
        }
    }

    /// Routing key for the target (lowercased).
    pub fn target_key(&self) -> String {
        self.target_agent.to_lowercase()
    }

    /// Render back into tag form.
    pub fn to_tag(&self) -> String {
        format!("[{}: {} {}]", KEYWORD, self.target_agent, self.task)
    }
}

/// Find the first well-formed delegation tag in `text`.
pub fn find_delegation(text: &str) -> Option<DelegationRequest> {
    text.match_indices('[')
        .find_map(|(start, _)| parse_tag(&text[start + 1..]))
}

/// Parse a tag body starting just after its opening `[`.
fn parse_tag(input: &str) -> Option<DelegationRequest> {
    let rest = input.trim_start();

    let keyword = rest.get(..KEYWORD.len())?;
    if !keyword.eq_ignore_ascii_case(KEYWORD) {
        return None;
    }
    let rest = rest[KEYWORD.len()..].trim_start();
    let rest = rest.strip_prefix(':')?.trim_start();

    let target_len = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    if target_len == 0 {
        return None;
    }
    let (target, rest) = rest.split_at(target_len);

    // At least one whitespace character separates target and task.
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let end = rest.find(']')?;
    let task = rest[..end].trim();
    if task.is_empty() {
        return None;
    }

    Some(DelegationRequest::new(target, task))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_tag() {
        let reply = "Let me check. [DELEGATE: Josh Check margins] I'll report back.";
        let request = find_delegation(reply).unwrap();

        assert_eq!(request.target_agent, "Josh");
        assert_eq!(request.task, "Check margins");
        assert_eq!(request.target_key(), "josh");
    }

    #[test]
    fn test_keyword_is_case_insensitive() {
        let request = find_delegation("[delegate: angela Draft a tweet]").unwrap();
        assert_eq!(request, DelegationRequest::new("angela", "Draft a tweet"));

        let request = find_delegation("[Delegate:Bob   check disk usage  ]").unwrap();
        assert_eq!(request, DelegationRequest::new("Bob", "check disk usage"));
    }

    #[test]
    fn test_first_tag_wins() {
        let reply = "[DELEGATE: Josh Run the numbers] and [DELEGATE: Angela Write copy]";
        assert_eq!(find_delegation(reply).unwrap().target_agent, "Josh");
    }

    #[test]
    fn test_task_may_span_lines() {
        let reply = "[DELEGATE: Bob Check the deploy:\n- api latency\n- error rate]";
        let request = find_delegation(reply).unwrap();

        assert_eq!(request.task, "Check the deploy:\n- api latency\n- error rate");
    }

    #[test]
    fn test_no_tag() {
        assert!(find_delegation("Revenue is up 12% this week.").is_none());
        assert!(find_delegation("").is_none());
        assert!(find_delegation("[note] nothing to delegate").is_none());
    }

    #[test]
    fn test_malformed_then_valid() {
        let reply = "[DELEGATE: ] oops, then [DELEGATE: Milo Pick a launch date]";
        let request = find_delegation(reply).unwrap();

        assert_eq!(request, DelegationRequest::new("Milo", "Pick a launch date"));
    }

    #[test]
    fn test_missing_task_or_bracket() {
        assert!(find_delegation("[DELEGATE: Josh]").is_none());
        assert!(find_delegation("[DELEGATE: Josh    ]").is_none());
        assert!(find_delegation("[DELEGATE: Josh check margins").is_none());
        assert!(find_delegation("[DELEGATE Josh check margins]").is_none());
    }

    #[test]
    fn test_target_must_be_a_single_word() {
        // The first word is the target; the rest belongs to the task.
        let request = find_delegation("[DELEGATE: Josh Smith review churn]").unwrap();
        assert_eq!(request.target_agent, "Josh");
        assert_eq!(request.task, "Smith review churn");

        assert!(find_delegation("[DELEGATE: Jo-sh review churn]").is_none());
    }

    #[test]
    fn test_task_ends_at_first_bracket() {
        let request = find_delegation("[DELEGATE: Josh compare plans] [basic] vs pro]").unwrap();
        assert_eq!(request.task, "compare plans");
    }

    #[test]
    fn test_non_ascii_text_around_tag() {
        let request = find_delegation("Résumé ✓ [DELEGATE: Angela schreib über Café]").unwrap();
        assert_eq!(request.task, "schreib über Café");
    }

    #[test]
    fn test_to_tag() {
        let request = DelegationRequest::new("Josh", "Check margins");
        assert_eq!(request.to_tag(), "[DELEGATE: Josh Check margins]");
        assert_eq!(find_delegation(&request.to_tag()), Some(request));
    }
}
