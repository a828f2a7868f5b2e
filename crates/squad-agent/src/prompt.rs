//! System prompt composition.
//!
//! A prompt is built by rendering an ordered pipeline of [`PromptSection`]s
//! and joining them with blank lines. Every agent starts from
//! [`PromptSection::base_pipeline`]; specialists only push
//! [`PromptSection::Specialization`] entries after it, so a specialized
//! prompt always begins with the exact base prompt.

use squad_persistence::SharedSnapshot;

/// Protocol rules appended to every agent's prompt.
pub const PROTOCOL_PROMPT: &str = r#"## Team Protocol
1. Act according to your persona and responsibilities above.
2. To change a shared document (goals, status, decisions), state the update explicitly,
   e.g. "Update status: <new text>". Never assume a document changed unless you said so.
3. When a task needs another teammate's expertise, emit exactly one delegation tag:
   [DELEGATE: <AgentName> <task for that agent>]
   Use the teammate's name as a single word, followed by the task. You will receive
   their answer and then give the user a final reply.
4. Be concise."#;

const SECTION_SEPARATOR: &str = "\n\n";

/// One step of the prompt pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptSection {
    /// The agent's persona ("soul") text, verbatim.
    Persona,
    /// The shared team documents from the store snapshot.
    SharedDocuments,
    /// The fixed team protocol block.
    Protocol,
    /// Extra text contributed by a specialized agent.
    Specialization {
        /// Section heading, rendered as a level-two markdown heading.
        heading: String,
        /// Section body.
        body: String,
    },
}

impl PromptSection {
    /// Create a specialization section.
    pub fn specialization(heading: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Specialization {
            heading: heading.into(),
            body: body.into(),
        }
    }

    /// The pipeline every agent starts with: persona, shared documents, protocol.
    pub fn base_pipeline() -> Vec<PromptSection> {
        vec![Self::Persona, Self::SharedDocuments, Self::Protocol]
    }

    /// Render this section.
    pub fn render(&self, persona: &str, shared: &SharedSnapshot) -> String {
        match self {
            Self::Persona => persona.to_string(),
            Self::SharedDocuments => render_shared(shared),
            Self::Protocol => PROTOCOL_PROMPT.to_string(),
            Self::Specialization { heading, body } => format!("## {}\n{}", heading, body),
        }
    }
}

fn render_shared(shared: &SharedSnapshot) -> String {
    format!(
        "## Shared Team Context\n\n### Goals\n{}\n\n### Current Status\n{}\n\n### Decisions\n{}",
        shared.goals, shared.status, shared.decisions
    )
}

/// Render `sections` in order and join them.
pub fn compose(sections: &[PromptSection], persona: &str, shared: &SharedSnapshot) -> String {
    sections
        .iter()
        .map(|section| section.render(persona, shared))
        .collect::<Vec<_>>()
        .join(SECTION_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> SharedSnapshot {
        SharedSnapshot {
            goals: "Reach 100 paying customers".into(),
            decisions: "Price at $29/mo".into(),
            status: "Beta live".into(),
        }
    }

    #[test]
    fn test_base_pipeline_order() {
        let prompt = compose(&PromptSection::base_pipeline(), "I am Milo.", &snapshot());

        let persona = prompt.find("I am Milo.").unwrap();
        let goals = prompt.find("Reach 100 paying customers").unwrap();
        let status = prompt.find("Beta live").unwrap();
        let decisions = prompt.find("Price at $29/mo").unwrap();
        let protocol = prompt.find("## Team Protocol").unwrap();

        assert_eq!(persona, 0);
        assert!(goals < status && status < decisions && decisions < protocol);
        assert!(prompt.ends_with("4. Be concise."));
    }

    #[test]
    fn test_protocol_describes_delegation_tag() {
        assert!(PROTOCOL_PROMPT.contains("[DELEGATE: <AgentName> <task for that agent>]"));
    }

    #[test]
    fn test_specialization_preserves_prefix() {
        let base = compose(&PromptSection::base_pipeline(), "persona", &snapshot());

        let mut sections = PromptSection::base_pipeline();
        sections.push(PromptSection::specialization("Capabilities", "- sales reports"));
        sections.push(PromptSection::specialization("Daily Routine", "Check the funnel."));
        let specialized = compose(&sections, "persona", &snapshot());

        assert!(specialized.starts_with(&base));
        assert_eq!(
            &specialized[base.len()..],
            "\n\n## Capabilities\n- sales reports\n\n## Daily Routine\nCheck the funnel."
        );
    }

    #[test]
    fn test_compose_is_deterministic() {
        let sections = PromptSection::base_pipeline();
        assert_eq!(
            compose(&sections, "p", &snapshot()),
            compose(&sections, "p", &snapshot())
        );
    }

    #[test]
    fn test_empty_documents_still_render_headings() {
        let prompt = compose(&[PromptSection::SharedDocuments], "", &SharedSnapshot::default());
        assert!(prompt.contains("### Goals\n\n\n### Current Status"));
    }
}
