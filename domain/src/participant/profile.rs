//! Participant profile value object

use serde::Serialize;

/// Immutable descriptive attributes of a debate participant (Value Object)
///
/// Profiles are created once at process start from the static registry and
/// never mutated during a run. Everything a prompt needs to impersonate the
/// participant lives here. Only serialized, never deserialized: the registry
/// is the single source of profiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParticipantProfile {
    /// Human-readable name used to attribute turns (e.g., "The Economist")
    pub display_name: &'static str,
    /// Short role label (e.g., "market economics analyst")
    pub role: &'static str,
    /// What this participant cares about most
    pub focus: &'static str,
    /// One-line stance summary
    pub perspective: &'static str,
    /// Longer biography used in system prompts
    pub bio: &'static str,
    /// Tone descriptor injected into prompts
    pub speaking_style: &'static str,
    /// Keyword hint handed to the retrieval collaborator
    pub search_keywords: &'static str,
}

impl ParticipantProfile {
    /// The `"Name: "` prefix this participant's turns are normalized to.
    pub fn name_prefix(&self) -> String {
        format!("{}: ", self.display_name)
    }
}
