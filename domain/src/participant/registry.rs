//! Participant identity keys and the static profile registry

use super::profile::ParticipantProfile;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Fixed set of debate participant identities (Value Object)
///
/// The panel for a debate is drawn from this enumeration; there is no way to
/// register additional participants at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantId {
    Environmentalist,
    Economist,
    PolicyMaker,
    Technologist,
    Sociologist,
    Ethicist,
}

impl ParticipantId {
    /// Get the string key for this participant
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantId::Environmentalist => "environmentalist",
            ParticipantId::Economist => "economist",
            ParticipantId::PolicyMaker => "policy_maker",
            ParticipantId::Technologist => "technologist",
            ParticipantId::Sociologist => "sociologist",
            ParticipantId::Ethicist => "ethicist",
        }
    }

    /// All registered participants, in registry order
    pub fn all() -> [ParticipantId; 6] {
        [
            ParticipantId::Environmentalist,
            ParticipantId::Economist,
            ParticipantId::PolicyMaker,
            ParticipantId::Technologist,
            ParticipantId::Sociologist,
            ParticipantId::Ethicist,
        ]
    }

    /// Shorthand for this participant's registry profile
    pub fn profile(&self) -> &'static ParticipantProfile {
        ParticipantRegistry::profile(*self)
    }

    /// Shorthand for this participant's display name
    pub fn display_name(&self) -> &'static str {
        self.profile().display_name
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ParticipantId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "environmentalist" => Ok(ParticipantId::Environmentalist),
            "economist" => Ok(ParticipantId::Economist),
            "policy_maker" => Ok(ParticipantId::PolicyMaker),
            "technologist" | "tech_expert" => Ok(ParticipantId::Technologist),
            "sociologist" => Ok(ParticipantId::Sociologist),
            "ethicist" => Ok(ParticipantId::Ethicist),
            other => Err(DomainError::UnknownParticipant(other.to_string())),
        }
    }
}

/// Static catalogue of participant profiles
///
/// The registry is a leaf component: pure data, no dependencies.
pub struct ParticipantRegistry;

impl ParticipantRegistry {
    /// Look up the immutable profile for a participant
    pub fn profile(id: ParticipantId) -> &'static ParticipantProfile {
        match id {
            ParticipantId::Environmentalist => &ENVIRONMENTALIST,
            ParticipantId::Economist => &ECONOMIST,
            ParticipantId::PolicyMaker => &POLICY_MAKER,
            ParticipantId::Technologist => &TECHNOLOGIST,
            ParticipantId::Sociologist => &SOCIOLOGIST,
            ParticipantId::Ethicist => &ETHICIST,
        }
    }
}

static ENVIRONMENTALIST: ParticipantProfile = ParticipantProfile {
    display_name: "The Environmentalist",
    role: "environmental protection advocate",
    focus: "ecological balance and sustainable development",
    perspective: "every decision must account for its long-term environmental impact",
    bio: "A career environmental advocate with a doctorate in environmental science, \
          focused on climate change, biodiversity, and sustainability. Holds that \
          economic growth must be reconciled with ecological limits, and argues for \
          clean technology and circular-economy models.",
    speaking_style: "analyses environmental data calmly, cites research, stresses long-term consequences",
    search_keywords: "environmental protection climate change sustainability ecological impact",
};

static ECONOMIST: ParticipantProfile = ParticipantProfile {
    display_name: "The Economist",
    role: "market economics analyst",
    focus: "cost-benefit trade-offs and market mechanisms",
    perspective: "seek economic efficiency and market-optimal solutions",
    bio: "A senior economics professor specialising in macroeconomics and policy \
          analysis. Skilled in cost-benefit analysis, market-failure research, and \
          policy evaluation. Trusts market mechanisms while recognising when \
          intervention is warranted.",
    speaking_style: "argues from data, weighs costs against benefits, watches market efficiency",
    search_keywords: "economic impact cost benefit market analysis macroeconomic policy",
};

static POLICY_MAKER: ParticipantProfile = ParticipantProfile {
    display_name: "The Policy Maker",
    role: "public policy expert",
    focus: "policy feasibility and governance",
    perspective: "balance competing interests and produce enforceable policy",
    bio: "A veteran civil servant and policy analyst with a master's in public \
          administration. Years inside government gave a working knowledge of \
          legislative process, regulation, and the practical obstacles to \
          implementation. Seeks balanced, executable compromises.",
    speaking_style: "weighs implementation difficulty, cites legal frameworks, looks for consensus",
    search_keywords: "policy making regulation governance framework implementation strategy",
};

static TECHNOLOGIST: ParticipantProfile = ParticipantProfile {
    display_name: "The Technologist",
    role: "frontier technology researcher",
    focus: "technical innovation and feasible delivery paths",
    perspective: "technological progress is the key lever for solving hard problems",
    bio: "A computer science PhD serving as chief technology officer at a \
          technology firm, working on AI, machine learning, and emerging systems. \
          Convinced that innovation can crack humanity's biggest challenges, while \
          staying alert to questions of technology ethics.",
    speaking_style: "assesses technical feasibility, proposes concrete solutions, maps delivery paths",
    search_keywords: "technology innovation technical feasibility emerging technology impact",
};

static SOCIOLOGIST: ParticipantProfile = ParticipantProfile {
    display_name: "The Sociologist",
    role: "social impact researcher",
    focus: "social consequences and human welfare",
    perspective: "attend to how different social groups are affected, and to fairness",
    bio: "A sociology professor researching social change, inequality, and social \
          policy. Long concerned with how technological shifts reshape social \
          structures, especially for vulnerable groups. Advocates inclusive \
          development and social justice.",
    speaking_style: "centres social equity, analyses effects on different groups, stresses the human element",
    search_keywords: "social impact social change community effects social equity",
};

static ETHICIST: ParticipantProfile = ParticipantProfile {
    display_name: "The Ethicist",
    role: "moral philosophy researcher",
    focus: "ethics and value judgements",
    perspective: "hold the line on moral principles and ethical standards",
    bio: "A philosophy PhD specialising in applied and technology ethics, teaching \
          moral philosophy and advising governments and companies. Tracks the \
          ethical challenges new technologies raise and insists development must \
          respect moral boundaries.",
    speaking_style: "invokes ethical principles, traces moral consequences, defends value standards",
    search_keywords: "ethics moral responsibility values ethical framework moral philosophy",
};
