//! Participant identities and their static profiles

pub mod profile;
pub mod registry;

pub use profile::ParticipantProfile;
pub use registry::{ParticipantId, ParticipantRegistry};
