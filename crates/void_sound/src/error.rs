//! Error and warning types for the sound system

use crate::body::BodyId;
use crate::descriptor::Role;
use thiserror::Error;

/// Sound system errors
///
/// Only the configuration boundary can fail. Graph rebuilds and event
/// dispatch degrade into [`SoundWarning`]s instead.
#[derive(Debug, Error)]
pub enum SoundError {
    /// Settings or descriptor JSON could not be parsed
    #[error("Failed to parse sound configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// Settings parsed but hold unusable values
    #[error("Invalid sound configuration: {0}")]
    InvalidConfig(String),

    /// A factory name was registered twice
    #[error("Audio node factory already registered: {0}")]
    DuplicateFactory(String),
}

/// Result type for sound operations
pub type Result<T> = std::result::Result<T, SoundError>;

/// Non-fatal diagnostics raised while classifying bodies or routing events
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SoundWarning {
    /// A role entry has no usable audio node factory; the role is skipped
    #[error("{label}: sound.{role} misconfigured - expected audio_node to be a factory, got {received}")]
    ConfigValidation {
        body: BodyId,
        label: String,
        role: Role,
        received: String,
    },

    /// A hook fired but the source's chain has no node for the receiver
    #[error("no audio node for {role} '{receiver_label}' in the chain of source '{source_label}'")]
    MissingAudioNode {
        source_body: BodyId,
        source_label: String,
        receiver: BodyId,
        receiver_label: String,
        role: Role,
    },
}

impl SoundWarning {
    /// Body the warning is about (the receiver, for missing nodes)
    pub fn body(&self) -> BodyId {
        match self {
            Self::ConfigValidation { body, .. } => *body,
            Self::MissingAudioNode { receiver, .. } => *receiver,
        }
    }

    /// Role the warning is about
    pub fn role(&self) -> Role {
        match self {
            Self::ConfigValidation { role, .. } | Self::MissingAudioNode { role, .. } => *role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_warning_message() {
        let warning = SoundWarning::ConfigValidation {
            body: BodyId(3),
            label: "Speaker".into(),
            role: Role::Destination,
            received: "none".into(),
        };
        assert_eq!(
            warning.to_string(),
            "Speaker: sound.destination misconfigured - expected audio_node to be a factory, got none"
        );
        assert_eq!(warning.body(), BodyId(3));
        assert_eq!(warning.role(), Role::Destination);
    }

    #[test]
    fn test_parse_error_conversion() {
        let err: SoundError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, SoundError::Parse(_)));
    }
}
