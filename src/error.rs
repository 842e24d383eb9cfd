//! Error types for the host boundary and the porter commands.

use thiserror::Error;

/// A failure reported by a host collaborator (extension registry or file
/// adapter).
///
/// `NotFound` is carried separately because the porter reacts to it: a
/// missing settings file downgrades to a warning or an empty starting
/// tree, while every other host failure is reported as-is.
#[derive(Debug, Error)]
pub enum HostError {
    /// The requested file or extension data does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// Any other failure surfaced by the host.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HostError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, HostError::NotFound(_))
    }
}

/// Result type for host collaborator calls.
pub type HostResult<T> = Result<T, HostError>;

/// A failure of an import or export command as a whole.
///
/// Problems local to a single extension never end up here; the porter
/// records those in its reports and keeps going. Only the export document
/// itself, unreadable, unwritable, or not a settings object, aborts a
/// command.
#[derive(Debug, Error)]
pub enum PortError {
    #[error("could not read export file: {0}")]
    DocumentRead(#[source] HostError),
    #[error("export file is not a settings export: {0}")]
    DocumentParse(#[from] serde_json::Error),
    #[error("could not write export file: {0}")]
    DocumentWrite(#[source] HostError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_distinguishable() {
        let missing = HostError::NotFound(".quill/appearance.json".to_string());
        assert!(missing.is_not_found());
        assert_eq!(missing.to_string(), "not found: .quill/appearance.json");

        let other = HostError::Other(anyhow::anyhow!("disk on fire"));
        assert!(!other.is_not_found());
        assert_eq!(other.to_string(), "disk on fire");
    }

    #[test]
    fn test_port_error_messages_name_the_document() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{")
            .expect_err("parse must fail");
        let err = PortError::from(parse_err);
        assert!(err.to_string().starts_with("export file is not a settings export"));
    }
}
