use thiserror::Error;

/// Validation errors rejected at the API boundary.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("agent id cannot be empty")]
    InvalidId,

    #[error("invalid name: {0}")]
    InvalidName(String),

    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("invalid status: '{0}'")]
    InvalidStatus(String),
}

/// Errors from the durable agent registry.
///
/// Reads never surface these to callers (an unreadable store degrades to an
/// empty registry); a failed write fails only the mutating call that issued it.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to encode registry state: {0}")]
    Encode(String),

    #[error("registry io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the append-only chat log.
#[derive(Debug, Error)]
pub enum ChatLogError {
    #[error("failed to encode chat message: {0}")]
    Encode(String),

    #[error("chat log io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_error_display() {
        let err = AgentError::InvalidStatus("online".to_string());
        assert_eq!(err.to_string(), "invalid status: 'online'");
    }

    #[test]
    fn test_registry_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = RegistryError::from(io);
        assert!(err.to_string().contains("denied"));
    }
}
