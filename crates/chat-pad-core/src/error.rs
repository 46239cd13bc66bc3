#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PadError {
    #[error("no active chat identifier in the current view")]
    IdentifierNotFound,
    #[error("pad service request failed: {0}")]
    NetworkFailure(String),
}

impl PadError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkFailure(message.into())
    }

    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::IdentifierNotFound => "identifier_not_found",
            Self::NetworkFailure(_) => "network_failure",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_failure_renders_cause() {
        let error = PadError::network("connection refused");
        assert_eq!(
            error.to_string(),
            "pad service request failed: connection refused"
        );
        assert_eq!(error.code(), "network_failure");
    }
}
