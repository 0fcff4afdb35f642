use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingConfig(Vec<String>),

    #[error("Session already started: {0}")]
    DuplicateSession(String),

    #[error("Tool execution error: {tool_name}: {message}")]
    ToolExecution { tool_name: String, message: String },

    #[error("Schema build error: {0}")]
    Schema(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, AgentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_lists_every_key() {
        let err = AgentError::MissingConfig(vec![
            "LIVEKIT_URL".into(),
            "DEEPGRAM_API_KEY".into(),
        ]);
        assert_eq!(
            err.to_string(),
            "Missing required environment variables: LIVEKIT_URL, DEEPGRAM_API_KEY"
        );
    }

    #[test]
    fn test_tool_execution_display() {
        let err = AgentError::ToolExecution {
            tool_name: "getSkills".into(),
            message: "bad arguments".into(),
        };
        assert_eq!(
            err.to_string(),
            "Tool execution error: getSkills: bad arguments"
        );
    }
}
