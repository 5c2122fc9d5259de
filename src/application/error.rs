//! # Command Errors
//!
//! Failures the router reports back to the invoking user. Anything a handler
//! returns that is not a `CommandError` is reported as `CommandInvokeError`.

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Command \"{0}\" is not found")]
    NotFound(String),
    #[error("You do not own this bot.")]
    NotOwner,
    #[error("{0}")]
    BadArgument(String),
}

impl CommandError {
    pub fn kind(&self) -> &'static str {
        match self {
            CommandError::NotFound(_) => "CommandNotFound",
            CommandError::NotOwner => "NotOwner",
            CommandError::BadArgument(_) => "BadArgument",
        }
    }

    /// Kind name and message for any handler error.
    pub fn describe(err: &anyhow::Error) -> (&'static str, String) {
        match err.downcast_ref::<CommandError>() {
            Some(known) => (known.kind(), known.to_string()),
            None => ("CommandInvokeError", format!("{err:#}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_describe_known_errors() {
        let err: anyhow::Error = CommandError::NotFound("dance".into()).into();
        assert_eq!(
            CommandError::describe(&err),
            ("CommandNotFound", "Command \"dance\" is not found".to_string())
        );

        let err: anyhow::Error = CommandError::NotOwner.into();
        assert_eq!(CommandError::describe(&err).0, "NotOwner");
    }

    #[test]
    fn test_describe_other_errors_keeps_chain() {
        let err = Err::<(), _>(std::io::Error::other("disk gone"))
            .context("Failed to read memes")
            .unwrap_err();
        assert_eq!(
            CommandError::describe(&err),
            ("CommandInvokeError", "Failed to read memes: disk gone".to_string())
        );
    }
}
