use thiserror::Error;

/// Application-wide error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Confession cannot be empty")]
    EmptyInput,

    #[error("Username and password are required")]
    MissingCredentials,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Admin session required")]
    AuthRequired,

    #[error("Failed to read persisted confessions: {0}")]
    PersistenceRead(String),

    #[error("Failed to persist confessions: {0}")]
    PersistenceWrite(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn persistence_read<S: Into<String>>(msg: S) -> Self {
        Self::PersistenceRead(msg.into())
    }

    pub fn persistence_write<S: Into<String>>(msg: S) -> Self {
        Self::PersistenceWrite(msg.into())
    }

    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Wording shown in the feedback toast when an action fails
impl AppError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::EmptyInput => "Confession cannot be empty.",
            Self::MissingCredentials => "Enter username & password",
            Self::InvalidCredentials => "Invalid username or password",
            Self::AuthRequired => "Sign in to moderate confessions.",
            Self::Config(_) => "Configuration problem, see the log.",
            Self::PersistenceRead(_) | Self::PersistenceWrite(_) | Self::Internal(_) => {
                "Something went wrong."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(AppError::EmptyInput.user_message(), "Confession cannot be empty.");
        assert_eq!(
            AppError::InvalidCredentials.user_message(),
            "Invalid username or password"
        );
        assert_eq!(
            AppError::MissingCredentials.user_message(),
            "Enter username & password"
        );
    }

    #[test]
    fn test_helpers_carry_detail() {
        let err = AppError::persistence_write("disk full");
        assert_eq!(err.to_string(), "Failed to persist confessions: disk full");
    }
}
