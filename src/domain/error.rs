//! Domain error types.

/// Top-level error type for pftrack.
#[derive(Debug, thiserror::Error)]
pub enum FinanceError {
    #[error("invalid date '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { value: String },

    #[error("invalid amount '{value}' (expected a number such as 123.45)")]
    InvalidAmount { value: String },

    #[error("invalid transaction type '{value}' (expected income or expense)")]
    InvalidTransactionType { value: String },

    #[error("invalid sort key '{value}' (expected id, date, amount or category)")]
    InvalidSortKey { value: String },

    #[error("no transaction id left after {max}")]
    IdOverflow { max: u64 },

    #[error("no transaction with id {id}")]
    NotFound { id: u64 },

    #[error("could not parse {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("could not save transactions to {path}: {reason}")]
    SaveFailed { path: String, reason: String },

    #[error("console i/o error: {0}")]
    Console(#[from] std::io::Error),

    #[error("i/o error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl FinanceError {
    pub fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        FinanceError::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}

impl From<&FinanceError> for std::process::ExitCode {
    fn from(err: &FinanceError) -> Self {
        let code: u8 = match err {
            FinanceError::Io { .. }
            | FinanceError::SaveFailed { .. }
            | FinanceError::Console(_) => 1,
            FinanceError::ConfigParse { .. } | FinanceError::ConfigInvalid { .. } => 2,
            FinanceError::InvalidDate { .. }
            | FinanceError::InvalidAmount { .. }
            | FinanceError::InvalidTransactionType { .. }
            | FinanceError::InvalidSortKey { .. }
            | FinanceError::IdOverflow { .. } => 3,
            FinanceError::Parse { .. } => 4,
            FinanceError::NotFound { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = FinanceError::InvalidDate {
            value: "2025-13-01".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid date '2025-13-01' (expected YYYY-MM-DD)"
        );
        assert_eq!(
            FinanceError::NotFound { id: 42 }.to_string(),
            "no transaction with id 42"
        );
    }

    #[test]
    fn io_helper_keeps_path() {
        let err = FinanceError::io(
            "/nope/file.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().starts_with("i/o error on /nope/file.json"));
    }

    #[test]
    fn exit_codes_by_group() {
        let code = |e: FinanceError| std::process::ExitCode::from(&e);
        assert_eq!(code(FinanceError::InvalidAmount { value: "x".into() }), std::process::ExitCode::from(3));
        assert_eq!(code(FinanceError::IdOverflow { max: u64::MAX }), std::process::ExitCode::from(3));
        assert_eq!(code(FinanceError::NotFound { id: 1 }), std::process::ExitCode::from(5));
    }
}
