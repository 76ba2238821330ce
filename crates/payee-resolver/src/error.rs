use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

pub(crate) const BATCH_HELP_COMMAND: &str = "payee-resolver batch --help";

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ResolverError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ResolverError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// True for failures the caller can fix by changing input or flags.
    pub fn is_user_error(&self) -> bool {
        !self.code.starts_with("internal_")
    }

    /// `command` names the subcommand whose help the recovery step points at.
    pub fn invalid_argument(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(name) => format!("Run `payee-resolver {name} --help` for usage."),
            None => "Run `payee-resolver --help` for usage.".to_string(),
        };
        Self::new("invalid_argument", message, vec![help_hint])
    }

    pub fn batch_input_unreadable(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "batch_input_unreadable",
            &format!("Could not read batch input `{location}`: {detail}"),
            vec![
                "Verify the path exists and is readable.".to_string(),
                format!("Run `{BATCH_HELP_COMMAND}` to review the expected CSV layout."),
            ],
        )
        .with_data(json!({
            "path": location,
        }))
    }

    pub fn batch_csv_malformed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "batch_csv_malformed",
            &format!("Batch input `{location}` is not a readable CSV: {detail}"),
            vec![
                "Make sure the file has a header row followed by one payee per row.".to_string(),
                "Quote payee values that contain commas.".to_string(),
                format!("Run `{BATCH_HELP_COMMAND}` for usage."),
            ],
        )
        .with_data(json!({
            "path": location,
        }))
    }

    pub fn batch_output_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "batch_output_failed",
            &format!("Could not write resolved payees to `{location}`: {detail}"),
            vec![
                format!("Grant write access to `{location}` or pass a different `--output` path."),
            ],
        )
        .with_data(json!({
            "path": location,
        }))
    }

    pub fn corpus_unreadable(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "corpus_unreadable",
            &format!("Could not read training corpus `{location}`: {detail}"),
            vec![
                "Verify the corpus path passed with `--corpus` or `PAYEE_RESOLVER_CORPUS`."
                    .to_string(),
                "Unset `PAYEE_RESOLVER_CORPUS` to use the bundled corpus.".to_string(),
            ],
        )
        .with_data(json!({
            "path": location,
        }))
    }

    pub fn corpus_empty(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "corpus_empty",
            &format!("Training corpus `{location}` has no payee lines."),
            vec!["Add one raw payee string per line, then rerun.".to_string()],
        )
        .with_data(json!({
            "path": location,
        }))
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }
}

pub type ResolverResult<T> = Result<T, ResolverError>;

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::ResolverError;

    #[test]
    fn path_errors_carry_location_data() {
        let error = ResolverError::batch_input_unreadable(Path::new("/tmp/missing.csv"), "nope");
        assert_eq!(error.code, "batch_input_unreadable");
        assert!(error.message.contains("/tmp/missing.csv"));
        assert_eq!(
            error
                .data
                .as_ref()
                .and_then(|data| data.get("path"))
                .and_then(|value| value.as_str()),
            Some("/tmp/missing.csv")
        );
    }

    #[test]
    fn internal_errors_are_not_user_errors() {
        assert!(!ResolverError::internal_serialization("boom").is_user_error());
        assert!(ResolverError::invalid_argument("bad", None).is_user_error());
        assert!(ResolverError::corpus_empty(Path::new("c.txt")).is_user_error());
    }
}
