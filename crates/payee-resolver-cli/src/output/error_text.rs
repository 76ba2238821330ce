use payee_resolver::ResolverError;
use serde_json::Value;

pub fn render_error(error: &ResolverError) -> String {
    let mut lines = vec![
        "Something went wrong, but it's easy to fix.".to_string(),
        String::new(),
        format!("  Error:    {}", error.code),
        format!("  Details:  {}", error.message),
    ];
    if let Some(path) = error
        .data
        .as_ref()
        .and_then(|data| data.get("path"))
        .and_then(Value::as_str)
    {
        lines.push(format!("  Path:     {path}"));
    }
    lines.push(String::new());
    lines.push("What to do next:".to_string());

    if error.recovery_steps.is_empty() {
        lines.push("  1. Retry the command.".to_string());
    } else {
        for (index, step) in error.recovery_steps.iter().enumerate() {
            lines.push(format!("  {}. {step}", index + 1));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use payee_resolver::ResolverError;

    use super::render_error;

    #[test]
    fn renders_standard_error_layout() {
        let error = ResolverError::corpus_empty(Path::new("corpus.txt"));

        let rendered = render_error(&error);
        assert!(rendered.starts_with("Something went wrong, but it's easy to fix."));
        assert!(rendered.contains("  Error:    corpus_empty"));
        assert!(rendered.contains("  Details:  Training corpus `corpus.txt` has no payee lines."));
        assert!(rendered.contains("  Path:     corpus.txt"));
        assert!(rendered.contains("What to do next:"));
        assert!(rendered.contains("  1. Add one raw payee string per line, then rerun."));
    }

    #[test]
    fn steps_default_to_retry() {
        let rendered = render_error(&ResolverError::internal_serialization("boom"));
        assert!(!rendered.contains("Path:"));
        assert!(rendered.ends_with("  1. Retry the command."));
    }
}
