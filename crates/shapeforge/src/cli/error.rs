//! Helpful error types for CLI commands
//!
//! Every error carries what went wrong, optional context, and suggestions
//! for fixing it.

use std::fmt;
use std::path::Path;

#[derive(Debug)]
pub struct HelpfulError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
}

impl HelpfulError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_suggestions(
        mut self,
        suggestions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.suggestions
            .extend(suggestions.into_iter().map(|s| s.into()));
        self
    }

    // === Schema files ===

    pub fn file_not_found(path: &Path) -> Self {
        Self::new(format!("Schema file not found: {}", path.display()))
            .with_context("The specified file does not exist")
            .with_suggestions([
                format!("TRY: Check if the file exists: ls -la {}", path.display()),
                "TRY: Pass the path to a JSON schema file".to_string(),
            ])
    }

    pub fn cannot_read_file(path: &Path, reason: &str) -> Self {
        Self::new(format!("Cannot read schema file: {}", path.display()))
            .with_context(reason.to_string())
            .with_suggestion(format!(
                "TRY: Check file permissions: ls -la {}",
                path.display()
            ))
    }

    pub fn json_parse_error(path: &Path, details: &str) -> Self {
        Self::new(format!("JSON parse error: {}", details))
            .with_context(format!("Failed to parse schema file: {}", path.display()))
            .with_suggestions([
                "TRY: Validate the JSON: cat FILE | python -m json.tool".to_string(),
                "TRY: Types are names like \"string\" or \"int64\", or {\"kind\": \"list\", \"item\": ...}"
                    .to_string(),
            ])
    }

    pub fn invalid_schema(path: &Path, details: &str) -> Self {
        Self::new(details.to_string())
            .with_context(format!("Schema file: {}", path.display()))
            .with_suggestions([
                "TRY: Give the schema a non-blank \"class_name\"".to_string(),
                "TRY: Provide a \"properties\" array (it may be empty)".to_string(),
            ])
    }

    // === Synthesis ===

    pub fn no_type_produced(class_name: &str) -> Self {
        Self::new(format!("No type was produced for '{}'", class_name))
            .with_context("Synthesis failed and the schema suppresses failures")
            .with_suggestions([
                "TRY: Re-run with --propagate to see the failure".to_string(),
                "TRY: Re-run with -v to see the suppressed failure in the log".to_string(),
            ])
    }

    pub fn synthesis_failed(class_name: &str, details: &str) -> Self {
        Self::new(format!("Failed to synthesize '{}'", class_name))
            .with_context(details.to_string())
            .with_suggestion("TRY: Check property names and types in the schema")
    }

    // === Assignments ===

    pub fn invalid_assignment(raw: &str) -> Self {
        Self::new(format!("Invalid assignment: '{}'", raw))
            .with_context("Assignments take the form NAME=VALUE")
            .with_suggestions([
                "TRY: --assign Name=Alice".to_string(),
                "TRY: Quote values containing spaces: --assign \"Name=Alice Smith\"".to_string(),
            ])
    }

    pub fn unknown_property(class_name: &str, property: &str, available: &[&str]) -> Self {
        let listing = if available.is_empty() {
            "(none)".to_string()
        } else {
            available.join(", ")
        };
        Self::new(format!("Unknown property '{}' on '{}'", property, class_name))
            .with_context(format!("Available properties: {}", listing))
            .with_suggestion("TRY: Property names are case-sensitive")
    }

    pub fn invalid_value(property: &str, details: &str) -> Self {
        Self::new(format!("Invalid value for '{}'", property))
            .with_context(details.to_string())
            .with_suggestions([
                "TRY: Dates look like 2024-01-31, timestamps like 2024-01-31T12:00:00".to_string(),
                "TRY: Durations look like 90, 1h30m or PT2M5S; binary values are base64".to_string(),
                "TRY: Lists are JSON arrays: --assign 'Tags=[\"a\",\"b\"]'".to_string(),
            ])
    }
}

impl fmt::Display for HelpfulError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ERROR: {}", self.message)?;

        if let Some(ctx) = &self.context {
            writeln!(f, "CONTEXT: {}", ctx)?;
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            for suggestion in &self.suggestions {
                writeln!(f, "  {}", suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for HelpfulError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helpful_error_display() {
        let err = HelpfulError::new("Something went wrong")
            .with_context("While synthesizing")
            .with_suggestion("TRY: again");

        let display = format!("{}", err);
        assert!(display.contains("ERROR: Something went wrong"));
        assert!(display.contains("CONTEXT: While synthesizing"));
        assert!(display.contains("  TRY: again"));
    }

    #[test]
    fn test_unknown_property_lists_available() {
        let err = HelpfulError::unknown_property("Person", "name", &["Name", "Age"]);
        assert!(err.message.contains("'name'"));
        assert_eq!(err.context.as_deref(), Some("Available properties: Name, Age"));

        let empty = HelpfulError::unknown_property("Empty", "X", &[]);
        assert_eq!(empty.context.as_deref(), Some("Available properties: (none)"));
    }

    #[test]
    fn test_no_type_produced_suggests_propagate() {
        let err = HelpfulError::no_type_produced("Person");
        assert!(err.suggestions.iter().any(|s| s.contains("--propagate")));
    }
}
