use std::path::Path;
use serde_json::Value;
use crate::errors::SonarchatError;
use tracing::debug;

/// Built-in instructions for the report assistant. `{{REPORT_SAMPLE}}` is
/// replaced with a JSON sample of the report rows.
pub const DEFAULT_TEMPLATE: &str = "\
You are a helpful assistant analyzing SonarQube reports.
Here's sample data from the report: {{REPORT_SAMPLE}}

The user is asking about this SonarQube report. Provide helpful insights, explanations, and solutions.

Please format your response with:
- Clear sections with headers (## for main sections, ### for subsections)
- Bullet points for lists
- Bold text (**bold**) for important terms
- Code blocks for code examples
- Tables for comparative data when appropriate
- Horizontal rules between major sections

Keep the response professional but approachable. Focus on:
1. Identifying the issue clearly
2. Explaining why it's problematic
3. Providing actionable solutions
4. Offering best practices to prevent similar issues
";

const MAX_TEMPLATE_BYTES: u64 = 65_536;

/// Load a template override from disk, or fall back to the built-in one.
pub fn load_template(path: Option<&Path>) -> Result<String, SonarchatError> {
    let Some(path) = path else {
        return Ok(DEFAULT_TEMPLATE.to_string());
    };

    let metadata = std::fs::metadata(path).map_err(|e| {
        SonarchatError::Config(format!("Prompt file {} unreadable: {}", path.display(), e))
    })?;
    if metadata.len() > MAX_TEMPLATE_BYTES {
        return Err(SonarchatError::Config(format!("Prompt file {} exceeds 64KB", path.display())));
    }

    let content = std::fs::read_to_string(path)?;
    if !content.contains("{{REPORT_SAMPLE}}") {
        return Err(SonarchatError::Config(format!(
            "Prompt file {} has no {{{{REPORT_SAMPLE}}}} placeholder",
            path.display()
        )));
    }
    debug!(path = %path.display(), "Loaded prompt template override");
    Ok(content)
}

/// The first `limit` rows, or all of them when there are no more than that.
pub fn sample_rows(rows: &[Value], limit: usize) -> &[Value] {
    &rows[..rows.len().min(limit)]
}

/// Fill the template and append the user's question.
pub fn build_chat_prompt(template: &str, sample: &[Value], message: &str) -> Result<String, SonarchatError> {
    let sample_json = serde_json::to_string(sample)?;
    let context = template.replace("{{REPORT_SAMPLE}}", &sample_json);
    Ok(format!("{}\n\nUser: {}", context, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sample_rows_caps_at_limit() {
        let rows: Vec<Value> = (0..8).map(|i| json!({"key": i})).collect();
        assert_eq!(sample_rows(&rows, 5).len(), 5);
        assert_eq!(sample_rows(&rows, 5)[4]["key"], 4);
        assert_eq!(sample_rows(&rows[..3], 5).len(), 3);
        assert!(sample_rows(&[], 5).is_empty());
    }

    #[test]
    fn test_build_chat_prompt() {
        let sample = vec![json!({"severity": "MAJOR"})];
        let prompt = build_chat_prompt(DEFAULT_TEMPLATE, &sample, "What is wrong?").unwrap();
        assert!(prompt.contains(r#"sample data from the report: [{"severity":"MAJOR"}]"#));
        assert!(prompt.ends_with("\n\nUser: What is wrong?"));
        assert!(!prompt.contains("{{REPORT_SAMPLE}}"));
    }

    #[test]
    fn test_empty_sample_serializes_as_empty_array() {
        let prompt = build_chat_prompt("data={{REPORT_SAMPLE}}", &[], "hi").unwrap();
        assert_eq!(prompt, "data=[]\n\nUser: hi");
    }

    #[test]
    fn test_load_template_default() {
        assert_eq!(load_template(None).unwrap(), DEFAULT_TEMPLATE);
    }

    #[test]
    fn test_load_template_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prompt.txt");
        std::fs::write(&path, "Rows: {{REPORT_SAMPLE}}").unwrap();
        assert_eq!(load_template(Some(&path)).unwrap(), "Rows: {{REPORT_SAMPLE}}");
    }

    #[test]
    fn test_load_template_requires_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prompt.txt");
        std::fs::write(&path, "No placeholder here").unwrap();
        assert!(matches!(load_template(Some(&path)), Err(SonarchatError::Config(_))));
    }

    #[test]
    fn test_load_template_missing_file() {
        let path = Path::new("/nonexistent/sonarchat/prompt.txt");
        assert!(matches!(load_template(Some(path)), Err(SonarchatError::Config(_))));
    }
}
