use std::fmt::Write;
use std::sync::OnceLock;
use regex::Regex;
use crate::errors::SonarchatError;
use crate::report::{cell_text, Record, ReportTable};

const SEVERITIES: &[&str] = &["blocker", "critical", "major", "minor", "info"];

/// Question phrase → value of the `type` column.
const ISSUE_TYPES: &[(&str, &str)] = &[
    ("vulnerabilit", "VULNERABILITY"),
    ("hotspot", "SECURITY_HOTSPOT"),
    ("code smell", "CODE_SMELL"),
    ("smell", "CODE_SMELL"),
    ("bug", "BUG"),
];

const MAX_LISTED: usize = 5;

fn rule_key_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b[a-z][a-z0-9_-]*:[a-z0-9_-]+\b").unwrap())
}

fn words(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()).collect()
}

fn mentions_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| text.contains(n))
}

/// Backslash-escape report text so it renders as plain text, including
/// inside table cells.
fn escape_md(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '>' | '|' | '~' | '&' | '!' => {
                out.push('\\');
                out.push(c);
            }
            '\r' | '\n' => out.push(' '),
            _ => out.push(c),
        }
    }
    out
}

/// Inline code span whose fence is longer than any backtick run in `text`.
fn code_span(text: &str) -> String {
    let longest = text.split(|c: char| c != '`').map(str::len).max().unwrap_or(0);
    let fence = "`".repeat(longest + 1);
    let text = text.replace(['\r', '\n'], " ");
    if longest > 0 {
        format!("{} {} {}", fence, text, fence)
    } else {
        format!("{}{}{}", fence, text, fence)
    }
}

fn row_matches(row: &Record, column: &str, value: &str) -> bool {
    row.get(column).and_then(cell_text).is_some_and(|v| v.eq_ignore_ascii_case(value))
}

/// Answer a question about the report with fixed substring checks. The
/// reply is Markdown.
pub fn answer(table: &ReportTable, message: &str) -> Result<String, SonarchatError> {
    let lower = message.to_lowercase();
    let tokens = words(&lower);
    let wants_list = mentions_any(&lower, &["list", "show", "which"]);

    if let Some(rule) = rule_key_re().find(message) {
        return rule_answer(table, rule.as_str());
    }

    let severity = SEVERITIES.iter().find(|s| tokens.contains(s)).map(|s| s.to_uppercase());
    let issue_type = ISSUE_TYPES.iter().find(|(phrase, _)| lower.contains(phrase)).map(|(_, t)| *t);

    if severity.is_some() || issue_type.is_some() {
        return filtered_answer(table, severity.as_deref(), issue_type, wants_list);
    }

    if mentions_any(&lower, &["most common", "top", "frequent"]) && lower.contains("rule") {
        return top_rules_answer(table);
    }

    if mentions_any(&lower, &["summary", "summarize", "summarise", "overview", "breakdown"]) {
        return summary_answer(table);
    }

    if mentions_any(&lower, &["how many", "total", "count", "number of"]) {
        return Ok(format!("The report contains **{}** issues.", table.len()));
    }

    Ok(help_answer())
}

fn rule_answer(table: &ReportTable, rule: &str) -> Result<String, SonarchatError> {
    let matches = table.filter_where("rule", rule)?;
    let mut out = format!("Rule **{}** is violated **{}** time{}.", escape_md(rule), matches.len(), plural(matches.len()));
    append_listing(table, &mut out, &matches);
    Ok(out)
}

fn filtered_answer(
    table: &ReportTable,
    severity: Option<&str>,
    issue_type: Option<&str>,
    wants_list: bool,
) -> Result<String, SonarchatError> {
    let severity_col = severity.map(|_| table.column("severity")).transpose()?;
    let type_col = issue_type.map(|_| table.column("type")).transpose()?;

    let matches: Vec<&Record> = table
        .rows()
        .iter()
        .filter(|row| match (severity_col, severity) {
            (Some(col), Some(value)) => row_matches(row, col, value),
            _ => true,
        })
        .filter(|row| match (type_col, issue_type) {
            (Some(col), Some(value)) => row_matches(row, col, value),
            _ => true,
        })
        .collect();

    let mut out = format!("There {} **{}** issue{}", if matches.len() == 1 { "is" } else { "are" }, matches.len(), plural(matches.len()));
    if let Some(severity) = severity {
        let _ = write!(out, " with severity **{}**", severity);
    }
    if let Some(issue_type) = issue_type {
        let _ = write!(out, " of type **{}**", issue_type);
    }
    out.push('.');

    if wants_list {
        append_listing(table, &mut out, &matches);
    }
    Ok(out)
}

fn top_rules_answer(table: &ReportTable) -> Result<String, SonarchatError> {
    let counts = table.value_counts("rule")?;
    if counts.is_empty() {
        return Ok("The report has no rule violations.".to_string());
    }

    let mut out = String::from("### Most common rules\n\n| Rule | Count |\n|---|---|\n");
    for (rule, count) in counts.iter().take(MAX_LISTED) {
        let _ = writeln!(out, "| {} | {} |", escape_md(rule), count);
    }
    Ok(out)
}

fn summary_answer(table: &ReportTable) -> Result<String, SonarchatError> {
    let sections: Vec<(&str, &str)> = [("severity", "Severity"), ("type", "Type")]
        .into_iter()
        .filter(|(col, _)| table.column(col).is_ok())
        .collect();
    if sections.is_empty() {
        return Err(SonarchatError::MissingColumn("severity".into()));
    }

    let mut out = format!("## Report summary\n\n**Total issues:** {}\n", table.len());
    for (col, title) in sections {
        let _ = write!(out, "\n### By {}\n\n| {} | Count |\n|---|---|\n", col, title);
        for (value, count) in table.value_counts(col)? {
            let _ = writeln!(out, "| {} | {} |", escape_md(&value), count);
        }
    }
    Ok(out)
}

/// Append up to five example issues, using whichever identifying columns
/// the report has.
fn append_listing(table: &ReportTable, out: &mut String, rows: &[&Record]) {
    if rows.is_empty() {
        return;
    }
    let message_col = table.column("message").ok();
    let component_col = table.column("component").ok();

    out.push_str("\n\n");
    for row in rows.iter().take(MAX_LISTED) {
        let message = message_col.and_then(|c| row.get(c)).and_then(cell_text).unwrap_or_else(|| "No message".to_string());
        match component_col.and_then(|c| row.get(c)).and_then(cell_text) {
            Some(component) => { let _ = writeln!(out, "- {}: {}", code_span(&component), escape_md(&message)); }
            None => { let _ = writeln!(out, "- {}", escape_md(&message)); }
        }
    }
    if rows.len() > MAX_LISTED {
        let _ = writeln!(out, "\n...and {} more.", rows.len() - MAX_LISTED);
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

fn help_answer() -> String {
    "I can answer questions like:\n\n\
     - *How many critical issues are there?*\n\
     - *List the blocker bugs*\n\
     - *How often is java:S1192 violated?*\n\
     - *What are the most common rules?*\n\
     - *Give me a summary of the report*\n"
        .to_string()
}
