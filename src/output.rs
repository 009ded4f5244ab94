//! CLI output formatting for every command.
//!
//! # Output Format
//!
//! ## Generate
//!
//! Progress lines stream while icons render (completion order in concurrent
//! mode), then a summary lists what is on disk in catalog order:
//!
//! ```text
//! 001 favicon.ico (64x64)
//! 002 favicon-16x16.png (16x16)
//! 003 mstile-310x150.png failed: Failed to write ...
//!
//! Generated 21 icons in public/
//!     favicon.ico
//!     favicon-16x16.png
//!     ...
//! ```
//!
//! ## Names / Html / Json
//!
//! One file name or `<link>` tag per line; JSON is pretty-printed.
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::descriptor::IconRecord;
use crate::generator::RenderFailure;
use crate::types::GenerateEvent;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

// ============================================================================
// generate
// ============================================================================

/// Format one progress event. `index` counts settled icons, starting at 1.
pub fn format_generate_event(index: usize, event: &GenerateEvent) -> Vec<String> {
    match event {
        GenerateEvent::Rendered {
            filename,
            dimensions,
        } => vec![format!("{} {} ({})", format_index(index), filename, dimensions)],
        GenerateEvent::Failed { filename, reason } => {
            vec![format!("{} {} failed: {}", format_index(index), filename, reason)]
        }
    }
}

/// Print one progress event to stdout.
pub fn print_generate_event(index: usize, event: &GenerateEvent) {
    for line in format_generate_event(index, event) {
        println!("{}", line);
    }
}

/// Format the closing summary of a successful run.
pub fn format_generate_summary<I>(completed: usize, output_dir: &Path, filenames: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let noun = if completed == 1 { "icon" } else { "icons" };
    let mut lines = vec![
        String::new(),
        format!("Generated {} {} in {}", completed, noun, output_dir.display()),
    ];
    lines.extend(filenames.into_iter().map(|name| format!("    {}", name)));
    lines
}

pub fn print_generate_summary<I>(completed: usize, output_dir: &Path, filenames: I)
where
    I: IntoIterator<Item = String>,
{
    for line in format_generate_summary(completed, output_dir, filenames) {
        println!("{}", line);
    }
}

/// Format the per-icon causes of a partially failed concurrent run.
pub fn format_failures(failures: &[RenderFailure]) -> Vec<String> {
    failures
        .iter()
        .map(|failure| format!("    {}", failure))
        .collect()
}

/// Failures go to stderr.
pub fn print_failures(failures: &[RenderFailure]) {
    for line in format_failures(failures) {
        eprintln!("{}", line);
    }
}

// ============================================================================
// names / html / json
// ============================================================================

/// One file name per line, already prefixed by the caller when asked.
pub fn print_names<I>(names: I)
where
    I: IntoIterator<Item = String>,
{
    for name in names {
        println!("{}", name);
    }
}

pub fn print_html<I>(markup: I)
where
    I: IntoIterator<Item = String>,
{
    for line in markup {
        println!("{}", line);
    }
}

/// Pretty-printed record list, split into lines.
pub fn format_json(records: &[IconRecord]) -> Result<Vec<String>, serde_json::Error> {
    let json = serde_json::to_string_pretty(records)?;
    Ok(json.lines().map(str::to_string).collect())
}

pub fn print_json(records: &[IconRecord]) -> Result<(), serde_json::Error> {
    for line in format_json(records)? {
        println!("{}", line);
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::imaging::BackendError;
    use crate::types::Dimensions;

    #[test]
    fn format_index_pads_to_three() {
        assert_eq!(format_index(7), "007");
        assert_eq!(format_index(21), "021");
        assert_eq!(format_index(1234), "1234");
    }

    #[test]
    fn format_rendered_event() {
        let event = GenerateEvent::Rendered {
            filename: "mstile-310x150.png".to_string(),
            dimensions: Dimensions::new(310, 150),
        };
        assert_eq!(
            format_generate_event(4, &event),
            vec!["004 mstile-310x150.png (310x150)"]
        );
    }

    #[test]
    fn format_failed_event() {
        let event = GenerateEvent::Failed {
            filename: "favicon.ico".to_string(),
            reason: "disk full".to_string(),
        };
        assert_eq!(
            format_generate_event(1, &event),
            vec!["001 favicon.ico failed: disk full"]
        );
    }

    #[test]
    fn summary_lists_names_indented() {
        let lines = format_generate_summary(
            2,
            Path::new("public"),
            ["favicon.ico".to_string(), "favicon-16x16.png".to_string()],
        );
        assert_eq!(
            lines,
            vec![
                "",
                "Generated 2 icons in public",
                "    favicon.ico",
                "    favicon-16x16.png",
            ]
        );
    }

    #[test]
    fn summary_singular_noun() {
        let lines = format_generate_summary(1, Path::new("out"), Vec::new());
        assert_eq!(lines[1], "Generated 1 icon in out");
    }

    #[test]
    fn failures_show_name_and_cause() {
        let failures = vec![RenderFailure {
            filename: "favicon-32x32.png".to_string(),
            error: BackendError::ProcessingFailed("boom".to_string()),
        }];
        assert_eq!(
            format_failures(&failures),
            vec!["    favicon-32x32.png: Processing failed: boom"]
        );
    }

    #[test]
    fn json_is_pretty_array_of_records() {
        let records: Vec<IconRecord> = catalog::all().iter().map(|d| d.to_record()).collect();
        let lines = format_json(&records).unwrap();

        assert_eq!(lines.first().map(String::as_str), Some("["));
        assert_eq!(lines.last().map(String::as_str), Some("]"));
        assert!(lines.iter().any(|l| l.contains(r#""role": null"#)));

        let parsed: Vec<IconRecord> = serde_json::from_str(&lines.join("\n")).unwrap();
        assert_eq!(parsed, records);
    }
}
