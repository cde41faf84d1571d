//! Output formatting for the non-interactive commands.
//!
//! Pure functions: (data, OutputFormat) -> String. No I/O.

use std::path::Path;
use std::time::Duration;

use humansize::{format_size, BINARY};
use serde::Serialize;

use crate::catalog::Catalog;
use crate::types::{DrawReport, OutputFormat};

/// Format the catalog listing.
pub fn format_catalog(catalog: &Catalog, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_catalog_human(catalog),
        OutputFormat::Json => to_json(&catalog.summaries()),
    }
}

/// Format a sequence of drawn quotes.
pub fn format_draw(report: &DrawReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_draw_human(report),
        OutputFormat::Json => to_json(report),
    }
}

/// One-line confirmation after exporting the chime.
pub fn format_chime_written(path: &Path, bytes: u64, length: Duration, sample_rate: u32) -> String {
    format!(
        "Wrote {} ({}, {:.2}s at {} Hz)\n",
        path.display(),
        format_size(bytes, BINARY),
        length.as_secs_f32(),
        sample_rate
    )
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn format_catalog_human(catalog: &Catalog) -> String {
    let mut out = String::new();
    out.push_str("=== Moods ===\n");

    let width = catalog.keys().map(|k| k.chars().count()).max().unwrap_or(0);
    for (i, summary) in catalog.summaries().iter().enumerate() {
        out.push_str(&format!(
            "[{}] {:<width$}  {} {} ({} quote{})\n",
            i + 1,
            summary.key,
            summary.icon,
            summary.name,
            summary.variant_count,
            if summary.variant_count == 1 { "" } else { "s" },
            width = width
        ));
    }

    if let Some(default) = catalog.default_key() {
        out.push_str(&format!("\nDefault mood: {}\n", default));
    }
    out
}

fn format_draw_human(report: &DrawReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== {} ===\n", report.category));

    if report.quotes.iter().all(|q| q.is_empty()) {
        out.push_str("(no quotes)\n");
        return out;
    }

    for (i, quote) in report.quotes.iter().enumerate() {
        out.push_str(&format!("{:>3}. {}\n", i + 1, quote));
    }
    out
}

// ============================================================================
// JSON FORMAT
// ============================================================================

fn to_json<T: Serialize>(value: &T) -> String {
    match serde_json::to_string_pretty(value) {
        Ok(mut json) => {
            json.push('\n');
            json
        }
        Err(e) => format!("{{\"error\": {:?}}}\n", e.to_string()),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample_draw() -> DrawReport {
        DrawReport {
            category: "calm".into(),
            seed: Some(7),
            quotes: vec!["first".into(), "second".into()],
        }
    }

    // --- Human format tests ---

    #[test]
    fn human_catalog_lists_every_mood_in_order() {
        let output = format_catalog(&Catalog::builtin(), OutputFormat::Human);

        assert!(output.contains("=== Moods ==="));
        let happy = output.find("Unicorn").unwrap();
        let calm = output.find("Forest Hawk").unwrap();
        assert!(happy < calm);
        assert!(output.contains("[5] calm"));
        assert!(output.contains("(5 quotes)"));
        assert!(output.contains("Default mood: happy"));
    }

    #[test]
    fn human_draw_numbers_quotes() {
        let output = format_draw(&sample_draw(), OutputFormat::Human);

        assert!(output.contains("=== calm ==="));
        assert!(output.contains("  1. first"));
        assert!(output.contains("  2. second"));
    }

    #[test]
    fn human_draw_of_empty_pool_says_so() {
        let report = DrawReport {
            category: "quiet".into(),
            seed: None,
            quotes: vec![String::new(), String::new()],
        };
        let output = format_draw(&report, OutputFormat::Human);
        assert!(output.contains("(no quotes)"));
    }

    #[test]
    fn chime_written_reports_size() {
        let line = format_chime_written(
            &PathBuf::from("/tmp/chime.wav"),
            132_344,
            Duration::from_millis(1500),
            44_100,
        );
        assert!(line.contains("/tmp/chime.wav"));
        assert!(line.contains("KiB"));
        assert!(line.contains("1.50s"));
        assert!(line.contains("44100 Hz"));
    }

    // --- JSON format tests ---

    #[test]
    fn json_catalog_is_array_of_summaries() {
        let output = format_catalog(&Catalog::builtin(), OutputFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&output).expect("Invalid JSON");

        let rows = parsed.as_array().unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0]["key"], "happy");
        assert_eq!(rows[0]["variant_count"], 5);
    }

    #[test]
    fn json_draw_has_expected_fields() {
        let output = format_draw(&sample_draw(), OutputFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["category"], "calm");
        assert_eq!(parsed["seed"], 7);
        assert_eq!(parsed["quotes"].as_array().unwrap().len(), 2);
    }
}
