//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! Home → index.html
//! 001 Maria → stories/maria.html
//! 002 Troy → stories/troy.html
//!
//! Generated 3 pages
//! ```
//!
//! ## Check
//!
//! ```text
//! Backend probes
//! stories          ok (1 row visible)
//! participants     ok (0 rows visible)
//! impact_metrics   FAILED: relation "public.impact_metrics" does not exist
//!
//! 2/3 probes succeeded
//! ```

use crate::probe::ProbeResult;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

// ============================================================================
// Build output
// ============================================================================

/// Format build output: one arrow line per written page, then a total.
///
/// The first page is the index and shown as `Home`; story pages lead with
/// their positional index and the story name.
pub fn format_build_output(pages: &[(String, String)]) -> Vec<String> {
    let mut lines = Vec::new();

    for (i, (title, path)) in pages.iter().enumerate() {
        if i == 0 {
            lines.push(format!("{title} → {path}"));
        } else {
            lines.push(format!("{} {} → {}", format_index(i), title, path));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {} page{}",
        pages.len(),
        if pages.len() == 1 { "" } else { "s" }
    ));
    lines
}

/// Print build output to stdout.
pub fn print_build_output(pages: &[(String, String)]) {
    for line in format_build_output(pages) {
        println!("{}", line);
    }
}

// ============================================================================
// Probe output
// ============================================================================

/// Format the probe report: one status line per table, then a tally.
///
/// Table names are left-padded to a shared column so the statuses align.
pub fn format_probe_report(results: &[ProbeResult]) -> Vec<String> {
    let mut lines = vec!["Backend probes".to_string()];

    let width = results
        .iter()
        .map(|r| r.table.len())
        .max()
        .unwrap_or(0);

    let mut ok_count = 0;
    for result in results {
        let status = match &result.outcome {
            Ok(rows) => {
                ok_count += 1;
                format!("ok ({} row{} visible)", rows, if *rows == 1 { "" } else { "s" })
            }
            Err(message) => format!("FAILED: {message}"),
        };
        lines.push(format!("{:<width$}   {}", result.table, status));
    }

    lines.push(String::new());
    lines.push(format!("{}/{} probes succeeded", ok_count, results.len()));
    lines
}

/// Print the probe report to stdout.
pub fn print_probe_report(results: &[ProbeResult]) {
    for line in format_probe_report(results) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(title: &str, path: &str) -> (String, String) {
        (title.to_string(), path.to_string())
    }

    // =========================================================================
    // Build output tests
    // =========================================================================

    #[test]
    fn build_output_home_then_indexed_stories() {
        let pages = vec![
            page("Home", "index.html"),
            page("Maria", "stories/maria.html"),
            page("Troy", "stories/troy.html"),
        ];
        let lines = format_build_output(&pages);
        assert_eq!(lines[0], "Home → index.html");
        assert_eq!(lines[1], "001 Maria → stories/maria.html");
        assert_eq!(lines[2], "002 Troy → stories/troy.html");
        assert_eq!(lines.last().unwrap(), "Generated 3 pages");
    }

    #[test]
    fn build_output_single_page_singular() {
        let lines = format_build_output(&[page("Home", "index.html")]);
        assert_eq!(lines.last().unwrap(), "Generated 1 page");
    }

    // =========================================================================
    // Probe report tests
    // =========================================================================

    #[test]
    fn probe_report_aligns_and_tallies() {
        let results = vec![
            ProbeResult {
                table: "stories",
                outcome: Ok(1),
            },
            ProbeResult {
                table: "impact_metrics",
                outcome: Err("permission denied".to_string()),
            },
        ];
        let lines = format_probe_report(&results);
        assert_eq!(lines[0], "Backend probes");
        assert_eq!(lines[1], "stories          ok (1 row visible)");
        assert_eq!(lines[2], "impact_metrics   FAILED: permission denied");
        assert_eq!(lines.last().unwrap(), "1/2 probes succeeded");
    }

    #[test]
    fn probe_report_pluralizes_rows() {
        let results = vec![ProbeResult {
            table: "stories",
            outcome: Ok(0),
        }];
        let lines = format_probe_report(&results);
        assert!(lines[1].contains("0 rows visible"));
    }
}
