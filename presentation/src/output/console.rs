//! Console output formatter for provenance results

use colored::Colorize;
use wikiprov_domain::{ProvenanceEnvelope, ProvenanceRecord};

/// Formats provenance for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Human-readable rendering of one record
    pub fn format_record(record: &ProvenanceRecord) -> String {
        if let Some(error) = &record.error {
            return format!("{} {}\n", "Error:".red().bold(), error);
        }

        let mut output = String::new();
        output.push_str(&format!("{} {}\n", "Record:".cyan().bold(), record.title));
        output.push_str(&format!("{} {}\n", "Revision:".cyan().bold(), record.revision));

        let modified = match record.modified_at() {
            Some(at) => at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            None => record.modified.clone(),
        };
        output.push_str(&format!("{} {}\n", "Modified:".cyan().bold(), modified));
        output.push_str(&format!("{} {}\n", "Permalink:".cyan().bold(), record.permalink));

        if !record.history.is_empty() {
            output.push_str(&format!("\n{}\n", "History:".yellow().bold()));
            for line in &record.history {
                output.push_str(&format!("  * {}\n", line));
            }
        }

        output
    }

    /// Format a record as JSON
    pub fn format_record_json(record: &ProvenanceRecord) -> String {
        record
            .to_json_pretty()
            .unwrap_or_else(|_| "{}".to_string())
    }

    /// Format query results and their provenance as JSON
    pub fn format_envelope_json(envelope: &ProvenanceEnvelope) -> String {
        envelope
            .to_json_pretty()
            .unwrap_or_else(|_| "{}".to_string())
    }

    /// One-line summary of a provenance run, for stderr
    pub fn format_summary(envelope: &ProvenanceEnvelope) -> String {
        let rows = envelope.results.bindings.len();
        if !envelope.has_provenance() {
            return format!("{} {} rows, no provenance requested", "->".cyan(), rows);
        }

        let total = envelope.provenance.len();
        let failed = envelope.provenance.iter().filter(|r| !r.is_success()).count();
        let records = format!("{} rows, provenance for {} records", rows, total);
        if failed == 0 {
            format!("{} {}", "v".green(), records)
        } else {
            format!("{} {} ({} failed)", "x".red(), records, failed)
        }
    }
}
