//! Progress reporting for provenance fetches

use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Mutex;
use wikiprov_application::ProvenanceProgress;
use wikiprov_domain::EntityIdentifier;

/// Reports fetch progress with a progress bar on stderr
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
    failures: Mutex<usize>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
            failures: Mutex::new(0),
        }
    }

    fn fetch_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProvenanceProgress for ProgressReporter {
    fn on_fetch_start(&self, total: usize) {
        let pb = ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::stderr());
        pb.set_style(Self::fetch_style());
        pb.set_prefix("Provenance");
        pb.set_message("Starting...");

        if let Ok(mut failures) = self.failures.lock() {
            *failures = 0;
        }
        if let Ok(mut bar) = self.bar.lock() {
            *bar = Some(pb);
        }
    }

    fn on_record_complete(&self, id: &EntityIdentifier, success: bool) {
        if !success && let Ok(mut failures) = self.failures.lock() {
            *failures += 1;
        }
        if let Ok(bar) = self.bar.lock()
            && let Some(pb) = bar.as_ref()
        {
            let status = if success {
                format!("{} {}", "v".green(), id)
            } else {
                format!("{} {}", "x".red(), id)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_fetch_complete(&self) {
        let failures = self.failures.lock().map(|f| *f).unwrap_or_default();
        if let Ok(mut bar) = self.bar.lock()
            && let Some(pb) = bar.take()
        {
            let message = if failures == 0 {
                "complete!".green().to_string()
            } else {
                format!("complete, {} failed", failures).yellow().to_string()
            };
            pb.finish_with_message(message);
        }
    }
}

/// Simple text-based progress on stderr (no fancy UI)
pub struct SimpleProgress;

impl ProvenanceProgress for SimpleProgress {
    fn on_fetch_start(&self, total: usize) {
        eprintln!("{} {} ({} records)", "->".cyan(), "Fetching provenance".bold(), total);
    }

    fn on_record_complete(&self, id: &EntityIdentifier, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), id);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), id);
        }
    }

    fn on_fetch_complete(&self) {
        eprintln!();
    }
}
