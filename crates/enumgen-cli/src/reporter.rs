use colored::Colorize;

use crate::driver::{RunMode, RunReport, TargetOutcome};

/// Renders a `RunReport` as the lines printed to stdout.
pub struct Reporter {
    color: bool,
    verbose: bool,
}

impl Reporter {
    pub fn new(color: bool, verbose: bool) -> Self {
        Reporter { color, verbose }
    }

    pub fn render(&self, report: &RunReport) -> String {
        let mut out = String::new();

        if self.verbose {
            for name in &report.skipped_provisional {
                out.push_str(&format!("Ignoring provisional extension {name}\n"));
            }
        } else if !report.skipped_provisional.is_empty() {
            out.push_str(&format!(
                "Ignored {} provisional extension(s)\n",
                report.skipped_provisional.len()
            ));
        }

        let stats = report.stats;
        out.push_str(&format!(
            "{} enums, {} native values, {} extension values ({} excluded, {} without a scalar enum)\n",
            stats.enums,
            stats.native_values,
            stats.extension_values,
            stats.excluded_contributions,
            stats.orphaned_contributions
        ));

        for target in &report.targets {
            out.push_str(&self.format_target(report.mode, target));
            out.push('\n');
        }
        out
    }

    pub fn format_target(&self, mode: RunMode, target: &TargetOutcome) -> String {
        let path = target.path.display();
        let (label, color_label) = match (mode, target.changed) {
            (RunMode::Write, true) => ("Processed", "Processed".green()),
            (RunMode::Write, false) => ("Unchanged", "Unchanged".dimmed()),
            (RunMode::Check, true) => ("Stale", "Stale".yellow().bold()),
            (RunMode::Check, false) => ("Up to date", "Up to date".green()),
        };
        if self.color {
            format!("{color_label} {path}.")
        } else {
            format!("{label} {path}.")
        }
    }
}
