//! Console rendering and CSV export for comparison runs.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use crate::experiment::ComparisonReport;

/// Dataset/split summary block printed before the per-strategy sections.
pub fn render_split_summary(report: &ComparisonReport) -> String {
    let train_total = report.train_positive + report.train_negative;
    let test_total = report.test_positive + report.test_negative;

    let mut out = String::new();
    let _ = writeln!(out, "----- Dataset Split Summary -----");
    let _ = writeln!(
        out,
        "Train: {} samples ({} positive / {} negative)",
        train_total, report.train_positive, report.train_negative
    );
    let _ = writeln!(
        out,
        "Test:  {} samples ({} positive / {} negative)",
        test_total, report.test_positive, report.test_negative
    );
    let _ = write!(out, "---------------------------------");
    out
}

/// Per-strategy sections: confusion cross-tab plus metrics, then a closing
/// comparison table with metrics to two decimal places.
pub fn render_comparison(report: &ComparisonReport) -> String {
    let mut out = String::new();

    for outcome in &report.outcomes {
        let _ = writeln!(out, "=== {} ===", outcome.strategy.name());
        match &outcome.result {
            Ok(run) => {
                if let Some(scale) = run.scale_pos_weight {
                    let _ = writeln!(out, "positive-class weight scale: {:.2}", scale);
                }
                let _ = writeln!(out, "{}", run.confusion);
                let _ = writeln!(out, "{}", run.metrics);
            }
            Err(e) => {
                let _ = writeln!(out, "run failed: {:#}", e);
            }
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(
        out,
        "{:<24} {:>9} {:>10} {:>7}",
        "strategy", "accuracy", "precision", "recall"
    );
    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(run) => {
                let _ = writeln!(
                    out,
                    "{:<24} {:>9.2} {:>10.2} {:>7.2}",
                    outcome.strategy.name(),
                    run.metrics.accuracy,
                    run.metrics.precision,
                    run.metrics.recall
                );
            }
            Err(_) => {
                let _ = writeln!(
                    out,
                    "{:<24} {:>9} {:>10} {:>7}",
                    outcome.strategy.name(),
                    "-",
                    "-",
                    "-"
                );
            }
        }
    }

    out
}

/// Dump per-sample test scores of every successful run to a CSV file with
/// columns `strategy,row,actual,score,predicted`.
pub fn write_scores_csv<P: AsRef<Path>>(report: &ComparisonReport, path: P) -> Result<()> {
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("Failed to create {}", path.as_ref().display()))?;

    writer.write_record(["strategy", "row", "actual", "score", "predicted"])?;
    for outcome in &report.outcomes {
        let run = match &outcome.result {
            Ok(run) => run,
            Err(_) => continue,
        };
        for (row, (&score, &predicted)) in run.scores.iter().zip(&run.predicted).enumerate() {
            writer.write_record([
                outcome.strategy.name().to_string(),
                row.to_string(),
                report.test_labels[row].to_string(),
                format!("{:.6}", score),
                predicted.to_string(),
            ])?;
        }
    }
    writer.flush()?;
    Ok(())
}
