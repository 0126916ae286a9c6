//! Plain-text rendering of scan progress and normalized reports.

use pulsecore::report::NormalizedReport;
use pulsecore::scan::ScanState;
use std::fmt::Write;
use std::io;

const BAR_WIDTH: usize = 24;

fn bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), "-".repeat(width - filled))
}

pub fn progress_line(state: &ScanState) -> String {
    format!(
        "[{}] {:>3}% {}",
        bar(state.progress, BAR_WIDTH),
        state.progress.round() as u32,
        state.phase_label()
    )
}

/// Redraws the progress line in place on a terminal stream.
pub fn draw_progress<W: io::Write>(out: &mut W, state: &ScanState) -> io::Result<()> {
    write!(out, "\r{}\x1b[K", progress_line(state))?;
    out.flush()
}

pub fn report_text(report: &NormalizedReport) -> String {
    let mut out = String::new();
    let summary = &report.summary;

    let _ = writeln!(out, "Verdict: {}", report.verdict.label());
    let _ = writeln!(
        out,
        "AI {}% / Human {}%",
        report.ai_split.ai, report.ai_split.human
    );
    let _ = writeln!(out, "Final AI score: {}", summary.final_ai_score_text);
    let _ = writeln!(out, "Forensic score: {}", summary.forensic_score_text);
    let _ = writeln!(out);

    let _ = writeln!(out, "Analysis summary");
    for (label, value) in [
        ("AI generated", format!("{}%", summary.ai_generated_percent)),
        ("Final AI score", format!("{}%", summary.final_ai_percent)),
        ("Forensic AI %", format!("{}%", summary.forensic_ai_percent)),
        (
            "Metadata adjustment",
            format!("{}%", summary.metadata_adjustment_percent),
        ),
        ("Sightengine ops", summary.operations_count.to_string()),
        ("Image size", summary.image_size_label.clone()),
        (
            "EXIF present",
            if summary.exif_present { "Yes" } else { "No" }.to_string(),
        ),
    ] {
        let _ = writeln!(out, "  {:<20} {}", label, value);
    }

    section(
        &mut out,
        "Local forensics",
        report
            .local_series
            .iter()
            .map(|entry| (entry.label.as_str(), entry.percent)),
    );
    section(
        &mut out,
        "Hybrid summary",
        report
            .hybrid_series
            .iter()
            .map(|entry| (entry.label, entry.percent)),
    );
    section(
        &mut out,
        "Breakdown",
        report
            .breakdown_bars
            .iter()
            .map(|row| (row.label.as_str(), row.percent)),
    );

    out
}

fn section<'a, I>(out: &mut String, title: &str, rows: I)
where
    I: Iterator<Item = (&'a str, u8)>,
{
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", title);
    let mut empty = true;
    for (label, percent) in rows {
        empty = false;
        let _ = writeln!(
            out,
            "  {:<20} [{}] {:>3}%",
            label,
            bar(percent as f64, BAR_WIDTH),
            percent
        );
    }
    if empty {
        let _ = writeln!(out, "  no data");
    }
}
