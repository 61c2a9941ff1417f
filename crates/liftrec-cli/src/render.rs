use serde::Serialize;

use liftrec_ledger::{ImprovementEvent, PercentGlowUp, Tally, ValidationReport, WrappedReport};

use crate::config::ReportConfig;

pub const WARNING_PREFIX: &str = "⚠️  ";
pub const SUCCESS_PREFIX: &str = "✅ ";

const NO_DATA: &str = "   (no data)";

/// Output lines of `liftrec check`, in print order.
pub fn check_lines(report: &ValidationReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .skipped_rows
        .iter()
        .map(|row| format!("{WARNING_PREFIX}{row}"))
        .collect();

    if report.is_clean() {
        lines.push(format!(
            "{SUCCESS_PREFIX}Checked {} file(s); no issues found.",
            report.files_checked
        ));
    } else {
        lines.extend(
            report
                .warnings
                .iter()
                .map(|warning| format!("{WARNING_PREFIX}{warning}")),
        );
        lines.push(format!(
            "{WARNING_PREFIX}Finished with {} warning(s).",
            report.warnings.len()
        ));
    }
    lines
}

fn label(name: &str) -> &str {
    if name.is_empty() {
        "(unknown)"
    } else {
        name
    }
}

fn section(out: &mut String, title: &str, lines: Vec<String>) {
    out.push('\n');
    out.push_str(title);
    out.push('\n');
    if lines.is_empty() {
        out.push_str(NO_DATA);
        out.push('\n');
    }
    for (idx, line) in lines.iter().enumerate() {
        out.push_str(&format!("{:2}. {line}\n", idx + 1));
    }
}

fn tally_lines(tally: &Tally, limit: usize) -> Vec<String> {
    tally
        .top(limit)
        .into_iter()
        .map(|(name, count)| format!("{} — {count}", label(name)))
        .collect()
}

fn glow_up_line(event: &ImprovementEvent) -> String {
    format!(
        "{} ({}) +{:.1} → {:.1} at {} [{}]",
        label(&event.lifter),
        event.key,
        event.delta,
        event.new_weight,
        label(&event.location),
        event.source
    )
}

fn percent_line(glow: &PercentGlowUp<'_>) -> String {
    let event = glow.event;
    format!(
        "{} ({}) +{:.1}% ({:.1} → {:.1}) at {} [{}]",
        label(&event.lifter),
        event.key,
        glow.percent,
        event.previous_weight,
        event.new_weight,
        label(&event.location),
        event.source
    )
}

fn oldest_line(event: &ImprovementEvent) -> String {
    format!(
        "{} ({}) stood {}: {:.1} → {:.1} [{} → {}]",
        label(&event.lifter),
        event.key,
        event.age(),
        event.previous_weight,
        event.new_weight,
        event.previous_source,
        event.source
    )
}

/// Plain-text year-end report.
pub fn wrapped_text(report: &WrappedReport, limits: &ReportConfig) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", limits.title, report.year));
    out.push_str(&format!("{}\n", "=".repeat(40)));
    out.push_str(&format!(
        "Records broken (all divisions): {}\n",
        report.total_broken
    ));
    out.push_str(&format!(
        "- Total kg added to existing records: {:.1}\n",
        report.total_kg_added
    ));
    out.push_str(&format!(
        "- Fresh records set from scratch: {}\n",
        report.new_records
    ));
    out.push_str(&format!(
        "- Distinct lifters hitting the board: {}\n",
        report.distinct_lifters()
    ));

    section(
        &mut out,
        &format!("Where the magic happened (top {})", limits.locations),
        tally_lines(&report.locations, limits.locations),
    );
    section(
        &mut out,
        &format!("All-time hitters (tested + untested, top {})", limits.lifters),
        tally_lines(&report.lifters, limits.lifters),
    );
    section(
        &mut out,
        &format!("Tested spotlight (top {})", limits.lifters),
        tally_lines(&report.tested_lifters, limits.lifters),
    );
    section(
        &mut out,
        &format!("Untested spotlight (top {})", limits.lifters),
        tally_lines(&report.untested_lifters, limits.lifters),
    );

    let biggest = report.biggest_glow_ups(limits.glow_ups);
    if biggest.is_empty() {
        out.push_str("\nBiggest glow-ups (no qualifying improvements)\n");
    } else {
        section(
            &mut out,
            "Biggest glow-ups (excluding brand new records)",
            biggest.into_iter().map(glow_up_line).collect(),
        );
    }
    section(
        &mut out,
        &format!("Open division glow-ups (top {})", limits.glow_ups),
        report
            .open_glow_ups(limits.glow_ups)
            .into_iter()
            .map(glow_up_line)
            .collect(),
    );
    section(
        &mut out,
        &format!("Biggest glow-ups by percentage (top {})", limits.glow_ups),
        report
            .percentage_glow_ups(limits.glow_ups)
            .iter()
            .map(percent_line)
            .collect(),
    );
    section(
        &mut out,
        &format!("Open division glow-ups by percentage (top {})", limits.glow_ups),
        report
            .open_percentage_glow_ups(limits.glow_ups)
            .iter()
            .map(percent_line)
            .collect(),
    );
    section(
        &mut out,
        &format!("Oldest records broken (top {})", limits.oldest),
        report
            .oldest_records_broken(limits.oldest)
            .into_iter()
            .map(oldest_line)
            .collect(),
    );
    section(
        &mut out,
        &format!("Total kg added leaderboard (top {})", limits.kg_added),
        report
            .kg_added_leaderboard(limits.kg_added)
            .into_iter()
            .map(|(name, total)| format!("{} — {total:.1} kg", label(name)))
            .collect(),
    );
    out
}

/// JSON shape of `liftrec wrapped --format json`: raw aggregates plus
/// every ranking, cut to the configured limits.
#[derive(Serialize)]
pub struct WrappedView<'a> {
    #[serde(flatten)]
    pub report: &'a WrappedReport,
    pub distinct_lifters: usize,
    pub biggest_glow_ups: Vec<&'a ImprovementEvent>,
    pub open_glow_ups: Vec<&'a ImprovementEvent>,
    pub percentage_glow_ups: Vec<PercentGlowUp<'a>>,
    pub open_percentage_glow_ups: Vec<PercentGlowUp<'a>>,
    pub oldest_records_broken: Vec<&'a ImprovementEvent>,
    pub kg_added_leaderboard: Vec<(&'a str, f64)>,
}

impl<'a> WrappedView<'a> {
    pub fn new(report: &'a WrappedReport, limits: &ReportConfig) -> Self {
        Self {
            report,
            distinct_lifters: report.distinct_lifters(),
            biggest_glow_ups: report.biggest_glow_ups(limits.glow_ups),
            open_glow_ups: report.open_glow_ups(limits.glow_ups),
            percentage_glow_ups: report.percentage_glow_ups(limits.glow_ups),
            open_percentage_glow_ups: report.open_percentage_glow_ups(limits.glow_ups),
            oldest_records_broken: report.oldest_records_broken(limits.oldest),
            kg_added_leaderboard: report.kg_added_leaderboard(limits.kg_added),
        }
    }
}
