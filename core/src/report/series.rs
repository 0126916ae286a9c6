//! Chart-ready series built from an [`AnalysisResult`](super::AnalysisResult).

use crate::math::PercentHelper;
use crate::prelude::Percent;
use crate::report::model::{Breakdown, HybridScores, LocalForensics};
use serde::Serialize;

/// Display color carried by a series entry, as a `#rrggbb` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorTag(&'static str);

impl ColorTag {
    pub const INDIGO: ColorTag = ColorTag("#6366f1");
    pub const AMBER: ColorTag = ColorTag("#f59e0b");
    pub const EMERALD: ColorTag = ColorTag("#10b981");
    pub const RED: ColorTag = ColorTag("#ef4444");
    pub const VIOLET: ColorTag = ColorTag("#8b5cf6");
    pub const GREEN: ColorTag = ColorTag("#22c55e");
    pub const CYAN: ColorTag = ColorTag("#06b6d4");
    pub const ORANGE: ColorTag = ColorTag("#f97316");

    pub fn rgb(&self) -> (u8, u8, u8) {
        let channel = |range: std::ops::Range<usize>| {
            self.0
                .get(range)
                .and_then(|digits| u8::from_str_radix(digits, 16).ok())
                .unwrap_or(0)
        };
        (channel(1..3), channel(3..5), channel(5..7))
    }
}

/// Palette cycled over breakdown bar rows.
pub const PALETTE: [ColorTag; 8] = [
    ColorTag::INDIGO,
    ColorTag::AMBER,
    ColorTag::EMERALD,
    ColorTag::RED,
    ColorTag::VIOLET,
    ColorTag::GREEN,
    ColorTag::CYAN,
    ColorTag::ORANGE,
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesEntry {
    pub label: String,
    pub percent: Percent,
}

/// Breakdown entry that remembers which metric/score pair it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownEntry {
    pub index: usize,
    pub label: String,
    pub percent: Percent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HybridEntry {
    pub label: &'static str,
    pub percent: Percent,
    pub color: ColorTag,
}

/// One row of the breakdown bar list. Unlike the chart series, zero rows stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarRow {
    pub index: usize,
    pub label: String,
    pub percent: Percent,
    pub color: ColorTag,
}

pub fn build_local_series(local: &LocalForensics) -> Vec<SeriesEntry> {
    [
        ("Frequency", local.frequency),
        ("Noise", local.noise),
        ("Compression", local.compression),
        ("Color Corr", local.color_corr),
    ]
    .into_iter()
    .map(|(label, value)| SeriesEntry {
        label: label.to_string(),
        percent: PercentHelper::from_unit_interval(value),
    })
    .filter(|entry| entry.percent > 0)
    .collect()
}

pub fn build_breakdown_series(breakdown: &Breakdown) -> Vec<BreakdownEntry> {
    breakdown
        .metrics
        .iter()
        .enumerate()
        .map(|(index, metric)| BreakdownEntry {
            index,
            label: display_metric(metric),
            percent: PercentHelper::from_percent_scale(breakdown.score_at(index)),
        })
        .filter(|entry| entry.percent > 0)
        .collect()
}

pub fn build_breakdown_bars(breakdown: &Breakdown) -> Vec<BarRow> {
    breakdown
        .metrics
        .iter()
        .enumerate()
        .map(|(index, metric)| BarRow {
            index,
            label: display_metric(metric),
            percent: PercentHelper::from_ambiguous_scale(breakdown.score_at(index)),
            color: PALETTE[index % PALETTE.len()],
        })
        .collect()
}

pub fn build_hybrid_series(hybrid: &HybridScores) -> Vec<HybridEntry> {
    [
        (
            "API AI",
            PercentHelper::from_ambiguous_scale(hybrid.api_ai_score),
            ColorTag::INDIGO,
        ),
        (
            "Forensic AI %",
            PercentHelper::from_percent_scale(hybrid.forensic_ai_pct),
            ColorTag::AMBER,
        ),
        (
            "Metadata Adjust",
            PercentHelper::from_percent_scale(hybrid.metadata_adjustment),
            ColorTag::VIOLET,
        ),
        (
            "Final AI Score",
            PercentHelper::from_ambiguous_scale(hybrid.final_ai_score),
            ColorTag::RED,
        ),
    ]
    .into_iter()
    .filter(|(_, percent, _)| *percent > 0)
    .map(|(label, percent, color)| HybridEntry {
        label,
        percent,
        color,
    })
    .collect()
}

fn display_metric(metric: &str) -> String {
    if metric == "Color" {
        "Color correction".to_string()
    } else {
        metric.to_string()
    }
}
