//! Report generation business logic.
//!
//! Combines per-subject counts with the user's threshold into a structured report, and
//! provides the text helpers the bot uses to render it. All functions are
//! framework-agnostic and return data the interface layers format themselves.

use crate::{
    core::{
        attendance::{SubjectStats, get_subject_stats},
        engine::{
            AttendanceCounts, Classification, OverallStats, Requirement, RequirementKind,
            RiskStatus, aggregate, classify, compute_requirement, subjects_at_risk,
        },
        settings::get_settings,
    },
    entities::subject,
    errors::Result,
};
use sea_orm::DatabaseConnection;
use serde::Serialize;

/// Report line for one subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectReport {
    /// The subject reported on
    pub subject: subject::Model,
    /// Days marked present
    pub present_days: u32,
    /// Days marked absent
    pub absent_days: u32,
    /// Days marked off, excluded from the percentage
    pub off_days: u32,
    /// Present plus absent
    pub total_days: u32,
    /// Rounded percentage and risk status
    #[serde(flatten)]
    pub classification: Classification,
    /// Classes that can be missed or must be attended
    pub requirement: Requirement,
}

/// Full attendance report of one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceReport {
    /// Threshold the report was computed against
    pub min_percentage: u8,
    /// One line per subject, ordered by name
    pub subjects: Vec<SubjectReport>,
    /// Totals across every subject
    pub overall: OverallStats,
    /// IDs of subjects below the threshold
    pub at_risk: Vec<i64>,
}

impl AttendanceReport {
    /// Report lines of subjects below the threshold
    pub fn at_risk_subjects(&self) -> impl Iterator<Item = &SubjectReport> {
        self.subjects
            .iter()
            .filter(|s| self.at_risk.contains(&s.subject.id))
    }
}

/// Builds a report from already-counted subjects.
#[must_use]
pub fn build_report(stats: Vec<SubjectStats>, min_percentage: u8) -> AttendanceReport {
    let threshold = u32::from(min_percentage);
    let overall = aggregate(&stats);
    let at_risk = subjects_at_risk(&stats, threshold)
        .into_iter()
        .map(|s| s.subject.id)
        .collect();

    let subjects: Vec<SubjectReport> = stats
        .into_iter()
        .map(|s| {
            let total_days = s.total_days();
            SubjectReport {
                classification: classify(s.present_days, total_days, threshold),
                requirement: compute_requirement(s.present_days, total_days, threshold),
                present_days: s.present_days,
                absent_days: s.absent_days,
                off_days: s.off_days,
                total_days,
                subject: s.subject,
            }
        })
        .collect();

    AttendanceReport {
        min_percentage,
        subjects,
        overall,
        at_risk,
    }
}

/// Generates the full attendance report for one user.
///
/// Counts every subject's records and evaluates them against the user's stored
/// threshold, or `default_min` when they never set one.
///
/// # Arguments
/// * `db` - Database connection
/// * `user_id` - User to report on
/// * `default_min` - Threshold used when the user has no stored setting
///
/// # Returns
/// A structured `AttendanceReport` with per-subject lines, totals and the at-risk list
pub async fn generate_user_report(
    db: &DatabaseConnection,
    user_id: &str,
    default_min: u8,
) -> Result<AttendanceReport> {
    let settings = get_settings(db, user_id, default_min).await?;
    let stats = get_subject_stats(db, user_id).await?;
    Ok(build_report(stats, settings.min_percentage))
}

/// Generates a progress bar string for visual representation.
///
/// Creates a text-based progress bar like: `[████████░░] 80%`
#[must_use]
pub fn format_progress_bar(percentage: u32, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped = usize::try_from(percentage.min(100)).unwrap_or(100);

    // Round half up to the nearest cell
    let filled = (clamped * length + 50) / 100;
    let empty = length.saturating_sub(filled);

    let filled_str = "█".repeat(filled);
    let empty_str = "░".repeat(empty);

    format!("[{filled_str}{empty_str}] {percentage}%")
}

/// Describes a requirement in words, e.g. "Can miss 2 classes".
#[must_use]
pub fn format_requirement(requirement: &Requirement) -> String {
    let classes = |n: u32| if n == 1 { "class" } else { "classes" };

    match (requirement.kind, requirement.count) {
        (RequirementKind::Unknown, _) => "No classes recorded yet".to_string(),
        (RequirementKind::CanMiss, None) => "Can miss any number of classes".to_string(),
        (RequirementKind::CanMiss, Some(0)) => "Cannot miss the next class".to_string(),
        (RequirementKind::CanMiss, Some(n)) => format!("Can miss {n} {}", classes(n)),
        (RequirementKind::NeedAttend, None) => "Threshold can no longer be reached".to_string(),
        (RequirementKind::NeedAttend, Some(n)) => {
            format!("Attend the next {n} {} in a row", classes(n))
        }
    }
}

/// Emoji marker for a risk status.
#[must_use]
pub const fn status_emoji(status: RiskStatus) -> &'static str {
    match status {
        RiskStatus::Safe => "✅",
        RiskStatus::AtRisk => "⚠️",
        RiskStatus::Unknown => "❔",
    }
}

/// One display line for a subject, e.g. `✅ **Math** [████████░░] 80% (8/10) - Cannot miss the next class`.
#[must_use]
pub fn format_subject_line(report: &SubjectReport) -> String {
    let emoji = status_emoji(report.classification.status);
    let name = &report.subject.name;

    if report.total_days == 0 {
        return format!("{emoji} **{name}** - {}", format_requirement(&report.requirement));
    }

    let bar = format_progress_bar(report.classification.percentage, None);
    format!(
        "{emoji} **{name}** {bar} ({}/{}) - {}",
        report.present_days,
        report.total_days,
        format_requirement(&report.requirement)
    )
}
