//! Attendance requirement engine.
//!
//! Pure functions that turn per-subject present/total counts and a minimum-percentage
//! threshold into a percentage, a risk status, and the number of classes that must be
//! attended (or may be skipped) to stay at or above the threshold.
//!
//! Nothing here touches storage or fails. Degenerate inputs degrade to neutral results:
//! no recorded classes yields [`RiskStatus::Unknown`], and the boundary thresholds 0 and
//! 100 yield an unbounded requirement (`count == None`).
//!
//! The arithmetic is integral. With threshold `m` percent, "can miss" is the largest `k`
//! with `100 * present >= m * (total + k)` and "need attend" is the smallest `n` with
//! `100 * (present + n) >= m * (total + n)`.

use serde::{Deserialize, Serialize};

/// Whether a subject currently meets the threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RiskStatus {
    /// Rounded percentage is at or above the threshold
    Safe,
    /// Rounded percentage is below the threshold
    AtRisk,
    /// No classes recorded yet
    Unknown,
}

/// Current percentage and risk status of one subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Rounded attendance percentage
    pub percentage: u32,
    /// Risk status against the threshold
    pub status: RiskStatus,
}

/// Which direction the forward-looking requirement points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RequirementKind {
    /// Classes that can be missed while staying at or above the threshold
    CanMiss,
    /// Classes that must be attended in a row to reach the threshold
    NeedAttend,
    /// Nothing recorded yet
    Unknown,
}

/// Forward-looking requirement for one subject.
///
/// `count == None` means no finite number applies: any number of classes can be missed
/// at a 0% threshold, and no run of attended classes recovers from an absence at 100%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// Direction of the requirement
    #[serde(rename = "type")]
    pub kind: RequirementKind,
    /// Number of classes, `None` when unbounded
    pub count: Option<u32>,
}

impl Requirement {
    const fn unknown() -> Self {
        Self {
            kind: RequirementKind::Unknown,
            count: Some(0),
        }
    }

    /// True when no finite count satisfies the requirement
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.count.is_none()
    }
}

/// Present/total counts for anything the engine can classify
pub trait AttendanceCounts {
    /// Classes attended
    fn present_days(&self) -> u32;
    /// Classes attended plus classes missed; days off are excluded
    fn total_days(&self) -> u32;
}

/// Present and absent counts of one subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectCounts {
    /// Subject the counts belong to
    pub subject_id: i64,
    /// Classes attended
    pub present_days: u32,
    /// Classes missed
    pub absent_days: u32,
}

impl AttendanceCounts for SubjectCounts {
    fn present_days(&self) -> u32 {
        self.present_days
    }

    fn total_days(&self) -> u32 {
        self.present_days.saturating_add(self.absent_days)
    }
}

/// Totals across all subjects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    /// Classes attended across all subjects
    pub present_days: u32,
    /// Classes missed across all subjects
    pub absent_days: u32,
    /// Present plus absent
    pub total_days: u32,
    /// Rounded overall percentage, 0 when nothing is recorded
    pub percentage: u32,
}

/// Rounded percentage (half up), 0 when `total_days` is 0.
#[must_use]
pub fn attendance_percentage(present_days: u32, total_days: u32) -> u32 {
    if total_days == 0 {
        return 0;
    }
    let present = u64::from(present_days);
    let total = u64::from(total_days);
    let rounded = (200 * present + total) / (2 * total);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

/// Classifies one subject against the threshold.
#[must_use]
pub fn classify(present_days: u32, total_days: u32, min_percentage: u32) -> Classification {
    if total_days == 0 {
        return Classification {
            percentage: 0,
            status: RiskStatus::Unknown,
        };
    }

    let percentage = attendance_percentage(present_days, total_days);
    let status = if percentage >= min_percentage {
        RiskStatus::Safe
    } else {
        RiskStatus::AtRisk
    };

    Classification { percentage, status }
}

/// Computes how many classes can be missed (when safe) or must be attended (when at risk).
#[must_use]
pub fn compute_requirement(present_days: u32, total_days: u32, min_percentage: u32) -> Requirement {
    let present = i64::from(present_days);
    let total = i64::from(total_days);
    let threshold = i64::from(min_percentage);

    match classify(present_days, total_days, min_percentage).status {
        RiskStatus::Unknown => Requirement::unknown(),
        RiskStatus::Safe => {
            if threshold == 0 {
                return Requirement {
                    kind: RequirementKind::CanMiss,
                    count: None,
                };
            }
            // floor((present - p*total) / p), floored at zero
            let surplus = 100 * present - threshold * total;
            let count = if surplus <= 0 { 0 } else { surplus / threshold };
            Requirement {
                kind: RequirementKind::CanMiss,
                count: Some(saturate(count)),
            }
        }
        RiskStatus::AtRisk => {
            if threshold >= 100 {
                return Requirement {
                    kind: RequirementKind::NeedAttend,
                    count: None,
                };
            }
            // ceil((p*total - present) / (1 - p)), floored at zero
            let deficit = threshold * total - 100 * present;
            let headroom = 100 - threshold;
            let count = if deficit <= 0 {
                0
            } else {
                (deficit + headroom - 1) / headroom
            };
            Requirement {
                kind: RequirementKind::NeedAttend,
                count: Some(saturate(count)),
            }
        }
    }
}

fn saturate(count: i64) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Sums counts across subjects and computes the overall percentage.
#[must_use]
pub fn aggregate<T: AttendanceCounts>(stats: &[T]) -> OverallStats {
    let (present_days, total_days) = stats.iter().fold((0u32, 0u32), |(present, total), s| {
        (
            present.saturating_add(s.present_days()),
            total.saturating_add(s.total_days()),
        )
    });

    OverallStats {
        present_days,
        absent_days: total_days.saturating_sub(present_days),
        total_days,
        // The threshold does not affect the percentage
        percentage: classify(present_days, total_days, 0).percentage,
    }
}

/// Subjects whose status is [`RiskStatus::AtRisk`], in input order.
#[must_use]
pub fn subjects_at_risk<T: AttendanceCounts>(stats: &[T], min_percentage: u32) -> Vec<&T> {
    stats
        .iter()
        .filter(|s| {
            classify(s.present_days(), s.total_days(), min_percentage).status == RiskStatus::AtRisk
        })
        .collect()
}
