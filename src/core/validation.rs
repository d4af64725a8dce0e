//! Subject and schedule validation rules.
//!
//! These predicates run before any subject or schedule write reaches the database.
//! They are pure and gather every violation they find, so a caller can report all
//! problems with one request instead of fixing them one round-trip at a time.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Minimum trimmed length of subject and professor names
pub const NAME_MIN_LEN: usize = 2;
/// Maximum trimmed length of subject and professor names
pub const NAME_MAX_LEN: usize = 100;
/// Number of schedule days; day indices run from 0 (Sunday) to 6 (Saturday)
pub const DAYS_PER_WEEK: u8 = 7;

/// Day names indexed by schedule day (0 = Sunday)
pub const WEEKDAY_NAMES: [&str; DAYS_PER_WEEK as usize] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// A single violated validation rule
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Schedule day outside 0..=6, or not a day at all
    #[error("Invalid day '{day}': schedule days run from 0 (Sunday) to 6 (Saturday)")]
    InvalidDay {
        /// Rejected day as given
        day: String,
    },

    /// Subject list is not a list of non-empty strings
    #[error("Invalid subject list: {message}")]
    InvalidSubjectList {
        /// Which entry or shape was rejected
        message: String,
    },

    /// The same subject appears twice on one day
    #[error("Subject '{name}' appears more than once on the same day")]
    DuplicateSubject {
        /// Repeated subject name
        name: String,
    },

    /// Subject name missing or outside the length bounds
    #[error("Invalid subject name: {message}")]
    InvalidSubjectName {
        /// Which bound was violated
        message: String,
    },

    /// Professor name outside the length bounds
    #[error("Invalid professor name: {message}")]
    InvalidProfessorName {
        /// Which bound was violated
        message: String,
    },

    /// Threshold input had no numeric meaning (NaN or infinite)
    #[error("Invalid threshold: {value} is not a finite number")]
    InvalidThreshold {
        /// Rejected input
        value: f64,
    },
}

/// Fixed color palette for subjects. Unknown colors fall back to [`SubjectColor::Blue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectColor {
    /// Default color
    #[default]
    Blue,
    /// Green
    Green,
    /// Purple
    Purple,
    /// Red
    Red,
    /// Yellow
    Yellow,
    /// Pink
    Pink,
    /// Indigo
    Indigo,
    /// Orange
    Orange,
}

impl SubjectColor {
    /// Every palette entry in display order
    pub const ALL: [Self; 8] = [
        Self::Blue,
        Self::Green,
        Self::Purple,
        Self::Red,
        Self::Yellow,
        Self::Pink,
        Self::Indigo,
        Self::Orange,
    ];

    /// Lowercase name as stored in the database
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Purple => "purple",
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Pink => "pink",
            Self::Indigo => "indigo",
            Self::Orange => "orange",
        }
    }

    /// Resolves user input to a palette color, never rejecting.
    ///
    /// Matching ignores case and surrounding whitespace. Missing or unknown input
    /// yields the default color.
    #[must_use]
    pub fn from_input(input: Option<&str>) -> Self {
        let Some(raw) = input else {
            return Self::default();
        };
        let wanted = raw.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|color| color.as_str() == wanted)
            .unwrap_or_default()
    }
}

impl fmt::Display for SubjectColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw subject fields as submitted by a user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectInput {
    /// Subject name, untrimmed
    pub name: String,
    /// Optional professor name, untrimmed
    pub professor_name: Option<String>,
    /// Optional color name
    pub color: Option<String>,
}

/// Subject fields after trimming, bounds checks and color normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSubject {
    /// Trimmed subject name
    pub name: String,
    /// Trimmed professor name, `None` when absent or blank
    pub professor_name: Option<String>,
    /// Palette color
    pub color: SubjectColor,
}

fn check_length(value: &str) -> std::result::Result<(), String> {
    let len = value.chars().count();
    if len < NAME_MIN_LEN {
        Err(format!("must be at least {NAME_MIN_LEN} characters"))
    } else if len > NAME_MAX_LEN {
        Err(format!("must be at most {NAME_MAX_LEN} characters"))
    } else {
        Ok(())
    }
}

/// Trims a subject name and checks it is between 2 and 100 characters.
///
/// # Errors
/// Returns [`ValidationError::InvalidSubjectName`] for blank, short or long names.
pub fn validate_subject_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::InvalidSubjectName {
            message: "subject name is required".to_string(),
        });
    }
    check_length(trimmed)
        .map(|()| trimmed.to_string())
        .map_err(|message| ValidationError::InvalidSubjectName { message })
}

/// Trims an optional professor name. Blank input counts as absent.
///
/// # Errors
/// Returns [`ValidationError::InvalidProfessorName`] when a non-blank name is shorter
/// than 2 or longer than 100 characters.
pub fn validate_professor_name(name: Option<&str>) -> Result<Option<String>, ValidationError> {
    let Some(trimmed) = name.map(str::trim).filter(|n| !n.is_empty()) else {
        return Ok(None);
    };
    check_length(trimmed)
        .map(|()| Some(trimmed.to_string()))
        .map_err(|message| ValidationError::InvalidProfessorName { message })
}

/// Validates every subject field, collecting all violations.
///
/// # Errors
/// Returns the list of failed rules when the name or professor name is invalid.
/// The color never fails; it falls back to blue.
pub fn validate_subject_input(input: &SubjectInput) -> Result<ValidatedSubject, Vec<ValidationError>> {
    let name = validate_subject_name(&input.name);
    let professor_name = validate_professor_name(input.professor_name.as_deref());
    let color = SubjectColor::from_input(input.color.as_deref());

    match (name, professor_name) {
        (Ok(name), Ok(professor_name)) => Ok(ValidatedSubject {
            name,
            professor_name,
            color,
        }),
        (name, professor_name) => Err([name.err(), professor_name.err()]
            .into_iter()
            .flatten()
            .collect()),
    }
}

/// Checks a schedule day index is within 0..=6.
///
/// # Errors
/// Returns [`ValidationError::InvalidDay`] otherwise.
pub fn validate_day(day: i64) -> Result<u8, ValidationError> {
    u8::try_from(day)
        .ok()
        .filter(|d| *d < DAYS_PER_WEEK)
        .ok_or_else(|| ValidationError::InvalidDay {
            day: day.to_string(),
        })
}

/// Parses a day index from text, such as a URL path segment.
///
/// # Errors
/// Returns [`ValidationError::InvalidDay`] carrying the text as given when it is not
/// a number in 0..=6.
pub fn validate_day_input(input: &str) -> Result<u8, ValidationError> {
    let trimmed = input.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidDay {
            day: trimmed.to_string(),
        })
        .and_then(validate_day)
}

/// Checks a day's subject list: no blank entries and no repeats (ignoring case).
///
/// Returns the trimmed names in their original order.
///
/// # Errors
/// Returns one [`ValidationError::InvalidSubjectList`] naming every blank position,
/// plus one [`ValidationError::DuplicateSubject`] per repeated name.
pub fn validate_subject_list<S: AsRef<str>>(
    subjects: &[S],
) -> Result<Vec<String>, Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut blank_positions = Vec::new();
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut names = Vec::with_capacity(subjects.len());

    for (position, subject) in subjects.iter().enumerate() {
        let trimmed = subject.as_ref().trim();
        if trimmed.is_empty() {
            blank_positions.push(position.to_string());
            continue;
        }
        let key = trimmed.to_lowercase();
        if !seen.insert(key.clone()) && reported.insert(key) {
            errors.push(ValidationError::DuplicateSubject {
                name: trimmed.to_string(),
            });
        }
        names.push(trimmed.to_string());
    }

    if !blank_positions.is_empty() {
        errors.insert(
            0,
            ValidationError::InvalidSubjectList {
                message: format!("empty entry at position {}", blank_positions.join(", ")),
            },
        );
    }

    if errors.is_empty() { Ok(names) } else { Err(errors) }
}

/// Extracts a subject list from untyped JSON, rejecting non-arrays and non-strings.
///
/// # Errors
/// Returns [`ValidationError::InvalidSubjectList`] when the value is not an array of
/// strings.
pub fn subject_list_from_json(value: &serde_json::Value) -> Result<Vec<String>, ValidationError> {
    let Some(items) = value.as_array() else {
        return Err(ValidationError::InvalidSubjectList {
            message: "expected an array of subject names".to_string(),
        });
    };

    items
        .iter()
        .enumerate()
        .map(|(position, item)| {
            item.as_str()
                .map(ToString::to_string)
                .ok_or_else(|| ValidationError::InvalidSubjectList {
                    message: format!("entry at position {position} is not a string"),
                })
        })
        .collect()
}

/// Validates a full day assignment, collecting day and list violations together.
///
/// # Errors
/// Returns every failed rule.
pub fn validate_schedule_day<S: AsRef<str>>(
    day: i64,
    subjects: &[S],
) -> Result<(u8, Vec<String>), Vec<ValidationError>> {
    match (validate_day(day), validate_subject_list(subjects)) {
        (Ok(day), Ok(names)) => Ok((day, names)),
        (day, names) => {
            let mut errors: Vec<ValidationError> = day.err().into_iter().collect();
            errors.extend(names.err().unwrap_or_default());
            Err(errors)
        }
    }
}

/// Validates a schedule write whose subject list arrives as untyped JSON.
///
/// The day and the list shape are checked independently, and a well-formed list
/// still goes through [`validate_subject_list`], so every violation is reported at once.
///
/// # Errors
/// Returns every failed rule.
pub fn validate_schedule_request(
    day: &str,
    subjects: &serde_json::Value,
) -> Result<(u8, Vec<String>), Vec<ValidationError>> {
    let day = validate_day_input(day);
    let names = subject_list_from_json(subjects)
        .map_err(|e| vec![e])
        .and_then(|names| validate_subject_list(&names));

    match (day, names) {
        (Ok(day), Ok(names)) => Ok((day, names)),
        (day, names) => {
            let mut errors: Vec<ValidationError> = day.err().into_iter().collect();
            errors.extend(names.err().unwrap_or_default());
            Err(errors)
        }
    }
}

/// Display name for a day index, `None` when out of range.
#[must_use]
pub fn weekday_name(day: u8) -> Option<&'static str> {
    WEEKDAY_NAMES.get(usize::from(day)).copied()
}

/// Parses a day given either as an index ("3") or a name/prefix ("wed", "Wednesday").
#[must_use]
pub fn parse_weekday(input: &str) -> Option<u8> {
    let trimmed = input.trim();
    if let Ok(index) = trimmed.parse::<i64>() {
        return validate_day(index).ok();
    }
    let lower = trimmed.to_lowercase();
    if lower.len() < 3 {
        return None;
    }
    WEEKDAY_NAMES
        .iter()
        .position(|name| name.to_lowercase().starts_with(&lower))
        .and_then(|index| u8::try_from(index).ok())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_subject_name_is_trimmed() {
        assert_eq!(validate_subject_name("  Physics  ").unwrap(), "Physics");
    }

    #[test]
    fn test_subject_name_bounds() {
        assert!(matches!(
            validate_subject_name("   "),
            Err(ValidationError::InvalidSubjectName { .. })
        ));
        assert!(matches!(
            validate_subject_name("M"),
            Err(ValidationError::InvalidSubjectName { .. })
        ));
        assert!(validate_subject_name("PE").is_ok());
        assert!(validate_subject_name(&"x".repeat(100)).is_ok());
        assert!(matches!(
            validate_subject_name(&"x".repeat(101)),
            Err(ValidationError::InvalidSubjectName { .. })
        ));
    }

    #[test]
    fn test_subject_name_counts_characters_not_bytes() {
        // 50 two-byte characters is 100 bytes but only 50 characters
        assert!(validate_subject_name(&"é".repeat(50)).is_ok());
    }

    #[test]
    fn test_professor_name_optional() {
        assert_eq!(validate_professor_name(None).unwrap(), None);
        assert_eq!(validate_professor_name(Some("  ")).unwrap(), None);
        assert_eq!(
            validate_professor_name(Some(" Dr. Rao ")).unwrap(),
            Some("Dr. Rao".to_string())
        );
        assert!(matches!(
            validate_professor_name(Some("X")),
            Err(ValidationError::InvalidProfessorName { .. })
        ));
    }

    #[test]
    fn test_color_defaults_to_blue() {
        assert_eq!(SubjectColor::from_input(None), SubjectColor::Blue);
        assert_eq!(SubjectColor::from_input(Some("teal")), SubjectColor::Blue);
        assert_eq!(SubjectColor::from_input(Some(" Purple ")), SubjectColor::Purple);
        assert_eq!(SubjectColor::from_input(Some("ORANGE")), SubjectColor::Orange);
    }

    #[test]
    fn test_subject_input_collects_all_errors() {
        let input = SubjectInput {
            name: "A".to_string(),
            professor_name: Some("B".to_string()),
            color: Some("chartreuse".to_string()),
        };
        let errors = validate_subject_input(&input).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0], ValidationError::InvalidSubjectName { .. }));
        assert!(matches!(errors[1], ValidationError::InvalidProfessorName { .. }));
    }

    #[test]
    fn test_subject_input_valid() {
        let input = SubjectInput {
            name: " Chemistry ".to_string(),
            professor_name: None,
            color: Some("green".to_string()),
        };
        let subject = validate_subject_input(&input).unwrap();
        assert_eq!(subject.name, "Chemistry");
        assert_eq!(subject.color, SubjectColor::Green);
    }

    #[test]
    fn test_day_out_of_range_rejected() {
        assert_eq!(
            validate_day(7),
            Err(ValidationError::InvalidDay {
                day: "7".to_string()
            })
        );
        assert_eq!(
            validate_day(-1),
            Err(ValidationError::InvalidDay {
                day: "-1".to_string()
            })
        );
        assert_eq!(validate_day(0), Ok(0));
        assert_eq!(validate_day(6), Ok(6));
    }

    #[test]
    fn test_duplicate_subject_rejected() {
        let errors = validate_subject_list(&["Math", "Math"]).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::DuplicateSubject {
                name: "Math".to_string()
            }]
        );
    }

    #[test]
    fn test_duplicate_ignores_case_and_reports_once() {
        let errors = validate_subject_list(&["Math", "math", "MATH"]).unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_empty_entry_rejected() {
        let errors = validate_subject_list(&["", "Physics"]).unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidSubjectList { .. }));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_subject_list_preserves_order() {
        let names = validate_subject_list(&[" Physics", "Math "]).unwrap();
        assert_eq!(names, vec!["Physics", "Math"]);
    }

    #[test]
    fn test_empty_list_is_allowed() {
        let empty: [&str; 0] = [];
        assert!(validate_subject_list(&empty).unwrap().is_empty());
    }

    #[test]
    fn test_subject_list_from_json() {
        let ok = subject_list_from_json(&serde_json::json!(["Math", "Physics"])).unwrap();
        assert_eq!(ok, vec!["Math", "Physics"]);

        assert!(matches!(
            subject_list_from_json(&serde_json::json!("Math")),
            Err(ValidationError::InvalidSubjectList { .. })
        ));
        assert!(matches!(
            subject_list_from_json(&serde_json::json!(["Math", 3])),
            Err(ValidationError::InvalidSubjectList { .. })
        ));
    }

    #[test]
    fn test_schedule_day_collects_both_kinds() {
        let errors = validate_schedule_day(9, &["Math", "Math"]).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(matches!(&errors[0], ValidationError::InvalidDay { day } if day == "9"));
        assert!(matches!(errors[1], ValidationError::DuplicateSubject { .. }));
    }

    #[test]
    fn test_validate_day_input_keeps_typed_text() {
        assert_eq!(validate_day_input(" 3 "), Ok(3));
        assert_eq!(
            validate_day_input("funday"),
            Err(ValidationError::InvalidDay {
                day: "funday".to_string()
            })
        );
        assert_eq!(
            validate_day_input("12"),
            Err(ValidationError::InvalidDay {
                day: "12".to_string()
            })
        );
    }

    #[test]
    fn test_schedule_request_reports_day_and_list_together() {
        let errors =
            validate_schedule_request("someday", &serde_json::json!("Math")).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(matches!(&errors[0], ValidationError::InvalidDay { day } if day == "someday"));
        assert!(matches!(errors[1], ValidationError::InvalidSubjectList { .. }));

        let errors =
            validate_schedule_request("9", &serde_json::json!(["Math", "math"])).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[1], ValidationError::DuplicateSubject { .. }));

        let (day, names) =
            validate_schedule_request("2", &serde_json::json!([" Math ", "Art"])).unwrap();
        assert_eq!(day, 2);
        assert_eq!(names, vec!["Math", "Art"]);
    }

    #[test]
    fn test_parse_weekday() {
        assert_eq!(parse_weekday("0"), Some(0));
        assert_eq!(parse_weekday("wed"), Some(3));
        assert_eq!(parse_weekday("Saturday"), Some(6));
        assert_eq!(parse_weekday("7"), None);
        assert_eq!(parse_weekday("xx"), None);
        assert_eq!(weekday_name(1), Some("Monday"));
        assert_eq!(weekday_name(7), None);
    }
}
