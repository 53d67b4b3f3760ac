use super::super::domain::{Candidate, CandidateKind, CandidateProfile, SKILL_DELIMITER};
use std::num::{ParseFloatError, ParseIntError};
use std::str::Utf8Error;
use tracing::{debug, warn};

/// Leading columns plus the trailing gpa/experience column.
const REQUIRED_FIELDS: usize = 7;

/// Why a single candidate row could not be turned into a [`Candidate`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RowError {
    #[error("row is not valid UTF-8")]
    InvalidEncoding {
        #[source]
        source: Utf8Error,
    },
    #[error("expected at least 7 fields, found {found}")]
    MissingFields { found: usize },
    #[error("age '{value}' is not an integer")]
    InvalidAge {
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error("score field '{value}' is not a number")]
    InvalidVariantField {
        value: String,
        #[source]
        source: ParseFloatError,
    },
}

/// Parses one comma-delimited candidate line.
///
/// Columns past the seventh are ignored. A category equal to
/// `entry_level_marker` yields an entry-level candidate; every other value
/// yields a seasoned one.
pub fn parse_row(line: &str, entry_level_marker: &str) -> Result<Candidate, RowError> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < REQUIRED_FIELDS {
        return Err(RowError::MissingFields {
            found: fields.len(),
        });
    }

    let age_raw = fields[3];
    let age = age_raw
        .trim()
        .parse::<i32>()
        .map_err(|source| RowError::InvalidAge {
            value: age_raw.to_string(),
            source,
        })?;

    let variant_raw = fields[6];
    let variant_value = variant_raw.trim().parse::<f64>().map_err(|source| {
        RowError::InvalidVariantField {
            value: variant_raw.to_string(),
            source,
        }
    })?;

    let type_label = fields[4];
    let kind = if type_label == entry_level_marker {
        CandidateKind::EntryLevel { gpa: variant_value }
    } else {
        if !looks_seasoned(type_label) {
            warn!(
                candidate_id = fields[0],
                type_label, "unrecognised category, treating candidate as seasoned"
            );
        }
        CandidateKind::Seasoned {
            years_experience: variant_value,
        }
    };

    let skills = fields[5]
        .split_terminator(SKILL_DELIMITER)
        .map(str::to_string)
        .collect();

    debug!(candidate_id = fields[0], category = ?kind.category(), "parsed candidate row");

    Ok(Candidate::new(
        CandidateProfile {
            id: fields[0].to_string(),
            name: fields[1].to_string(),
            email: fields[2].to_string(),
            age,
            type_label: type_label.to_string(),
            skills,
        },
        kind,
    ))
}

fn looks_seasoned(type_label: &str) -> bool {
    matches!(
        type_label.trim().to_ascii_lowercase().as_str(),
        "seasoned" | "experienced"
    )
}
