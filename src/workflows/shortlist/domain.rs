use serde::Serialize;

/// Skills the shortlisting run is nominally hiring for.
///
/// Scoring currently ignores this list; it is threaded through so a skill-aware
/// policy can slot in without changing call sites.
pub const REQUIRED_SKILLS: &[&str] = &["C++", "Python"];

/// Primary field separator for candidate rows.
pub const FIELD_DELIMITER: u8 = b',';
/// Separator between individual skills inside the skills column.
pub const SKILL_DELIMITER: &str = ";";

/// The two hiring tracks a candidate can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateCategory {
    EntryLevel,
    Seasoned,
}

impl CandidateCategory {
    pub fn ordered() -> [CandidateCategory; 2] {
        [CandidateCategory::EntryLevel, CandidateCategory::Seasoned]
    }

    pub fn label(&self) -> &'static str {
        match self {
            CandidateCategory::EntryLevel => "Freshers",
            CandidateCategory::Seasoned => "Experienced",
        }
    }
}

/// Identity and skills shared by every candidate regardless of track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: i32,
    /// Category column exactly as it appeared in the source row.
    pub type_label: String,
    pub skills: Vec<String>,
}

/// Track-specific scoring input. The variant fixes the candidate's category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CandidateKind {
    EntryLevel { gpa: f64 },
    Seasoned { years_experience: f64 },
}

impl CandidateKind {
    pub fn category(&self) -> CandidateCategory {
        match self {
            CandidateKind::EntryLevel { .. } => CandidateCategory::EntryLevel,
            CandidateKind::Seasoned { .. } => CandidateCategory::Seasoned,
        }
    }

    /// The number stored in the trailing column of a row.
    pub fn variant_value(&self) -> f64 {
        match self {
            CandidateKind::EntryLevel { gpa } => *gpa,
            CandidateKind::Seasoned { years_experience } => *years_experience,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub profile: CandidateProfile,
    pub kind: CandidateKind,
}

impl Candidate {
    pub fn new(profile: CandidateProfile, kind: CandidateKind) -> Self {
        Self { profile, kind }
    }

    pub fn category(&self) -> CandidateCategory {
        self.kind.category()
    }

    /// GPA for entry-level candidates, years of experience for seasoned ones.
    ///
    /// `_required_skills` is accepted but not consulted.
    pub fn calculate_score(&self, _required_skills: &[&str]) -> f64 {
        match self.kind {
            CandidateKind::EntryLevel { gpa } => gpa,
            CandidateKind::Seasoned { years_experience } => years_experience,
        }
    }

    /// Renders the output row for this candidate with the given score.
    ///
    /// Free-text fields are written as-is: a `,` or `;` inside a name or skill
    /// is not escaped and will shift columns when the row is read back.
    pub fn to_row(&self, score: f64) -> String {
        self.row_fields(score).join(",")
    }

    /// Output columns in header order: identity, type, skills, score, variant field.
    pub fn row_fields(&self, score: f64) -> [String; 8] {
        let profile = &self.profile;
        [
            profile.id.clone(),
            profile.name.clone(),
            profile.email.clone(),
            profile.age.to_string(),
            profile.type_label.clone(),
            self.joined_skills(),
            format_score(score),
            format_variant(self.kind.variant_value()),
        ]
    }

    pub fn joined_skills(&self) -> String {
        self.profile.skills.join(SKILL_DELIMITER)
    }
}

/// Significant digits kept when writing a score.
const SCORE_PRECISION: i32 = 6;

/// Writes a score the way a default C++ stream does (`%g`): six significant
/// digits, no trailing zeros, exponent form outside `1e-4..1e6`.
pub fn format_score(score: f64) -> String {
    if score.is_nan() {
        return "nan".to_string();
    }
    if score.is_infinite() {
        return if score < 0.0 { "-inf" } else { "inf" }.to_string();
    }

    let mantissa_digits = (SCORE_PRECISION - 1) as usize;
    let scientific = format!("{score:.mantissa_digits$e}");
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => return scientific,
    };

    if exponent < -4 || exponent >= SCORE_PRECISION {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa), exponent.abs())
    } else {
        let decimals = (SCORE_PRECISION - 1 - exponent) as usize;
        trim_fraction(&format!("{score:.decimals$}")).to_string()
    }
}

fn trim_fraction(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}

/// Fixed six fractional digits for the trailing gpa/experience column.
pub fn format_variant(value: f64) -> String {
    format!("{value:.6}")
}

/// A candidate paired with the score it was ranked by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCandidate<'a> {
    pub score: f64,
    pub candidate: &'a Candidate,
}

impl<'a> ScoredCandidate<'a> {
    pub fn to_row(&self) -> String {
        self.candidate.to_row(self.score)
    }
}
