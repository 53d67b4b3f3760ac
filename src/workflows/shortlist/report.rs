use super::domain::{CandidateCategory, ScoredCandidate};
use super::engine::{CategoryShortlist, Shortlist};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
pub struct ShortlistRowView {
    pub rank: usize,
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: i32,
    pub type_label: String,
    pub skills: Vec<String>,
    pub score: f64,
    pub variant_value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub category: CandidateCategory,
    pub category_label: String,
    pub pool_size: usize,
    pub quota: usize,
    pub rows: Vec<ShortlistRowView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShortlistSummary {
    pub generated_at: DateTime<Utc>,
    pub input_path: String,
    pub categories: Vec<CategorySummary>,
}

impl ShortlistSummary {
    pub fn new(shortlist: &Shortlist<'_>, input_path: &Path, generated_at: DateTime<Utc>) -> Self {
        let categories = CandidateCategory::ordered()
            .into_iter()
            .map(|category| category_summary(shortlist.category(category)))
            .collect();

        Self {
            generated_at,
            input_path: input_path.display().to_string(),
            categories,
        }
    }
}

fn category_summary(shortlist: &CategoryShortlist<'_>) -> CategorySummary {
    CategorySummary {
        category: shortlist.category,
        category_label: shortlist.category.label().to_string(),
        pool_size: shortlist.pool_size,
        quota: shortlist.quota,
        rows: shortlist
            .selected
            .iter()
            .enumerate()
            .map(|(index, scored)| row_view(index + 1, scored))
            .collect(),
    }
}

fn row_view(rank: usize, scored: &ScoredCandidate<'_>) -> ShortlistRowView {
    let profile = &scored.candidate.profile;
    ShortlistRowView {
        rank,
        id: profile.id.clone(),
        name: profile.name.clone(),
        email: profile.email.clone(),
        age: profile.age,
        type_label: profile.type_label.clone(),
        skills: profile.skills.clone(),
        score: scored.score,
        variant_value: scored.candidate.kind.variant_value(),
    }
}

/// Console listing: one heading per category followed by its output rows.
pub fn render_text(shortlist: &Shortlist<'_>) -> String {
    let mut out = String::new();
    for category in CandidateCategory::ordered() {
        let _ = writeln!(out, "\n--- Shortlisted {} ---", category.label());
        for scored in &shortlist.category(category).selected {
            let _ = writeln!(out, "{}", scored.to_row());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::shortlist::codec::parse_row;
    use crate::workflows::shortlist::engine::{ShortlistEngine, ShortlistQuotas};
    use chrono::TimeZone;

    fn fixture() -> Vec<crate::workflows::shortlist::domain::Candidate> {
        [
            "F1,Asha,asha@example.com,22,EntryLevel,C++;Python,3.8",
            "F2,Lin,lin@example.com,21,EntryLevel,Java,3.2",
            "S1,Ravi,ravi@example.com,35,Seasoned,Go,5",
        ]
        .iter()
        .map(|row| parse_row(row, "EntryLevel").expect("fixture parses"))
        .collect()
    }

    #[test]
    fn text_lists_each_category_under_its_heading() {
        let pool = fixture();
        let shortlist = ShortlistEngine::default().shortlist(&pool, ShortlistQuotas::new(1, 0));

        assert_eq!(
            render_text(&shortlist),
            "\n--- Shortlisted Freshers ---\n\
F1,Asha,asha@example.com,22,EntryLevel,C++;Python,3.8,3.800000\n\
\n--- Shortlisted Experienced ---\n"
        );
    }

    #[test]
    fn summary_ranks_rows_and_serializes() {
        let pool = fixture();
        let shortlist = ShortlistEngine::default().shortlist(&pool, ShortlistQuotas::new(5, 1));
        let generated_at = Utc
            .with_ymd_and_hms(2025, 9, 24, 10, 0, 0)
            .single()
            .expect("valid timestamp");

        let summary = ShortlistSummary::new(&shortlist, Path::new("candidates.csv"), generated_at);
        assert_eq!(summary.categories[0].rows.len(), 2);
        assert_eq!(summary.categories[1].rows.len(), 1);
        assert_eq!(summary.categories[0].category_label, "Freshers");
        assert_eq!(summary.categories[0].rows[1].rank, 2);
        assert_eq!(summary.categories[0].rows[1].id, "F2");

        let json = serde_json::to_value(&summary).expect("summary serializes");
        assert_eq!(json["categories"][1]["category"], "seasoned");
        assert_eq!(json["categories"][1]["rows"][0]["variant_value"], 5.0);
        assert_eq!(json["input_path"], "candidates.csv");
    }
}
