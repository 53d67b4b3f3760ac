use super::codec::{self, CandidateWriteError};
use super::domain::{Candidate, CandidateCategory, ScoredCandidate, REQUIRED_SKILLS};
use crate::config::ShortlistConfig;
use std::fmt;
use std::path::Path;
use tracing::{error, info};

/// Requested number of candidates per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShortlistQuotas {
    pub entry_level: usize,
    pub seasoned: usize,
}

impl ShortlistQuotas {
    pub fn new(entry_level: usize, seasoned: usize) -> Self {
        Self {
            entry_level,
            seasoned,
        }
    }

    pub fn for_category(&self, category: CandidateCategory) -> usize {
        match category {
            CandidateCategory::EntryLevel => self.entry_level,
            CandidateCategory::Seasoned => self.seasoned,
        }
    }
}

/// Ranked selection for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShortlist<'a> {
    pub category: CandidateCategory,
    pub pool_size: usize,
    pub quota: usize,
    pub selected: Vec<ScoredCandidate<'a>>,
}

/// Result of one shortlisting pass, borrowing from the loaded collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Shortlist<'a> {
    pub entry_level: CategoryShortlist<'a>,
    pub seasoned: CategoryShortlist<'a>,
}

impl<'a> Shortlist<'a> {
    pub fn category(&self, category: CandidateCategory) -> &CategoryShortlist<'a> {
        match category {
            CandidateCategory::EntryLevel => &self.entry_level,
            CandidateCategory::Seasoned => &self.seasoned,
        }
    }

    /// Writes both category files. A failure on one file does not skip the other.
    pub fn persist(&self, config: &ShortlistConfig) -> Result<(), PersistError> {
        let targets = [
            (&self.entry_level, config.entry_level_output()),
            (&self.seasoned, config.seasoned_output()),
        ];

        let mut failures = Vec::new();
        for (shortlist, path) in targets {
            if let Err(err) = write_category(shortlist, &path) {
                error!(path = %path.display(), error = %err, "failed to write shortlist");
                failures.push(err);
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(PersistError { failures })
        }
    }
}

fn write_category(shortlist: &CategoryShortlist<'_>, path: &Path) -> Result<(), CandidateWriteError> {
    codec::write_collection(path, &shortlist.selected)?;
    info!(
        category = ?shortlist.category,
        path = %path.display(),
        rows = shortlist.selected.len(),
        "shortlist persisted"
    );
    Ok(())
}

/// One or more shortlist files could not be written.
#[derive(Debug)]
pub struct PersistError {
    pub failures: Vec<CandidateWriteError>,
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let details: Vec<String> = self.failures.iter().map(ToString::to_string).collect();
        write!(f, "{}", details.join("; "))
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.failures
            .first()
            .map(|err| err as &(dyn std::error::Error + 'static))
    }
}

/// Stateless ranker: partition, score, sort, truncate.
pub struct ShortlistEngine {
    required_skills: &'static [&'static str],
}

impl Default for ShortlistEngine {
    fn default() -> Self {
        Self::new(REQUIRED_SKILLS)
    }
}

impl ShortlistEngine {
    pub fn new(required_skills: &'static [&'static str]) -> Self {
        Self { required_skills }
    }

    /// Ranks each category by score, highest first, and keeps the top `quota`.
    ///
    /// Equal scores keep their load order.
    pub fn shortlist<'a>(
        &self,
        candidates: &'a [Candidate],
        quotas: ShortlistQuotas,
    ) -> Shortlist<'a> {
        let (entry_level, seasoned): (Vec<&Candidate>, Vec<&Candidate>) = candidates
            .iter()
            .partition(|candidate| candidate.category() == CandidateCategory::EntryLevel);

        Shortlist {
            entry_level: self.rank(CandidateCategory::EntryLevel, entry_level, quotas),
            seasoned: self.rank(CandidateCategory::Seasoned, seasoned, quotas),
        }
    }

    fn rank<'a>(
        &self,
        category: CandidateCategory,
        pool: Vec<&'a Candidate>,
        quotas: ShortlistQuotas,
    ) -> CategoryShortlist<'a> {
        let pool_size = pool.len();
        let quota = quotas.for_category(category);

        let mut scored: Vec<ScoredCandidate<'a>> = pool
            .into_iter()
            .map(|candidate| ScoredCandidate {
                score: candidate.calculate_score(self.required_skills),
                candidate,
            })
            .collect();

        scored.sort_by(|left, right| right.score.total_cmp(&left.score));
        scored.truncate(quota);

        info!(
            ?category,
            pool_size,
            quota,
            selected = scored.len(),
            "ranked candidates"
        );

        CategoryShortlist {
            category,
            pool_size,
            quota,
            selected: scored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::shortlist::codec::parse_row;

    fn candidates(rows: &[&str]) -> Vec<Candidate> {
        rows.iter()
            .map(|row| parse_row(row, "EntryLevel").expect("fixture row parses"))
            .collect()
    }

    fn ids<'a>(shortlist: &'a CategoryShortlist<'_>) -> Vec<&'a str> {
        shortlist
            .selected
            .iter()
            .map(|scored| scored.candidate.profile.id.as_str())
            .collect()
    }

    fn pool() -> Vec<Candidate> {
        candidates(&[
            "F1,Asha,asha@example.com,22,EntryLevel,C++,3.2",
            "S1,Ravi,ravi@example.com,35,Seasoned,Go,5",
            "F2,Lin,lin@example.com,21,EntryLevel,Python,3.8",
            "S2,Mei,mei@example.com,41,Experienced,Rust,12",
            "F3,Ola,ola@example.com,23,EntryLevel,Java,3.5",
        ])
    }

    #[test]
    fn keeps_top_scores_per_category() {
        let pool = pool();
        let shortlist = ShortlistEngine::default().shortlist(&pool, ShortlistQuotas::new(2, 1));

        assert_eq!(ids(&shortlist.entry_level), vec!["F2", "F3"]);
        assert_eq!(ids(&shortlist.seasoned), vec!["S2"]);
        assert_eq!(shortlist.entry_level.pool_size, 3);
        assert_eq!(shortlist.seasoned.pool_size, 2);
    }

    #[test]
    fn quota_above_pool_returns_whole_pool_ranked() {
        let pool = pool();
        let shortlist = ShortlistEngine::default().shortlist(&pool, ShortlistQuotas::new(10, 10));

        assert_eq!(ids(&shortlist.entry_level), vec!["F2", "F3", "F1"]);
        let scores: Vec<f64> = shortlist
            .entry_level
            .selected
            .iter()
            .map(|scored| scored.score)
            .collect();
        assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[test]
    fn zero_quotas_select_nobody() {
        let pool = pool();
        let shortlist = ShortlistEngine::default().shortlist(&pool, ShortlistQuotas::new(0, 0));

        assert!(shortlist.entry_level.selected.is_empty());
        assert!(shortlist.seasoned.selected.is_empty());
        assert_eq!(shortlist.entry_level.pool_size, 3);
    }

    #[test]
    fn ties_keep_load_order() {
        let pool = candidates(&[
            "F1,A,a@example.com,22,EntryLevel,,3.5",
            "F2,B,b@example.com,22,EntryLevel,,3.9",
            "F3,C,c@example.com,22,EntryLevel,,3.5",
            "F4,D,d@example.com,22,EntryLevel,,3.5",
        ]);

        let shortlist = ShortlistEngine::default().shortlist(&pool, ShortlistQuotas::new(3, 0));
        assert_eq!(ids(&shortlist.entry_level), vec!["F2", "F1", "F3"]);
    }

    #[test]
    fn empty_collection_yields_empty_shortlists() {
        let shortlist = ShortlistEngine::default().shortlist(&[], ShortlistQuotas::new(5, 5));
        assert_eq!(shortlist.category(CandidateCategory::EntryLevel).pool_size, 0);
        assert!(shortlist.category(CandidateCategory::Seasoned).selected.is_empty());
    }

    #[test]
    fn persist_attempts_both_files_when_one_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let pool = pool();
        let shortlist = ShortlistEngine::default().shortlist(&pool, ShortlistQuotas::new(1, 1));

        let config = ShortlistConfig {
            output_dir: dir.path().to_path_buf(),
            ..ShortlistConfig::default()
        };
        std::fs::create_dir(config.entry_level_output()).expect("block entry-level file");

        let error = shortlist.persist(&config).expect_err("entry-level file is a directory");
        assert_eq!(error.failures.len(), 1);
        assert_eq!(
            error.failures[0].path(),
            config.entry_level_output().as_path()
        );

        let seasoned = std::fs::read_to_string(config.seasoned_output()).expect("seasoned written");
        assert_eq!(
            seasoned,
            "ID,Name,Email,Age,Type,Skills,Score,ExtraField\n\
S2,Mei,mei@example.com,41,Experienced,Rust,12,12.000000\n"
        );
    }
}
