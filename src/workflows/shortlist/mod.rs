//! Candidate shortlisting: load a candidate file, rank each hiring track, and
//! write the top-N per track.

pub mod codec;
pub mod domain;
mod engine;
pub mod report;

pub use codec::{
    load_collection, parse_row, read_collection, write_collection, CandidateLoadError,
    CandidateWriteError, RowError,
};
pub use domain::{
    Candidate, CandidateCategory, CandidateKind, CandidateProfile, ScoredCandidate,
    REQUIRED_SKILLS,
};
pub use engine::{CategoryShortlist, PersistError, Shortlist, ShortlistEngine, ShortlistQuotas};
pub use report::ShortlistSummary;
