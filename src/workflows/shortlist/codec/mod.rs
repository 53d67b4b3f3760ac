mod parser;

pub use parser::{parse_row, RowError};

use super::domain::{Candidate, ScoredCandidate, FIELD_DELIMITER};
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Header written at the top of every shortlist file.
pub const OUTPUT_HEADER: [&str; 8] = [
    "ID",
    "Name",
    "Email",
    "Age",
    "Type",
    "Skills",
    "Score",
    "ExtraField",
];

#[derive(Debug, thiserror::Error)]
pub enum CandidateLoadError {
    #[error("failed to read candidate file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read candidate data: {0}")]
    Read(#[from] std::io::Error),
    #[error("line {line}: {source} (row: '{content}')")]
    Row {
        line: u64,
        content: String,
        #[source]
        source: RowError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum CandidateWriteError {
    #[error("failed to create {}: {source}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl CandidateWriteError {
    pub fn path(&self) -> &Path {
        match self {
            CandidateWriteError::Create { path, .. } | CandidateWriteError::Write { path, .. } => {
                path
            }
        }
    }
}

/// Loads every candidate from `path`, skipping the header line.
///
/// Stops at the first malformed row.
pub fn load_collection<P: AsRef<Path>>(
    path: P,
    entry_level_marker: &str,
) -> Result<Vec<Candidate>, CandidateLoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| CandidateLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let candidates = read_collection(file, entry_level_marker)?;
    info!(path = %path.display(), count = candidates.len(), "loaded candidates");
    Ok(candidates)
}

/// Reads candidates from any byte source. The first line is treated as a header and not checked.
///
/// Blank lines are skipped but still counted, so reported line numbers match the file.
pub fn read_collection<R: Read>(
    reader: R,
    entry_level_marker: &str,
) -> Result<Vec<Candidate>, CandidateLoadError> {
    let mut candidates = Vec::new();

    for (index, line) in BufReader::new(reader).split(b'\n').enumerate() {
        let mut bytes = line?;
        if index == 0 {
            continue;
        }
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
        if bytes.is_empty() {
            continue;
        }

        let line = index as u64 + 1;
        let candidate = std::str::from_utf8(&bytes)
            .map_err(|source| RowError::InvalidEncoding { source })
            .and_then(|row| parse_row(row, entry_level_marker))
            .map_err(|source| CandidateLoadError::Row {
                line,
                content: String::from_utf8_lossy(&bytes).into_owned(),
                source,
            })?;
        candidates.push(candidate);
    }

    Ok(candidates)
}

/// Writes the header and one row per entry to `path`, replacing any existing file.
pub fn write_collection<P: AsRef<Path>>(
    path: P,
    rows: &[ScoredCandidate<'_>],
) -> Result<(), CandidateWriteError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| CandidateWriteError::Create {
        path: path.to_path_buf(),
        source,
    })?;

    write_rows(file, rows).map_err(|source| CandidateWriteError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), rows = rows.len(), "wrote shortlist file");
    Ok(())
}

/// Writes fields verbatim, so delimiters inside names or skills are not escaped.
pub fn write_rows<W: Write>(writer: W, rows: &[ScoredCandidate<'_>]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(FIELD_DELIMITER)
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(OUTPUT_HEADER)?;
    for row in rows {
        csv_writer.write_record(row.candidate.row_fields(row.score))?;
    }
    csv_writer.flush()?;
    Ok(())
}
