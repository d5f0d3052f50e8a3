//! Keyword search over records with per-keyword statistics.
//!
//! Each record is dumped once to lowercase text (see
//! [`search_text`](crate::dataset::search_text)). Every keyword is then
//! counted in that text independently of the others: overlapping keywords
//! are each counted in full, and occurrences of one keyword never overlap.

use crate::dataset::{Dataset, RecordId, search_text, spaced_json};
use crate::error::{Result, ResultExt as _, ToolkitError};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub const STATS_HEADER: [&str; 3] = ["Keyword", "Count", "Object IDs"];

/// Where the keyword list comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeywordSource {
    /// Text file, one keyword per line
    File(PathBuf),
    /// One comma-separated line
    Inline(String),
}

impl KeywordSource {
    /// Reads and normalises the keyword list.
    ///
    /// Entries are trimmed. Blank entries and duplicates are kept, so a
    /// blank line or `a,,b` reaches [`match_keywords`] as an empty keyword.
    ///
    /// # Errors
    ///
    /// Fails if a keyword file cannot be read.
    pub fn resolve(&self) -> Result<Vec<String>> {
        match self {
            Self::File(path) => {
                let content = std::fs::read_to_string(path).with_context(|| {
                    format!("Failed to read keyword file {}", path.display())
                })?;
                Ok(normalise(content.lines()))
            }
            Self::Inline(line) => Ok(normalise(line.split(','))),
        }
    }
}

fn normalise<'a>(entries: impl Iterator<Item = &'a str>) -> Vec<String> {
    entries.map(str::trim).map(str::to_owned).collect()
}

/// Search figures for one keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordStat {
    pub keyword: String,
    /// Total occurrences across all records
    pub occurrences: usize,
    /// Distinct identities of records containing the keyword, first seen first
    pub record_ids: Vec<RecordId>,
}

impl KeywordStat {
    fn new(keyword: &str) -> Self {
        Self {
            keyword: keyword.to_owned(),
            occurrences: 0,
            record_ids: Vec::new(),
        }
    }

    /// Identifiers as a JSON array such as `[1, "two", null]`; the missing
    /// sentinel becomes `null`.
    pub fn ids_json(&self) -> String {
        let ids: Vec<_> = self.record_ids.iter().map(RecordId::to_json).collect();
        spaced_json(&ids)
    }
}

/// Result of a keyword search.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchReport {
    /// Records containing at least one keyword, in original order
    pub matched: Dataset,
    /// One entry per keyword, in the order given
    pub stats: Vec<KeywordStat>,
}

/// Matches `keywords` against every record of `dataset`.
///
/// # Errors
///
/// Returns [`ToolkitError::InvalidParameter`] if the list is empty or any
/// keyword is empty. An empty pattern matches at every position of every
/// record.
pub fn match_keywords(dataset: &Dataset, keywords: &[String], id_field: &str) -> Result<MatchReport> {
    if keywords.is_empty() {
        return Err(ToolkitError::InvalidParameter("no keywords given".to_owned()));
    }
    if let Some(index) = keywords.iter().position(String::is_empty) {
        return Err(ToolkitError::InvalidParameter(format!(
            "keyword #{} is empty",
            index + 1
        )));
    }

    let needles: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
    let mut stats: Vec<KeywordStat> = keywords.iter().map(|k| KeywordStat::new(k)).collect();
    let mut seen_ids: Vec<HashSet<RecordId>> = vec![HashSet::new(); keywords.len()];
    let mut matched = Vec::new();

    for record in dataset {
        let text = search_text(record);
        let id = RecordId::of(record, id_field);
        let mut hit = false;

        for ((needle, stat), seen) in needles.iter().zip(&mut stats).zip(&mut seen_ids) {
            let occurrences = text.matches(needle.as_str()).count();
            if occurrences == 0 {
                continue;
            }
            hit = true;
            stat.occurrences += occurrences;
            if seen.insert(id.clone()) {
                stat.record_ids.push(id.clone());
            }
        }

        if hit {
            matched.push(record.clone());
        }
    }

    tracing::info!(
        "{} of {} records matched {} keywords",
        matched.len(),
        dataset.len(),
        keywords.len()
    );
    Ok(MatchReport {
        matched: Dataset::new(matched),
        stats,
    })
}

/// Writes the statistics CSV: header, then one row per keyword.
///
/// # Errors
///
/// Fails if the file cannot be created or written.
pub fn write_stats_csv(path: &Path, stats: &[KeywordStat]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    writer.write_record(STATS_HEADER)?;
    for stat in stats {
        writer.write_record([
            stat.keyword.clone(),
            stat.occurrences.to_string(),
            stat.ids_json(),
        ])?;
    }
    writer.flush()?;
    tracing::debug!("Wrote keyword stats for {} keywords to {}", stats.len(), path.display());
    Ok(())
}
