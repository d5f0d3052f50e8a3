//! Session context and the command objects that drive the engine.
//!
//! Every surface (clap subcommands, the interactive menu) builds an
//! [`Operation`] carrying all its parameters and hands it to
//! [`Session::execute`]. The session owns the current [`Dataset`] and
//! replaces it when an operation produces a new one.

use crate::collect::{OutputFormat, collect_keys};
use crate::config::Settings;
use crate::dataset::{Dataset, load_dataset, write_json};
use crate::error::Result;
use crate::keywords::{KeywordSource, match_keywords, write_stats_csv};
use crate::transform;
use std::fmt;
use std::path::{Path, PathBuf};

/// One engine operation with all of its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    SerialNumber {
        output: PathBuf,
    },
    DeleteAttribute {
        attribute: String,
        output: PathBuf,
    },
    Count,
    CollectKeys {
        attributes: Vec<String>,
        format: OutputFormat,
        prefix: String,
    },
    RemoveDuplicates {
        output: PathBuf,
    },
    KeywordMatch {
        keywords: KeywordSource,
        output: PathBuf,
        stats: Option<PathBuf>,
    },
}

/// What an operation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The dataset was replaced and written out.
    Saved { records: usize, path: PathBuf },
    Counted(usize),
    Collected(Vec<PathBuf>),
    Matched {
        matched: usize,
        path: PathBuf,
        stats: Option<PathBuf>,
    },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Saved { records, path } => {
                write!(f, "Saved {records} objects to {}", path.display())
            }
            Self::Counted(n) => write!(f, "Total number of objects: {n}"),
            Self::Collected(paths) => {
                let names: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
                write!(f, "Wrote {}", names.join(", "))
            }
            Self::Matched { matched, path, stats } => {
                write!(f, "Total number of objects: {matched}")?;
                write!(f, "\nMatched objects written to {}", path.display())?;
                if let Some(stats) = stats {
                    write!(f, "\nKeyword stats written to {}", stats.display())?;
                }
                Ok(())
            }
        }
    }
}

/// Current dataset plus the settings every operation runs with.
#[derive(Debug, Clone)]
pub struct Session {
    dataset: Dataset,
    settings: Settings,
}

impl Session {
    pub fn new(dataset: Dataset, settings: Settings) -> Self {
        Self { dataset, settings }
    }

    /// Loads the input file and starts a session over it.
    ///
    /// # Errors
    ///
    /// Fails if the file is missing, unreadable, or not an array of objects.
    pub fn open(path: &Path, settings: Settings) -> Result<Self> {
        Ok(Self::new(load_dataset(path)?, settings))
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Runs one operation.
    ///
    /// Serial numbering, attribute deletion and deduplication replace the
    /// session's dataset, but only after the result has been written.
    ///
    /// # Errors
    ///
    /// Propagates parameter and I/O errors. The dataset is unchanged on error.
    pub fn execute(&mut self, operation: Operation) -> Result<Outcome> {
        tracing::debug!("Executing {operation:?}");
        match operation {
            Operation::SerialNumber { output } => {
                let next = transform::serial_number(&self.dataset, &self.settings.serial_field);
                self.replace(next, output)
            }
            Operation::DeleteAttribute { attribute, output } => {
                let next = transform::delete_attribute(&self.dataset, &attribute);
                self.replace(next, output)
            }
            Operation::Count => Ok(Outcome::Counted(transform::count(&self.dataset))),
            Operation::CollectKeys {
                attributes,
                format,
                prefix,
            } => collect_keys(
                &self.dataset,
                &attributes,
                format,
                &prefix,
                self.settings.indent,
            )
            .map(Outcome::Collected),
            Operation::RemoveDuplicates { output } => {
                let next = transform::remove_duplicates(&self.dataset, &self.settings.id_field);
                self.replace(next, output)
            }
            Operation::KeywordMatch {
                keywords,
                output,
                stats,
            } => {
                let keywords = keywords.resolve()?;
                let report = match_keywords(&self.dataset, &keywords, &self.settings.id_field)?;
                write_json(&output, &report.matched, self.settings.indent)?;
                if let Some(stats_path) = &stats {
                    write_stats_csv(stats_path, &report.stats)?;
                }
                Ok(Outcome::Matched {
                    matched: transform::count(&report.matched),
                    path: output,
                    stats,
                })
            }
        }
    }

    fn replace(&mut self, next: Dataset, output: PathBuf) -> Result<Outcome> {
        write_json(&output, &next, self.settings.indent)?;
        let records = next.len();
        self.dataset = next;
        Ok(Outcome::Saved {
            records,
            path: output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::parse_dataset;
    use crate::error::ToolkitError;
    use serde_json::{Value, json};

    fn session(value: Value) -> Session {
        let dataset = parse_dataset(&value.to_string()).expect("fixture is a dataset");
        Session::new(dataset, Settings::default())
    }

    #[test]
    fn test_transforms_replace_dataset() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut session = session(json!([{"_id": 1, "x": 1}, {"_id": 1}, {"_id": 2}]));

        let outcome = session.execute(Operation::RemoveDuplicates {
            output: dir.path().join("dedup.json"),
        })?;
        assert_eq!(
            outcome,
            Outcome::Saved {
                records: 2,
                path: dir.path().join("dedup.json")
            }
        );
        assert_eq!(session.dataset().len(), 2);

        session.execute(Operation::SerialNumber {
            output: dir.path().join("numbered.json"),
        })?;
        session.execute(Operation::DeleteAttribute {
            attribute: "x".to_owned(),
            output: dir.path().join("deleted.json"),
        })?;

        let expected = parse_dataset(r#"[{"_id": 1, "no": 1}, {"_id": 2, "no": 2}]"#)?;
        assert_eq!(session.dataset(), &expected);
        assert_eq!(session.execute(Operation::Count)?, Outcome::Counted(2));
        Ok(())
    }

    #[test]
    fn test_failed_write_keeps_dataset() {
        let mut session = session(json!([{"_id": 1}]));
        let result = session.execute(Operation::SerialNumber {
            output: PathBuf::from("/nonexistent/dir/out.json"),
        });
        assert!(result.is_err());
        assert!(!session.dataset().records()[0].contains_key("no"));
    }

    #[test]
    fn test_keyword_match_leaves_dataset_alone() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut session = session(json!([{"_id": 1, "name": "Alpha"}, {"_id": 2, "name": "Beta"}]));
        let output = dir.path().join("matched.json");
        let stats = dir.path().join("stats.csv");

        let outcome = session.execute(Operation::KeywordMatch {
            keywords: KeywordSource::Inline("alpha".to_owned()),
            output: output.clone(),
            stats: Some(stats.clone()),
        })?;

        assert_eq!(outcome.to_string().lines().next(), Some("Total number of objects: 1"));
        assert_eq!(session.dataset().len(), 2);
        let matched = crate::dataset::load_dataset(&output)?;
        assert_eq!(matched.len(), 1);
        assert!(stats.exists());
        Ok(())
    }

    #[test]
    fn test_keyword_errors() {
        let mut session = session(json!([{"_id": 1}]));
        let err = session
            .execute(Operation::KeywordMatch {
                keywords: KeywordSource::File(PathBuf::from("/nonexistent/kw.txt")),
                output: PathBuf::from("unused.json"),
                stats: None,
            })
            .expect_err("missing keyword file");
        assert!(!err.is_recoverable());

        let err = match_keywords(session.dataset(), &[String::new()], "_id")
            .expect_err("empty keyword");
        assert!(matches!(err, ToolkitError::InvalidParameter(_)));
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(Outcome::Counted(3).to_string(), "Total number of objects: 3");
        let collected = Outcome::Collected(vec![PathBuf::from("p_a.json"), PathBuf::from("p_b.json")]);
        assert_eq!(collected.to_string(), "Wrote p_a.json, p_b.json");
    }
}
