//! Distinct-value collection per field, written as JSON or CSV artifacts.

use crate::dataset::{Dataset, write_json};
use crate::error::{Result, ResultExt as _, ToolkitError};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Artifact format for collected values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = ToolkitError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(ToolkitError::InvalidParameter(format!(
                "unknown output format '{other}' (expected json or csv)"
            ))),
        }
    }
}

/// Distinct values of `field`, in first-seen order.
///
/// Records without the field contribute nothing; a present `null` counts as
/// a value.
pub fn collect_values(dataset: &Dataset, field: &str) -> Vec<Value> {
    let mut seen = HashSet::new();
    dataset
        .iter()
        .filter_map(|record| record.get(field))
        .filter(|value| seen.insert(value.to_string()))
        .cloned()
        .collect()
}

/// Path of the artifact for one field: `{prefix}_{field}.{ext}`.
pub fn artifact_path(prefix: &str, field: &str, format: OutputFormat) -> PathBuf {
    PathBuf::from(format!("{prefix}_{field}.{}", format.extension()))
}

/// Writes one artifact per field and returns their paths in field order.
///
/// Artifacts are written one after another; a failure leaves the earlier
/// ones on disk.
///
/// # Errors
///
/// Returns [`ToolkitError::InvalidParameter`] for an empty field list, or the
/// first write error.
pub fn collect_keys(
    dataset: &Dataset,
    fields: &[String],
    format: OutputFormat,
    prefix: &str,
    indent: usize,
) -> Result<Vec<PathBuf>> {
    if fields.is_empty() {
        return Err(ToolkitError::InvalidParameter(
            "no attribute names given".to_owned(),
        ));
    }

    let mut written = Vec::with_capacity(fields.len());
    for field in fields {
        let values = collect_values(dataset, field);
        let path = artifact_path(prefix, field, format);
        match format {
            OutputFormat::Json => write_json(&path, &values, indent)?,
            OutputFormat::Csv => write_values_csv(&path, field, &values)?,
        }
        tracing::info!(
            "Collected {} distinct values of '{field}' into {}",
            values.len(),
            path.display()
        );
        written.push(path);
    }
    Ok(written)
}

fn write_values_csv(path: &Path, field: &str, values: &[Value]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    writer.write_record([field])?;
    for value in values {
        writer.write_record([csv_cell(value)])?;
    }
    writer.flush()?;
    Ok(())
}

/// Strings go in raw, `null` as an empty cell, anything else as compact JSON.
pub(crate) fn csv_cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::parse_dataset;
    use serde_json::json;

    fn dataset(value: Value) -> Dataset {
        parse_dataset(&value.to_string()).expect("fixture is a dataset")
    }

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| (*n).to_owned()).collect()
    }

    #[test]
    fn test_collect_values_distinct() {
        let input = dataset(json!([{"a": "x"}, {"a": "y"}, {"a": "x"}]));
        assert_eq!(collect_values(&input, "a"), [json!("x"), json!("y")]);
    }

    #[test]
    fn test_collect_values_skips_missing_keeps_null() {
        let input = dataset(json!([{"a": 1}, {"b": 2}, {"a": null}, {"a": 1}, {"a": "1"}]));
        let values = collect_values(&input, "a");
        assert_eq!(values, [json!(1), json!(null), json!("1")]);
        assert!(values.len() <= input.len());
        assert!(collect_values(&input, "zzz").is_empty());
    }

    #[test]
    fn test_collect_values_nested() {
        let input = dataset(json!([{"a": {"k": [1]}}, {"a": {"k": [1]}}, {"a": [1]}]));
        assert_eq!(collect_values(&input, "a").len(), 2);
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(" JSON ".parse::<OutputFormat>().ok(), Some(OutputFormat::Json));
        assert_eq!("csv".parse::<OutputFormat>().ok(), Some(OutputFormat::Csv));
        let err = "xml".parse::<OutputFormat>().expect_err("unsupported");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_collect_keys_json() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let prefix = dir.path().join("out").display().to_string();
        let input = dataset(json!([{"a": "x", "b": "é"}, {"a": "y"}, {"a": "x"}]));

        let paths = collect_keys(&input, &fields(&["a", "b", "c"]), OutputFormat::Json, &prefix, 4)?;

        assert_eq!(paths, [
            dir.path().join("out_a.json"),
            dir.path().join("out_b.json"),
            dir.path().join("out_c.json"),
        ]);
        let a: Value = serde_json::from_str(&std::fs::read_to_string(&paths[0])?)?;
        assert_eq!(a, json!(["x", "y"]));
        assert_eq!(std::fs::read_to_string(&paths[1])?, "[\n    \"é\"\n]");
        assert_eq!(std::fs::read_to_string(&paths[2])?, "[]");
        Ok(())
    }

    #[test]
    fn test_collect_keys_csv() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let prefix = dir.path().join("keys").display().to_string();
        let input = dataset(json!([
            {"city": "Paris, FR", "n": 1},
            {"city": "Oslo", "n": true},
            {"city": null},
            {"city": "Oslo"}
        ]));

        let paths = collect_keys(&input, &fields(&["city", "n", "none"]), OutputFormat::Csv, &prefix, 4)?;

        let mut reader = csv::Reader::from_path(&paths[0])?;
        assert_eq!(reader.headers()?.iter().collect::<Vec<_>>(), ["city"]);
        let rows: Vec<String> = reader
            .records()
            .map(|r| r.map(|r| r[0].to_owned()))
            .collect::<std::result::Result<_, _>>()?;
        assert_eq!(rows, ["Paris, FR", "Oslo", ""]);

        let n = std::fs::read_to_string(&paths[1])?;
        assert_eq!(n.lines().collect::<Vec<_>>(), ["n", "1", "true"]);

        let none = std::fs::read_to_string(&paths[2])?;
        assert_eq!(none.lines().collect::<Vec<_>>(), ["none"]);
        Ok(())
    }

    #[test]
    fn test_collect_keys_requires_fields() {
        let err = collect_keys(&Dataset::default(), &[], OutputFormat::Json, "p", 4)
            .expect_err("empty field list");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_csv_cell() {
        assert_eq!(csv_cell(&json!("plain")), "plain");
        assert_eq!(csv_cell(&json!(null)), "");
        assert_eq!(csv_cell(&json!(2.5)), "2.5");
        assert_eq!(csv_cell(&json!({"k": [1, 2]})), r#"{"k":[1,2]}"#);
    }
}
