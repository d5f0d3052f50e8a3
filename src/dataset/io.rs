use super::{Dataset, Record};
use crate::error::{Result, ResultExt as _, ToolkitError};
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::io::{BufWriter, Write as _};
use std::path::Path;

/// Loads a dataset from a file holding one JSON array of objects.
///
/// # Errors
///
/// Fails if the file cannot be read, is not valid JSON, or is not an array
/// of objects.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let dataset = parse_dataset(&content)?;
    tracing::info!("Loaded {} records from {}", dataset.len(), path.display());
    Ok(dataset)
}

/// Parses JSON text into a dataset.
///
/// # Errors
///
/// Returns [`ToolkitError::Json`] for malformed text and
/// [`ToolkitError::InvalidDataset`] when the top level is not an array or an
/// element is not an object.
pub fn parse_dataset(content: &str) -> Result<Dataset> {
    let value: Value = serde_json::from_str(content)?;
    let Value::Array(items) = value else {
        return Err(ToolkitError::InvalidDataset(format!(
            "expected a top-level array, found {}",
            kind(&value)
        )));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(record) => Ok(record),
            other => Err(ToolkitError::InvalidDataset(format!(
                "element {index} is {}, not an object",
                kind(&other)
            ))),
        })
        .collect::<Result<Vec<Record>>>()
        .map(Dataset::new)
}

/// Writes `value` as pretty JSON with `indent` spaces per level.
///
/// Non-ASCII text is written as-is and no trailing newline is added.
///
/// # Errors
///
/// Fails if the file cannot be created or written.
pub fn write_json<T>(path: &Path, value: &T, indent: usize) -> Result<()>
where
    T: Serialize + ?Sized,
{
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let indent = " ".repeat(indent);
    let mut serializer =
        Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(indent.as_bytes()));
    value.serialize(&mut serializer)?;
    writer.flush()?;

    tracing::debug!("Wrote {}", path.display());
    Ok(())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_rejects_non_array() {
        let err = parse_dataset(r#"{"_id": 1}"#).expect_err("object is not a dataset");
        assert!(matches!(err, ToolkitError::InvalidDataset(_)));
        assert!(err.to_string().contains("an object"));
    }

    #[test]
    fn test_parse_rejects_non_object_element() {
        let err = parse_dataset(r#"[{"_id": 1}, 2]"#).expect_err("number element");
        assert_eq!(
            err.to_string(),
            "Invalid dataset: element 1 is a number, not an object"
        );
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        let err = parse_dataset("[{").expect_err("truncated");
        assert!(matches!(err, ToolkitError::Json(_)));
    }

    #[test]
    fn test_parse_empty_array() -> Result<()> {
        assert!(parse_dataset("[]")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_dataset(Path::new("/nonexistent/input.json")).expect_err("missing");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_write_json_format() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("out.json");
        let dataset = parse_dataset(r#"[{"name": "Zoë", "tags": ["a"]}]"#)?;

        write_json(&path, &dataset, 4)?;

        let written = std::fs::read_to_string(&path)?;
        let expected = "[\n    {\n        \"name\": \"Zoë\",\n        \"tags\": [\n            \"a\"\n        ]\n    }\n]";
        assert_eq!(written, expected);
        Ok(())
    }

    #[test]
    fn test_round_trip_preserves_records_and_key_order() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("round.json");
        let original = parse_dataset(
            &json!([
                {"z": 1, "a": {"nested": [1, 2.5, null]}, "_id": "x"},
                {"_id": "y", "flag": false, "text": "naïve"}
            ])
            .to_string(),
        )?;

        write_json(&path, &original, 4)?;
        let reloaded = load_dataset(&path)?;

        assert_eq!(reloaded, original);
        let keys: Vec<&String> = reloaded.records()[0].keys().collect();
        assert_eq!(keys, ["z", "a", "_id"]);
        Ok(())
    }

    #[test]
    fn test_large_numbers_are_written_unchanged() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("big.json");
        let dataset = parse_dataset(r#"[{"_id": 123456789012345678901234, "ratio": 0.10000000000000000001}]"#)?;

        write_json(&path, &dataset, 0)?;

        let written = std::fs::read_to_string(&path)?;
        assert!(written.contains("\"_id\": 123456789012345678901234"));
        assert!(written.contains("\"ratio\": 0.10000000000000000001"));
        Ok(())
    }

    #[test]
    fn test_write_to_unwritable_path_fails() {
        let dataset = Dataset::default();
        let result = write_json(Path::new("/nonexistent/dir/out.json"), &dataset, 4);
        assert!(result.is_err());
    }
}
