//! Input parsing for the `--input` argument.
//!
//! The argument is either a path to a JSON document of the form
//! `{"features": [f1, f2, f3, f4]}` or a literal such as `5.1,3.5,1.4,0.2`.
//! Which one is decided solely by whether a file exists at that path, so a
//! literal that collides with an existing filename is read as JSON.

use crate::error::{PredictError, Result};
use crate::types::features::FeatureVector;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Key holding the feature array in JSON input files
pub const FEATURES_KEY: &str = "features";

/// How the `--input` argument was interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    JsonFile,
    Literal,
}

impl InputSource {
    /// Classify an argument by filesystem existence
    pub fn detect(input_arg: &str) -> Self {
        if Path::new(input_arg).exists() {
            InputSource::JsonFile
        } else {
            InputSource::Literal
        }
    }
}

/// Parse the `--input` argument into a feature vector.
pub fn parse_input(input_arg: &str) -> Result<FeatureVector> {
    let source = InputSource::detect(input_arg);
    debug!(source = ?source, input = %input_arg, "Parsing input");

    let values = match source {
        InputSource::JsonFile => read_json_features(Path::new(input_arg))?,
        InputSource::Literal => parse_literal(input_arg)?,
    };

    FeatureVector::from_values(values)
}

/// Read the `features` array out of a JSON file
fn read_json_features(path: &Path) -> Result<Vec<f64>> {
    let contents = fs::read_to_string(path)?;
    let document: Value = serde_json::from_str(&contents)?;
    features_from_document(&document)
}

fn features_from_document(document: &Value) -> Result<Vec<f64>> {
    let features = document
        .get(FEATURES_KEY)
        .ok_or_else(|| PredictError::validation("JSON must contain a 'features' key"))?;

    let items = features
        .as_array()
        .ok_or_else(|| PredictError::validation("'features' must be an array of numbers"))?;

    items
        .iter()
        .map(|item| {
            item.as_f64()
                .ok_or_else(|| PredictError::validation("'features' must be an array of numbers"))
        })
        .collect()
}

/// Split a literal on commas and parse every segment as a float
fn parse_literal(literal: &str) -> Result<Vec<f64>> {
    literal
        .split(',')
        .map(|segment| segment.trim().parse::<f64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| PredictError::validation("Raw input must be comma-separated numeric values"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn json_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_literal() {
        let features = parse_input("5.1,3.5,1.4,0.2").unwrap();
        assert_eq!(features.values(), &[5.1, 3.5, 1.4, 0.2]);
    }

    #[test]
    fn test_parse_literal_tolerates_spaces() {
        let features = parse_input("10, 1, 5 ,10").unwrap();
        assert_eq!(features.values(), &[10.0, 1.0, 5.0, 10.0]);
    }

    #[test]
    fn test_parse_literal_non_numeric() {
        let err = parse_input("a,b,c,d").unwrap_err();
        assert!(matches!(err, PredictError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Raw input must be comma-separated numeric values"
        );
    }

    #[test]
    fn test_parse_literal_wrong_count() {
        let err = parse_input("5.1,3.5,1.4").unwrap_err();
        assert_eq!(err.to_string(), "Input must contain exactly 4 feature values");

        let err = parse_input("1,2,3,4,5").unwrap_err();
        assert_eq!(err.to_string(), "Input must contain exactly 4 feature values");
    }

    #[test]
    fn test_parse_empty_literal() {
        let err = parse_input("").unwrap_err();
        assert!(err.to_string().contains("numeric"));
    }

    #[test]
    fn test_parse_json_file() {
        let file = json_file(r#"{"features": [6.3, 2.9, 5.6, 1.8]}"#);
        let features = parse_input(file.path().to_str().unwrap()).unwrap();
        assert_eq!(features.values(), &[6.3, 2.9, 5.6, 1.8]);
    }

    #[test]
    fn test_parse_json_integer_features() {
        let file = json_file(r#"{"features": [10, 1, 5, 10], "id": "row-7"}"#);
        let features = parse_input(file.path().to_str().unwrap()).unwrap();
        assert_eq!(features.values(), &[10.0, 1.0, 5.0, 10.0]);
    }

    #[test]
    fn test_parse_json_missing_features_key() {
        let file = json_file(r#"{"values": [1, 2, 3, 4]}"#);
        let err = parse_input(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, PredictError::Validation(_)));
        assert!(err.to_string().contains("features"));
    }

    #[test]
    fn test_parse_json_wrong_count() {
        let file = json_file(r#"{"features": [1.0, 2.0]}"#);
        let err = parse_input(file.path().to_str().unwrap()).unwrap_err();
        assert_eq!(err.to_string(), "Input must contain exactly 4 feature values");
    }

    #[test]
    fn test_parse_json_non_numeric_features() {
        let file = json_file(r#"{"features": [1.0, "two", 3.0, 4.0]}"#);
        let err = parse_input(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, PredictError::Validation(_)));
    }

    #[test]
    fn test_parse_malformed_json() {
        let file = json_file("{not json");
        let err = parse_input(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, PredictError::Json(_)));
    }

    #[test]
    fn test_existing_path_wins_over_literal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1,2,3,4");
        fs::write(&path, r#"{"features": [9, 9, 9, 9]}"#).unwrap();

        let arg = path.to_str().unwrap();
        assert_eq!(InputSource::detect(arg), InputSource::JsonFile);
        let features = parse_input(arg).unwrap();
        assert_eq!(features.values(), &[9.0, 9.0, 9.0, 9.0]);
    }

    #[test]
    fn test_detect_literal() {
        assert_eq!(
            InputSource::detect("5.1,3.5,1.4,0.2"),
            InputSource::Literal
        );
    }
}
