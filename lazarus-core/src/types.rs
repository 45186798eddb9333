//! Wire types exchanged with the refactoring agent backend.
//!
//! Every response field carries `#[serde(default)]`: a 200 response with a
//! missing field yields an empty string, empty list, or `None` rather than a
//! decode error. Scalar fields also read an explicit `null` as their default.
//! Only a body that is not JSON, or a field of the wrong JSON type, fails to
//! decode. `logs: null` is such a failure.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

/// Body of `POST /analyze-and-refactor`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyzeRequest {
    /// Name of the legacy source file the agent should process.
    pub legacy_file: String,
}

/// Response of `POST /analyze-and-refactor`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalyzeResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub legacy_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub modern_code: String,
    /// Agent decision log, replayed one line at a time.
    pub logs: Vec<String>,
    pub metrics: Option<Metrics>,
}

/// Complexity scores computed by the backend. Passed through verbatim.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Metrics {
    pub legacy_complexity: Option<Number>,
    pub modern_complexity: Option<Number>,
    /// Pre-formatted improvement label, e.g. `"62%"`.
    #[serde(deserialize_with = "null_as_default")]
    pub improvement: String,
}

/// Response of `GET /mirror-test`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MirrorTestResponse {
    pub results: Vec<VerificationResult>,
}

/// One row of the mirror test: the same input fed to both implementations.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct VerificationResult {
    pub input_data: Value,
    pub legacy_output: Value,
    pub modern_output: Value,
    /// `null` reads as `false`.
    #[serde(rename = "match", deserialize_with = "null_as_default")]
    pub matched: bool,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_response_decodes_backend_shape() {
        let body = r#"{
            "status": "Complete",
            "legacy_code": "def pay(h, r): ...",
            "modern_code": "def pay(hours: int, rate: int) -> int: ...",
            "logs": ["--- Attempt 1/3 ---", "SUCCESS: Parity Achieved."],
            "metrics": {"legacy_complexity": 13, "modern_complexity": 5, "improvement": "62%"}
        }"#;
        let resp: AnalyzeResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.logs.len(), 2);
        let metrics = resp.metrics.unwrap();
        assert_eq!(metrics.legacy_complexity.unwrap().to_string(), "13");
        assert_eq!(metrics.improvement, "62%");
    }

    #[test]
    fn missing_fields_fall_back_to_empty_values() {
        let resp: AnalyzeResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(resp, AnalyzeResponse::default());
        assert!(resp.metrics.is_none());
    }

    #[test]
    fn verification_result_reads_match_keyword() {
        let body = r#"{"results": [
            {"input_data": [30, 20], "legacy_output": "600", "modern_output": "600", "match": true},
            {"input_data": [60, 100], "legacy_output": "7050", "modern_output": "7050.0", "match": false}
        ]}"#;
        let resp: MirrorTestResponse = serde_json::from_str(body).unwrap();
        assert!(resp.results[0].matched);
        assert!(!resp.results[1].matched);
        assert_eq!(resp.results[1].input_data, serde_json::json!([60, 100]));
    }

    #[test]
    fn null_scalars_read_as_empty_values() {
        let body = r#"{
            "legacy_code": null,
            "modern_code": null,
            "logs": [],
            "metrics": {"legacy_complexity": null, "modern_complexity": 5, "improvement": null}
        }"#;
        let resp: AnalyzeResponse = serde_json::from_str(body).unwrap();
        assert!(resp.legacy_code.is_empty());
        assert!(resp.modern_code.is_empty());
        let metrics = resp.metrics.unwrap();
        assert!(metrics.legacy_complexity.is_none());
        assert_eq!(metrics.improvement, "");

        let rows: MirrorTestResponse = serde_json::from_str(
            r#"{"results": [{"input_data": null, "legacy_output": "1", "modern_output": null, "match": null}]}"#,
        )
        .unwrap();
        assert!(!rows.results[0].matched);
        assert!(rows.results[0].modern_output.is_null());
    }

    #[test]
    fn wrong_json_type_is_a_decode_error() {
        assert!(serde_json::from_str::<AnalyzeResponse>(r#"{"logs": "not a list"}"#).is_err());
        assert!(serde_json::from_str::<AnalyzeResponse>(r#"{"logs": null}"#).is_err());
        assert!(serde_json::from_str::<AnalyzeResponse>(r#"{"legacy_code": 7}"#).is_err());
    }
}
