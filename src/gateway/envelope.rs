//! Response Envelope
//!
//! Every record-API response carries `success` at the top level, `data`
//! for reads, and a per-record `results` array for writes. The helpers
//! here turn an envelope into a `Result`, applying the normalization
//! rules: top-level failure is hard, per-record failures are partial, and
//! "no rows" is an empty collection rather than an error.

use serde::Deserialize;

use super::error::GatewayError;

#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>"))]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub results: Option<Vec<RecordResult<T>>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>"))]
pub struct RecordResult<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Map a backend failure message onto the error taxonomy.
fn classify(message: Option<String>) -> GatewayError {
    let message = message.unwrap_or_else(|| "request failed".to_string());
    let lowered = message.to_ascii_lowercase();
    if lowered.contains("not found") || lowered.contains("does not exist") {
        GatewayError::NotFound
    } else if lowered.contains("required") || lowered.contains("invalid") {
        GatewayError::Validation(message)
    } else {
        GatewayError::Transport(message)
    }
}

fn batch_error(failed: Vec<String>) -> Option<GatewayError> {
    if failed.is_empty() {
        return None;
    }
    if failed
        .iter()
        .all(|m| classify(Some(m.clone())) == GatewayError::NotFound)
    {
        return Some(GatewayError::NotFound);
    }
    Some(GatewayError::Partial(failed))
}

/// Bulk read: missing `data` means no rows, not an error.
pub fn expect_list<T>(env: Envelope<Vec<T>>) -> Result<Vec<T>, GatewayError> {
    if !env.success {
        return Err(classify(env.message));
    }
    Ok(env.data.unwrap_or_default())
}

/// Single read: missing `data` on a successful response means the id is
/// gone.
pub fn expect_data<T>(env: Envelope<T>) -> Result<T, GatewayError> {
    if !env.success {
        return Err(classify(env.message));
    }
    env.data.ok_or(GatewayError::NotFound)
}

/// Batch write: successes and failure messages, in record order.
pub fn split_results<T>(env: Envelope<T>) -> Result<(Vec<T>, Vec<String>), GatewayError> {
    if !env.success {
        return Err(classify(env.message));
    }
    let mut succeeded = Vec::new();
    let mut failed = Vec::new();
    for result in env.results.unwrap_or_default() {
        if result.success {
            if let Some(data) = result.data {
                succeeded.push(data);
            }
        } else {
            failed.push(result.message.unwrap_or_else(|| "record operation failed".to_string()));
        }
    }
    Ok((succeeded, failed))
}

/// Single-record write: the one result must have succeeded and carried
/// data.
pub fn expect_one<T>(env: Envelope<T>) -> Result<T, GatewayError> {
    let (mut succeeded, failed) = split_results(env)?;
    if let Some(err) = batch_error(failed) {
        return Err(err);
    }
    succeeded
        .pop()
        .ok_or_else(|| GatewayError::Transport("no data returned from write".to_string()))
}

/// Single-record delete: no data expected back, only per-record status.
pub fn expect_deleted<T>(env: Envelope<T>) -> Result<(), GatewayError> {
    let (_, failed) = split_results(env)?;
    match batch_error(failed) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_envelope(json: &str) -> Envelope<Vec<u32>> {
        serde_json::from_str(json).unwrap()
    }

    fn write_envelope(json: &str) -> Envelope<u32> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn top_level_failure_is_hard() {
        let env = list_envelope(r#"{"success": false, "message": "project suspended"}"#);
        assert_eq!(
            expect_list(env),
            Err(GatewayError::Transport("project suspended".to_string()))
        );
    }

    #[test]
    fn no_rows_is_an_empty_list() {
        let env = list_envelope(r#"{"success": true}"#);
        assert_eq!(expect_list(env), Ok(vec![]));
    }

    #[test]
    fn missing_data_on_a_single_read_is_not_found() {
        let env = write_envelope(r#"{"success": true}"#);
        assert_eq!(expect_data(env), Err(GatewayError::NotFound));
        let env = write_envelope(r#"{"success": true, "data": 7}"#);
        assert_eq!(expect_data(env), Ok(7));
    }

    #[test]
    fn not_found_messages_are_classified() {
        let env = write_envelope(r#"{"success": false, "message": "Record not found"}"#);
        assert_eq!(expect_data(env), Err(GatewayError::NotFound));
    }

    #[test]
    fn rejected_field_values_are_classified_as_validation() {
        let env = write_envelope(r#"{"success": false, "message": "value is invalid"}"#);
        assert_eq!(
            expect_data(env),
            Err(GatewayError::Validation("value is invalid".to_string()))
        );
    }

    #[test]
    fn partial_batch_keeps_successes_and_every_failure_message() {
        let env = write_envelope(
            r#"{"success": true, "results": [
                {"success": true, "data": 1},
                {"success": false, "message": "value out of range"},
                {"success": true, "data": 3},
                {"success": false, "message": "title required"}
            ]}"#,
        );
        let (ok, failed) = split_results(env).unwrap();
        assert_eq!(ok, vec![1, 3]);
        assert_eq!(failed, vec!["value out of range", "title required"]);
    }

    #[test]
    fn single_write_failure_becomes_partial() {
        let env = write_envelope(
            r#"{"success": true, "results": [{"success": false, "message": "value out of range"}]}"#,
        );
        assert_eq!(
            expect_one(env),
            Err(GatewayError::Partial(vec!["value out of range".to_string()]))
        );
    }

    #[test]
    fn write_to_a_missing_id_is_not_found() {
        let env = write_envelope(
            r#"{"success": true, "results": [{"success": false, "message": "record does not exist"}]}"#,
        );
        assert_eq!(expect_one(env), Err(GatewayError::NotFound));
        let env = write_envelope(
            r#"{"success": true, "results": [{"success": false, "message": "record does not exist"}]}"#,
        );
        assert_eq!(expect_deleted(env), Err(GatewayError::NotFound));
    }

    #[test]
    fn successful_delete_has_no_payload() {
        let env = write_envelope(r#"{"success": true, "results": [{"success": true}]}"#);
        assert_eq!(expect_deleted(env), Ok(()));
    }
}
