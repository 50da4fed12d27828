use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub const PROCESSING_TEXT: &str = "Processing...";
pub const DEFAULT_SUCCESS_TEXT: &str = "Success!";
pub const DEFAULT_ERROR_TEXT: &str = "An error occurred.";
pub const NETWORK_ERROR_TEXT: &str =
    "Network error. Could not connect to server or process response.";

/// Field name -> value snapshot of a form, taken when it is submitted.
///
/// Serializes as a flat JSON object, which is the request body the
/// signup/login endpoints expect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormSubmission(BTreeMap<String, String>);

impl FormSubmission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a submission from the controls of a form.
    ///
    /// Controls without a name and disabled controls are skipped, the same
    /// way the browser leaves them out of form data. A repeated name keeps
    /// the last value.
    pub fn from_controls<I>(controls: I) -> Self
    where
        I: IntoIterator<Item = FormControl>,
    {
        controls
            .into_iter()
            .filter(|c| !c.disabled && !c.name.is_empty())
            .map(|c| (c.name, c.value))
            .collect()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for FormSubmission
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A single form control as read from the DOM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormControl {
    pub name: String,
    pub value: String,
    pub disabled: bool,
}

/// Body returned by the signup/login endpoints.
///
/// Both fields are optional and kept as raw JSON, so a number or an object
/// in either of them does not make the body unreadable. Anything else in the
/// body is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl ApiReply {
    pub fn message_text(&self) -> Option<String> {
        display_text(self.message.as_ref())
    }

    pub fn error_text(&self) -> Option<String> {
        display_text(self.error.as_ref())
    }
}

/// Text to show for a `message`/`error` value, or `None` to use the
/// generic default.
///
/// Strings are shown as-is, numbers and `true` are stringified. `null`,
/// `false`, `""`, arrays and objects fall back.
fn display_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    #[default]
    Neutral,
    Success,
    Error,
}

impl StatusKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            StatusKind::Neutral => "",
            StatusKind::Success => "success",
            StatusKind::Error => "error",
        }
    }
}

/// What the status element of a form currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

impl StatusMessage {
    pub fn processing() -> Self {
        Self {
            text: PROCESSING_TEXT.to_string(),
            kind: StatusKind::Neutral,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Error,
        }
    }

    pub fn network_failure() -> Self {
        Self::error(NETWORK_ERROR_TEXT)
    }

    /// Status for a response that arrived and parsed.
    ///
    /// `ok` is the 2xx check. A missing or empty `message`/`error` falls
    /// back to the generic text.
    pub fn from_reply(ok: bool, reply: &ApiReply) -> Self {
        if ok {
            Self::success(
                reply
                    .message_text()
                    .unwrap_or_else(|| DEFAULT_SUCCESS_TEXT.to_string()),
            )
        } else {
            Self::error(
                reply
                    .error_text()
                    .unwrap_or_else(|| DEFAULT_ERROR_TEXT.to_string()),
            )
        }
    }

    /// Class attribute for the status element: `message`, `message success`
    /// or `message error`.
    pub fn class_name(&self) -> String {
        match self.kind.css_class() {
            "" => "message".to_string(),
            extra => format!("message {}", extra),
        }
    }
}

/// True for HTTP 2xx.
pub fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reply(json: &str) -> ApiReply {
        serde_json::from_str(json).unwrap()
    }

    fn control(name: &str, value: &str) -> FormControl {
        FormControl {
            name: name.to_string(),
            value: value.to_string(),
            disabled: false,
        }
    }

    #[test]
    fn test_submission_serializes_flat_object() {
        let submission: FormSubmission = [("username", "alice"), ("password", "s3cret")]
            .into_iter()
            .collect();
        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"username": "alice", "password": "s3cret"})
        );
    }

    #[test]
    fn test_from_controls_skips_unnamed_and_disabled() {
        let mut hidden = control("token", "x");
        hidden.disabled = true;
        let submission = FormSubmission::from_controls(vec![
            control("username", "bob"),
            control("", "submit"),
            hidden,
            control("phone", ""),
        ]);
        assert_eq!(submission.len(), 2);
        assert_eq!(submission.get("username"), Some("bob"));
        assert_eq!(submission.get("phone"), Some(""));
        assert_eq!(submission.get("token"), None);
    }

    #[test]
    fn test_from_controls_last_duplicate_wins() {
        let submission =
            FormSubmission::from_controls(vec![control("a", "1"), control("a", "2")]);
        assert_eq!(submission.get("a"), Some("2"));
    }

    #[test]
    fn test_reply_ignores_unknown_fields() {
        let reply: ApiReply =
            serde_json::from_str(r#"{"message":"ok","user":{"id":1}}"#).unwrap();
        assert_eq!(reply.message_text().as_deref(), Some("ok"));
        assert_eq!(reply.error, None);

        let empty: ApiReply = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, ApiReply::default());
    }

    #[test]
    fn test_status_from_success_reply() {
        let reply = reply(r#"{"message":"ok"}"#);
        let status = StatusMessage::from_reply(true, &reply);
        assert_eq!(status.text, "ok");
        assert_eq!(status.class_name(), "message success");
    }

    #[test]
    fn test_status_success_falls_back() {
        let status = StatusMessage::from_reply(true, &ApiReply::default());
        assert_eq!(status.text, DEFAULT_SUCCESS_TEXT);
        assert_eq!(status.kind, StatusKind::Success);

        let blank = ApiReply {
            message: Some(json!("")),
            error: None,
        };
        assert_eq!(
            StatusMessage::from_reply(true, &blank).text,
            DEFAULT_SUCCESS_TEXT
        );
    }

    #[test]
    fn test_status_from_error_reply() {
        let reply = reply(r#"{"message":"ignored","error":"exists"}"#);
        let status = StatusMessage::from_reply(false, &reply);
        assert_eq!(status.text, "exists");
        assert_eq!(status.class_name(), "message error");

        let fallback = StatusMessage::from_reply(false, &ApiReply::default());
        assert_eq!(fallback.text, DEFAULT_ERROR_TEXT);
    }

    #[test]
    fn test_non_string_values_still_parse() {
        let success = reply(r#"{"message":42}"#);
        assert_eq!(StatusMessage::from_reply(true, &success).text, "42");

        let rejected = reply(r#"{"error":{"username":"required"}}"#);
        let status = StatusMessage::from_reply(false, &rejected);
        assert_eq!(status.text, DEFAULT_ERROR_TEXT);
        assert_eq!(status.kind, StatusKind::Error);
    }

    #[test]
    fn test_display_text_per_json_type() {
        assert_eq!(display_text(Some(&json!("exists"))).as_deref(), Some("exists"));
        assert_eq!(display_text(Some(&json!(3.5))).as_deref(), Some("3.5"));
        assert_eq!(display_text(Some(&json!(0))).as_deref(), Some("0"));
        assert_eq!(display_text(Some(&json!(true))).as_deref(), Some("true"));
        assert_eq!(display_text(Some(&json!(false))), None);
        assert_eq!(display_text(Some(&json!(null))), None);
        assert_eq!(display_text(Some(&json!(""))), None);
        assert_eq!(display_text(Some(&json!({"a": 1}))), None);
        assert_eq!(display_text(Some(&json!(["a"]))), None);
        assert_eq!(display_text(None), None);
    }

    #[test]
    fn test_null_message_falls_back() {
        let status = StatusMessage::from_reply(true, &reply(r#"{"message":null}"#));
        assert_eq!(status.text, DEFAULT_SUCCESS_TEXT);
        let status = StatusMessage::from_reply(false, &reply(r#"{"error":false}"#));
        assert_eq!(status.text, DEFAULT_ERROR_TEXT);
    }

    #[test]
    fn test_processing_and_network_failure() {
        let processing = StatusMessage::processing();
        assert_eq!(processing.text, PROCESSING_TEXT);
        assert_eq!(processing.class_name(), "message");

        let failure = StatusMessage::network_failure();
        assert_eq!(failure.text, NETWORK_ERROR_TEXT);
        assert!(failure.class_name().contains("error"));
    }

    #[test]
    fn test_is_success_status() {
        assert!(is_success_status(200));
        assert!(is_success_status(201));
        assert!(!is_success_status(199));
        assert!(!is_success_status(409));
        assert!(!is_success_status(500));
    }
}
