//! Form configuration
//!
//! Which forms exist, where they post, and which fields they carry is data,
//! not code. The default set is embedded below; a page can replace it with an
//! inline `<script type="application/toml" id="forms-config">` element.

use serde::Deserialize;
use std::collections::HashSet;
use wasm_bindgen::JsCast;

/// Id of the optional inline config element
pub const CONFIG_ELEMENT_ID: &str = "forms-config";

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Prefix for every endpoint. Empty means same-origin relative paths.
    #[serde(default)]
    pub api_base: String,
    #[serde(default = "default_notice_timeout_ms")]
    pub notice_timeout_ms: u32,
    pub forms: Vec<FormConfig>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FormConfig {
    pub key: String,
    pub title: String,
    pub form_id: String,
    pub status_id: String,
    pub endpoint: String,
    pub submit_label: String,
    #[serde(default)]
    pub reset_on_success: bool,
    #[serde(default)]
    pub success_notice: Option<String>,
    /// Fields in which Enter submits the form
    #[serde(default)]
    pub submit_on_enter: Vec<String>,
    pub fields: Vec<FieldConfig>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FieldConfig {
    pub name: String,
    pub label: String,
    pub input_id: String,
    #[serde(default = "default_input_type")]
    pub input_type: String,
    #[serde(default)]
    pub placeholder: Option<String>,
}

impl FormConfig {
    pub fn submits_on_enter(&self, field_name: &str) -> bool {
        self.submit_on_enter.iter().any(|f| f == field_name)
    }
}

fn default_notice_timeout_ms() -> u32 {
    4000
}

fn default_input_type() -> String {
    "text".to_string()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
api_base = ""
notice_timeout_ms = 4000

[[forms]]
key = "signup"
title = "Sign Up"
form_id = "signupForm"
status_id = "signupMessage"
endpoint = "/api/signup"
submit_label = "Sign Up"
reset_on_success = true
success_notice = "Signup Successful! You can now login."

[[forms.fields]]
name = "username"
label = "Username"
input_id = "signupUsername"

[[forms.fields]]
name = "password"
label = "Password"
input_id = "signupPassword"
input_type = "password"

[[forms.fields]]
name = "phone"
label = "Phone"
input_id = "signupPhone"
input_type = "tel"

[[forms]]
key = "login"
title = "Login"
form_id = "loginForm"
status_id = "loginMessage"
endpoint = "/api/login"
submit_label = "Login"
success_notice = "Login Successful!"
submit_on_enter = ["username", "password"]

[[forms.fields]]
name = "username"
label = "Username"
input_id = "loginUsername"

[[forms.fields]]
name = "password"
label = "Password"
input_id = "loginPassword"
input_type = "password"
"#;

impl Config {
    /// Parse and validate a TOML document
    pub fn parse(source: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.forms.is_empty() {
            return Err(ConfigError::Invalid("no forms configured".into()));
        }

        let mut keys = HashSet::new();
        let mut dom_ids = HashSet::new();
        for form in &self.forms {
            if !keys.insert(form.key.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate form key '{}'",
                    form.key
                )));
            }
            if !form.endpoint.starts_with('/') {
                return Err(ConfigError::Invalid(format!(
                    "form '{}': endpoint '{}' must start with '/'",
                    form.key, form.endpoint
                )));
            }

            let ids = [form.form_id.as_str(), form.status_id.as_str()]
                .into_iter()
                .chain(form.fields.iter().map(|f| f.input_id.as_str()));
            for id in ids {
                if !dom_ids.insert(id) {
                    return Err(ConfigError::Invalid(format!(
                        "form '{}': element id '{}' is used twice",
                        form.key, id
                    )));
                }
            }

            let mut names = HashSet::new();
            for field in &form.fields {
                if !names.insert(field.name.as_str()) {
                    return Err(ConfigError::Invalid(format!(
                        "form '{}': duplicate field '{}'",
                        form.key, field.name
                    )));
                }
            }
            if let Some(unknown) = form
                .submit_on_enter
                .iter()
                .find(|name| !names.contains(name.as_str()))
            {
                return Err(ConfigError::Invalid(format!(
                    "form '{}': submit_on_enter names unknown field '{}'",
                    form.key, unknown
                )));
            }
        }
        Ok(())
    }
}

pub fn default_config() -> Result<Config, ConfigError> {
    Config::parse(DEFAULT_CONFIG)
}

/// Load configuration for the current page
///
/// Search order:
/// 1. Inline `<script id="forms-config">` in the document
/// 2. Falls back to the embedded default config
///
/// A broken inline config is logged and ignored.
pub fn load_config() -> Result<Config, ConfigError> {
    if let Some(source) = inline_config_source() {
        match Config::parse(&source) {
            Ok(config) => {
                log::info!("Loading config from #{}", CONFIG_ELEMENT_ID);
                return Ok(config);
            }
            Err(e) => {
                log::error!("Ignoring #{}: {}", CONFIG_ELEMENT_ID, e);
            }
        }
    }

    log::info!("Using default embedded configuration");
    default_config()
}

fn inline_config_source() -> Option<String> {
    let element = web_sys::window()?
        .document()?
        .get_element_by_id(CONFIG_ELEMENT_ID)?;
    let script = element.dyn_into::<web_sys::HtmlScriptElement>().ok()?;
    script.text().ok().filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = default_config().unwrap();
        assert_eq!(config.api_base, "");
        assert_eq!(config.forms.len(), 2);

        let signup = &config.forms[0];
        assert_eq!(signup.form_id, "signupForm");
        assert_eq!(signup.status_id, "signupMessage");
        assert_eq!(signup.endpoint, "/api/signup");
        assert!(signup.reset_on_success);
        let names: Vec<_> = signup.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["username", "password", "phone"]);

        let login = &config.forms[1];
        assert_eq!(login.form_id, "loginForm");
        assert_eq!(login.status_id, "loginMessage");
        assert_eq!(login.endpoint, "/api/login");
        assert!(!login.reset_on_success);
        assert!(login.submits_on_enter("username"));
        assert!(login.submits_on_enter("password"));
        assert_eq!(login.fields[0].input_id, "loginUsername");
        assert_eq!(login.fields[1].input_id, "loginPassword");
    }

    #[test]
    fn test_field_defaults() {
        let config = Config::parse(
            r#"
            [[forms]]
            key = "contact"
            title = "Contact"
            form_id = "contactForm"
            status_id = "contactMessage"
            endpoint = "/api/contact"
            submit_label = "Send"

            [[forms.fields]]
            name = "email"
            label = "Email"
            input_id = "contactEmail"
            "#,
        )
        .unwrap();
        assert_eq!(config.notice_timeout_ms, 4000);
        let form = &config.forms[0];
        assert!(!form.reset_on_success);
        assert!(form.success_notice.is_none());
        assert!(form.submit_on_enter.is_empty());
        assert_eq!(form.fields[0].input_type, "text");
    }

    #[test]
    fn test_rejects_empty_forms() {
        let err = Config::parse("forms = []").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_unparseable() {
        let err = Config::parse("forms = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_relative_endpoint() {
        let mut config = default_config().unwrap();
        config.forms[0].endpoint = "api/signup".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("must start with '/'"));
    }

    #[test]
    fn test_rejects_unknown_enter_field() {
        let mut config = default_config().unwrap();
        config.forms[1].submit_on_enter.push("otp".into());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("unknown field 'otp'"));
    }

    #[test]
    fn test_rejects_shared_element_id() {
        let mut config = default_config().unwrap();
        config.forms[1].status_id = "signupMessage".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("signupMessage"));
    }

    #[test]
    fn test_rejects_duplicate_field() {
        let mut config = default_config().unwrap();
        let dup = FieldConfig {
            input_id: "loginUsername2".into(),
            ..config.forms[1].fields[0].clone()
        };
        config.forms[1].fields.push(dup);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate field 'username'"));
    }
}
