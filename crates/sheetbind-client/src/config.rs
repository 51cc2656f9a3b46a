//! Client configuration

use std::env;
use std::fmt;
use std::time::Duration;

use sheetbind_core::{LookupPolicy, ValueInputOption};

use crate::error::{ClientError, ClientResult};

/// Public endpoint of the spreadsheet service
pub const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com/v4";

/// Configuration for a spreadsheet client
#[derive(Clone)]
pub struct ClientConfig {
    /// Key of the remote spreadsheet (the long id in its URL)
    pub spreadsheet_id: String,

    /// Service endpoint, without a trailing `/spreadsheets`
    pub base_url: String,

    /// Bearer token sent with every request; obtained and refreshed elsewhere
    pub access_token: Option<String>,

    /// Total request timeout
    pub timeout: Duration,

    /// Connection timeout
    pub connect_timeout: Duration,

    /// User-Agent header value
    pub user_agent: String,

    /// Interpretation applied to every row and column save
    pub value_input_option: ValueInputOption,

    /// Policy given to fetched rows for writes to unknown keys
    pub lookup_policy: LookupPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: None,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("sheetbind/{}", env!("CARGO_PKG_VERSION")),
            value_input_option: ValueInputOption::default(),
            lookup_policy: LookupPolicy::default(),
        }
    }
}

impl ClientConfig {
    /// Create a config for the given spreadsheet with default values
    pub fn new(spreadsheet_id: impl Into<String>) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            ..Self::default()
        }
    }

    /// Load configuration from `SHEETBIND_*` environment variables
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ClientResult<Self> {
        let mut config = Self::new(lookup("SHEETBIND_SPREADSHEET_ID").unwrap_or_default());

        if let Some(url) = lookup("SHEETBIND_BASE_URL") {
            config.base_url = url;
        }
        config.access_token = lookup("SHEETBIND_ACCESS_TOKEN").filter(|t| !t.is_empty());

        if let Some(secs) = lookup("SHEETBIND_TIMEOUT_SECS") {
            let secs: f64 = secs.parse().map_err(|_| {
                ClientError::Configuration(format!("SHEETBIND_TIMEOUT_SECS is not a number: {secs:?}"))
            })?;
            if !secs.is_finite() || secs <= 0.0 {
                return Err(ClientError::Configuration(format!(
                    "SHEETBIND_TIMEOUT_SECS must be positive, got {secs}"
                )));
            }
            config.timeout = Duration::try_from_secs_f64(secs).map_err(|e| {
                ClientError::Configuration(format!("SHEETBIND_TIMEOUT_SECS out of range: {e}"))
            })?;
        }

        if let Some(name) = lookup("SHEETBIND_VALUE_INPUT") {
            config.value_input_option = ValueInputOption::from_name(&name).ok_or_else(|| {
                ClientError::Configuration(format!(
                    "SHEETBIND_VALUE_INPUT must be RAW or USER_ENTERED, got {name:?}"
                ))
            })?;
        }

        if let Some(flag) = lookup("SHEETBIND_STRICT_LOOKUP") {
            config.lookup_policy = match flag.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => LookupPolicy::Strict,
                "0" | "false" | "no" | "" => LookupPolicy::Lenient,
                _ => {
                    return Err(ClientError::Configuration(format!(
                        "SHEETBIND_STRICT_LOOKUP must be true or false, got {flag:?}"
                    )))
                }
            };
        }

        Ok(config)
    }

    /// Set the spreadsheet key
    pub fn spreadsheet_id(mut self, id: impl Into<String>) -> Self {
        self.spreadsheet_id = id.into();
        self
    }

    /// Set the service endpoint
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the bearer token
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Set the total timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connection timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the User-Agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Set the value input option used by saves
    pub fn value_input_option(mut self, option: ValueInputOption) -> Self {
        self.value_input_option = option;
        self
    }

    /// Set the lookup policy given to fetched rows
    pub fn lookup_policy(mut self, policy: LookupPolicy) -> Self {
        self.lookup_policy = policy;
        self
    }

    /// Whether requests will carry credentials
    pub fn is_auth_active(&self) -> bool {
        self.access_token.is_some()
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("base_url", &self.base_url)
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("user_agent", &self.user_agent)
            .field("value_input_option", &self.value_input_option)
            .field("lookup_policy", &self.lookup_policy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("doc");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.value_input_option, ValueInputOption::UserEntered);
        assert_eq!(config.lookup_policy, LookupPolicy::Lenient);
        assert!(!config.is_auth_active());
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::new("doc")
            .access_token("tok")
            .timeout(Duration::from_secs(5))
            .value_input_option(ValueInputOption::Raw)
            .lookup_policy(LookupPolicy::Strict);

        assert!(config.is_auth_active());
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.value_input_option, ValueInputOption::Raw);
        assert_eq!(config.lookup_policy, LookupPolicy::Strict);
    }

    #[test]
    fn test_from_lookup() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("SHEETBIND_SPREADSHEET_ID", "1pU6-abc"),
            ("SHEETBIND_ACCESS_TOKEN", "secret"),
            ("SHEETBIND_TIMEOUT_SECS", "2.5"),
            ("SHEETBIND_VALUE_INPUT", "raw"),
            ("SHEETBIND_STRICT_LOOKUP", "true"),
        ]))
        .unwrap();

        assert_eq!(config.spreadsheet_id, "1pU6-abc");
        assert_eq!(config.access_token.as_deref(), Some("secret"));
        assert_eq!(config.timeout, Duration::from_millis(2500));
        assert_eq!(config.value_input_option, ValueInputOption::Raw);
        assert_eq!(config.lookup_policy, LookupPolicy::Strict);
    }

    #[test]
    fn test_from_lookup_rejects_bad_values() {
        let err = ClientConfig::from_lookup(lookup_from(&[("SHEETBIND_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ClientError::Configuration(_)));

        let err = ClientConfig::from_lookup(lookup_from(&[("SHEETBIND_TIMEOUT_SECS", "1e300")]))
            .unwrap_err();
        assert!(matches!(err, ClientError::Configuration(_)));

        let err = ClientConfig::from_lookup(lookup_from(&[("SHEETBIND_VALUE_INPUT", "parsed")]))
            .unwrap_err();
        assert!(matches!(err, ClientError::Configuration(_)));

        let err = ClientConfig::from_lookup(lookup_from(&[("SHEETBIND_STRICT_LOOKUP", "ture")]))
            .unwrap_err();
        assert!(matches!(err, ClientError::Configuration(_)));
    }

    #[test]
    fn test_strict_lookup_flag_values() {
        for flag in ["1", "TRUE", "yes"] {
            let config =
                ClientConfig::from_lookup(lookup_from(&[("SHEETBIND_STRICT_LOOKUP", flag)])).unwrap();
            assert_eq!(config.lookup_policy, LookupPolicy::Strict);
        }
        for flag in ["0", "false", "No", ""] {
            let config =
                ClientConfig::from_lookup(lookup_from(&[("SHEETBIND_STRICT_LOOKUP", flag)])).unwrap();
            assert_eq!(config.lookup_policy, LookupPolicy::Lenient);
        }
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig::new("doc").access_token("very-secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("very-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
