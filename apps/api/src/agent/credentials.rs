use std::fmt;

pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const MOONSHOT_API_KEY_ENV: &str = "MOONSHOT_API_KEY";

/// Per-call vendor credentials. Never persisted, never cached.
#[derive(Clone, Default)]
pub struct Credentials {
    pub openai_api_key: Option<String>,
    pub moonshot_api_key: Option<String>,
    /// Overrides the fixed OpenAI default model.
    pub openai_model: Option<String>,
    /// Overrides the Moonshot default model.
    pub moonshot_model: Option<String>,
}

impl Credentials {
    /// Fills keys the caller left unset from `lookup` (normally the process
    /// environment). Keys that were supplied are never overwritten.
    pub fn with_env_fallback(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if self.openai_api_key.is_none() {
            self.openai_api_key = lookup(OPENAI_API_KEY_ENV);
        }
        if self.moonshot_api_key.is_none() {
            self.moonshot_api_key = lookup(MOONSHOT_API_KEY_ENV);
        }
        self
    }

    pub fn openai_key(&self) -> Option<&str> {
        non_blank(self.openai_api_key.as_deref())
    }

    pub fn moonshot_key(&self) -> Option<&str> {
        non_blank(self.moonshot_api_key.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Reads a variable from the process environment.
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |key: &Option<String>| key.as_ref().map(|_| "<redacted>");
        f.debug_struct("Credentials")
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("moonshot_api_key", &redact(&self.moonshot_api_key))
            .field("openai_model", &self.openai_model)
            .field("moonshot_model", &self.moonshot_model)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_with_both(key: &str) -> Option<String> {
        match key {
            OPENAI_API_KEY_ENV => Some("env-openai".to_string()),
            MOONSHOT_API_KEY_ENV => Some("env-moonshot".to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_env_fills_missing_keys() {
        let creds = Credentials::default().with_env_fallback(env_with_both);
        assert_eq!(creds.openai_key(), Some("env-openai"));
        assert_eq!(creds.moonshot_key(), Some("env-moonshot"));
    }

    #[test]
    fn test_supplied_key_is_not_overwritten() {
        let creds = Credentials {
            openai_api_key: Some("call-key".to_string()),
            ..Default::default()
        }
        .with_env_fallback(env_with_both);
        assert_eq!(creds.openai_key(), Some("call-key"));
        assert_eq!(creds.moonshot_key(), Some("env-moonshot"));
    }

    #[test]
    fn test_blank_key_counts_as_absent() {
        let creds = Credentials {
            openai_api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(creds.openai_key(), None);
    }

    #[test]
    fn test_debug_redacts_keys() {
        let creds = Credentials {
            openai_api_key: Some("sk-secret".to_string()),
            ..Default::default()
        };
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
