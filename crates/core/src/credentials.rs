//! Credential resolution
//!
//! Per-request credential fields win over configured defaults, one field at
//! a time. Empty strings are treated as absent so a caller sending
//! `"keyId": ""` still picks up the configured key id.

use serde::Deserialize;

use crate::error::{ClientInitError, ProxyError};

/// Effective credentials used to build an exchange client
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub key_name: String,
    pub key_id: Option<String>,
    pub private_key: String,
}

impl Credentials {
    /// Identifier presented to the exchange: the key id when one is set,
    /// otherwise the key name.
    pub fn api_key(&self) -> &str {
        self.key_id.as_deref().unwrap_or(&self.key_name)
    }
}

// Keep private key material out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("key_name", &self.key_name)
            .field("key_id", &self.key_id)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Partially specified credentials (request fields or configured defaults)
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialOverrides {
    #[serde(default)]
    pub key_name: Option<String>,
    #[serde(default)]
    pub key_id: Option<String>,
    #[serde(default)]
    pub private_key: Option<String>,
}

impl std::fmt::Debug for CredentialOverrides {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialOverrides")
            .field("key_name", &self.key_name)
            .field("key_id", &self.key_id)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl CredentialOverrides {
    pub fn new(
        key_name: Option<String>,
        key_id: Option<String>,
        private_key: Option<String>,
    ) -> Self {
        CredentialOverrides {
            key_name,
            key_id,
            private_key,
        }
    }

    /// Merge with `defaults`, preferring fields set on `self`
    pub fn or(&self, defaults: &CredentialOverrides) -> CredentialOverrides {
        CredentialOverrides {
            key_name: pick(&self.key_name, &defaults.key_name),
            key_id: pick(&self.key_id, &defaults.key_id),
            private_key: pick(&self.private_key, &defaults.private_key),
        }
    }

    /// True when both mandatory fields are present
    pub fn is_complete(&self) -> bool {
        present(&self.key_name).is_some() && present(&self.private_key).is_some()
    }

    /// Resolve against `defaults` into effective credentials.
    ///
    /// Fails with a validation error naming the first missing mandatory field.
    pub fn resolve(&self, defaults: &CredentialOverrides) -> Result<Credentials, ProxyError> {
        self.or(defaults)
            .into_credentials()
            .map_err(ProxyError::missing_field)
    }

    /// Resolve for client construction, where missing fields mean the
    /// process is not configured rather than a bad request.
    pub fn resolve_for_client(
        &self,
        defaults: &CredentialOverrides,
    ) -> Result<Credentials, ClientInitError> {
        self.or(defaults)
            .into_credentials()
            .map_err(|_| ClientInitError::MissingCredentials)
    }

    fn into_credentials(self) -> Result<Credentials, &'static str> {
        let key_name = present(&self.key_name).ok_or("keyName")?;
        let private_key = present(&self.private_key).ok_or("privateKey")?;
        Ok(Credentials {
            key_name: key_name.to_string(),
            key_id: present(&self.key_id).map(str::to_string),
            private_key: private_key.to_string(),
        })
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn pick(preferred: &Option<String>, fallback: &Option<String>) -> Option<String> {
    present(preferred)
        .or_else(|| present(fallback))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> CredentialOverrides {
        CredentialOverrides::new(
            Some("default-name".into()),
            Some("default-id".into()),
            Some("default-key".into()),
        )
    }

    #[test]
    fn test_request_fields_win() {
        let request = CredentialOverrides::new(Some("req-name".into()), None, None);
        let creds = request.resolve(&defaults()).unwrap();
        assert_eq!(creds.key_name, "req-name");
        assert_eq!(creds.key_id.as_deref(), Some("default-id"));
        assert_eq!(creds.private_key, "default-key");
    }

    #[test]
    fn test_empty_string_falls_back() {
        let request = CredentialOverrides::new(Some(String::new()), Some(String::new()), None);
        let creds = request.resolve(&defaults()).unwrap();
        assert_eq!(creds.key_name, "default-name");
        assert_eq!(creds.key_id.as_deref(), Some("default-id"));
    }

    #[test]
    fn test_missing_private_key() {
        let request = CredentialOverrides::new(Some("name".into()), None, None);
        let err = request.resolve(&CredentialOverrides::default()).unwrap_err();
        assert_eq!(err, ProxyError::missing_field("privateKey"));
    }

    #[test]
    fn test_resolve_for_client_reports_configuration() {
        let err = CredentialOverrides::default()
            .resolve_for_client(&CredentialOverrides::default())
            .unwrap_err();
        assert_eq!(err, ClientInitError::MissingCredentials);
    }

    #[test]
    fn test_api_key_prefers_key_id() {
        let creds = CredentialOverrides::default().resolve(&defaults()).unwrap();
        assert_eq!(creds.api_key(), "default-id");

        let no_id = CredentialOverrides::new(Some("name".into()), None, Some("pk".into()))
            .resolve(&CredentialOverrides::default())
            .unwrap();
        assert_eq!(no_id.api_key(), "name");
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let creds = CredentialOverrides::default().resolve(&defaults()).unwrap();
        let rendered = format!("{:?} {:?}", creds, defaults());
        assert!(!rendered.contains("default-key"));
        assert!(rendered.contains("<redacted>"));
    }
}
