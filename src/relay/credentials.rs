//! Speech service credentials.
//!
//! The subscription key and region come from the environment. Unset and
//! empty values are treated the same: the relay answers 500 instead of
//! calling the issuer.

use crate::relay::error::RelayError;

pub const SUBSCRIPTION_KEY_ENV: &str = "AZURE_SPEECH_API_KEY";
pub const REGION_ENV: &str = "AZURE_SPEECH_REGION";

/// Raw credential pair as found in the environment.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SpeechCredentials {
    pub subscription_key: Option<String>,
    pub region: Option<String>,
}

// The key must never reach a log line.
impl std::fmt::Debug for SpeechCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechCredentials")
            .field("subscription_key", &self.subscription_key.as_ref().map(|_| "<redacted>"))
            .field("region", &self.region)
            .finish()
    }
}

/// A credential pair that passed resolution and may be sent upstream.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedCredentials {
    pub subscription_key: String,
    pub region: String,
}

impl std::fmt::Debug for ResolvedCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedCredentials")
            .field("subscription_key", &"<redacted>")
            .field("region", &self.region)
            .finish()
    }
}

impl SpeechCredentials {
    pub fn new(subscription_key: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            subscription_key: Some(subscription_key.into()),
            region: Some(region.into()),
        }
    }

    /// Read both values from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read both values through an arbitrary lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            subscription_key: lookup(SUBSCRIPTION_KEY_ENV),
            region: lookup(REGION_ENV),
        }
    }

    /// Names of the variables that are unset or empty.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.subscription_key) {
            missing.push(SUBSCRIPTION_KEY_ENV);
        }
        if is_blank(&self.region) {
            missing.push(REGION_ENV);
        }
        missing
    }

    /// Check presence and region shape, producing credentials safe to send.
    pub fn resolve(&self) -> Result<ResolvedCredentials, RelayError> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(RelayError::MissingConfiguration(missing));
        }

        let subscription_key = self.subscription_key.clone().unwrap_or_default();
        let region = self.region.clone().unwrap_or_default();

        // The region becomes part of a hostname.
        if !region.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(RelayError::InvalidConfiguration(format!(
                "{} '{}' is not a valid region identifier",
                REGION_ENV, region
            )));
        }

        Ok(ResolvedCredentials {
            subscription_key,
            region,
        })
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

/// Where a relay obtains its credentials on each invocation.
#[derive(Debug, Clone)]
pub enum CredentialSource {
    /// Captured once at process start.
    Fixed(SpeechCredentials),
    /// Re-read from the environment on every call.
    Environment,
}

impl CredentialSource {
    pub fn load(&self) -> SpeechCredentials {
        match self {
            CredentialSource::Fixed(credentials) => credentials.clone(),
            CredentialSource::Environment => SpeechCredentials::from_env(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_from_lookup() {
        let creds = SpeechCredentials::from_lookup(lookup(&[
            (SUBSCRIPTION_KEY_ENV, "secret"),
            (REGION_ENV, "westeurope"),
        ]));
        let resolved = creds.resolve().unwrap();
        assert_eq!(resolved.subscription_key, "secret");
        assert_eq!(resolved.region, "westeurope");
    }

    #[test]
    fn test_unset_and_empty_are_missing() {
        let creds = SpeechCredentials::from_lookup(lookup(&[(REGION_ENV, "")]));
        assert_eq!(creds.missing(), vec![SUBSCRIPTION_KEY_ENV, REGION_ENV]);

        let creds = SpeechCredentials::from_lookup(lookup(&[(SUBSCRIPTION_KEY_ENV, "secret")]));
        match creds.resolve() {
            Err(RelayError::MissingConfiguration(names)) => assert_eq!(names, vec![REGION_ENV]),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_region_must_be_a_host_label() {
        for region in ["evil.com/x", "west us", "eastus@attacker", "a.b"] {
            let creds = SpeechCredentials::new("secret", region);
            assert!(
                matches!(creds.resolve(), Err(RelayError::InvalidConfiguration(_))),
                "region {region:?} should be rejected"
            );
        }
        assert!(SpeechCredentials::new("secret", "east-us-2").resolve().is_ok());
    }

    #[test]
    fn test_debug_redacts_key() {
        let creds = SpeechCredentials::new("super-secret", "eastus");
        let rendered = format!("{:?} {:?}", creds, creds.resolve().unwrap());
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("eastus"));
    }

    #[test]
    fn test_fixed_source() {
        let source = CredentialSource::Fixed(SpeechCredentials::new("k", "r"));
        assert_eq!(source.load(), SpeechCredentials::new("k", "r"));
    }
}
