use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Everything needed to reach one backend project.
///
/// Nothing here is validated until [`SupabaseClient::new`](crate::SupabaseClient::new);
/// a config loaded from a partial file may still be completed from flags or env.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Project base url, e.g. `https://xyzcompany.supabase.co`.
    pub url: String,

    /// Public (anon) api key. Sent as `apikey` and as bearer token.
    pub anon_key: String,

    /// Postgres schema for REST calls. `None` = server default (`public`).
    pub schema: Option<String>,

    /// Extra headers sent with every request. Win over the defaults.
    pub headers: BTreeMap<String, String>,

    /// Per-request timeout handed to the http stack. `None` = no timeout, `0` is rejected.
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
            ..Self::default()
        }
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sub-second remainders round up to the next whole second.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let secs = timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0);
        self.timeout_secs = Some(secs);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Key trimmed to a short prefix, safe for logs and terminal output.
    pub fn redacted_key(&self) -> String {
        redact(&self.anon_key)
    }

    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("reading {:?}", path.as_ref()))?;
        let cfg: ClientConfig =
            toml::from_str(&raw).with_context(|| "parsing client config TOML")?;
        Ok(cfg)
    }
}

const REDACT_PREFIX: usize = 6;

/// Keeps only the first few characters of a key so logs stay useful without leaking it.
/// Short keys show nothing; the prefix is never more than half the key.
fn redact(key: &str) -> String {
    if key.is_empty() {
        return String::new();
    }
    if key.chars().count() <= REDACT_PREFIX * 2 {
        return "…".to_string();
    }
    let prefix: String = key.chars().take(REDACT_PREFIX).collect();
    format!("{prefix}…")
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("url", &self.url)
            .field("anon_key", &self.redacted_key())
            .field("schema", &self.schema)
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
