use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use supalink::ClientConfig;

#[derive(Parser, Debug)]
#[command(name = "supalink", version, about = "Inspect and ping a Supabase-style backend")]
pub struct Params {
    /// Project base url.
    #[arg(long, env = "SUPABASE_URL")]
    pub url: Option<String>,

    /// Public (anon) api key.
    #[arg(long, env = "SUPABASE_ANON_KEY", hide_env_values = true)]
    pub anon_key: Option<String>,

    /// Postgres schema for REST calls.
    #[arg(long, env = "SUPABASE_SCHEMA")]
    pub schema: Option<String>,

    /// TOML file with `url`, `anon_key`, `schema`, `timeout_secs` and `[headers]`.
    #[arg(long, env = "SUPALINK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,

    #[arg(short, long, global = true, help = "Log client internals to stderr")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Print the resolved service endpoints.
    Info,
    /// Call the auth health endpoint.
    Ping,
}

impl Params {
    /// File values first, then env, then flags on top.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut cfg = ClientConfig::load_or_default(self.config.as_ref())?;
        if let Some(url) = &self.url {
            cfg.url = url.clone();
        }
        if let Some(key) = &self.anon_key {
            cfg.anon_key = key.clone();
        }
        if let Some(schema) = &self.schema {
            cfg.schema = Some(schema.clone());
        }
        if let Some(secs) = self.timeout {
            cfg.timeout_secs = Some(secs);
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "url = \"https://file.supabase.co\"\nanon_key = \"file-key\"\nschema = \"audit\""
        )
        .unwrap();

        let params = Params::try_parse_from([
            "supalink",
            "--config",
            file.path().to_str().unwrap(),
            "--url",
            "https://flag.supabase.co",
            "info",
        ])
        .unwrap();

        let cfg = params.client_config().unwrap();
        assert_eq!(cfg.url, "https://flag.supabase.co");
        assert_eq!(cfg.anon_key, "file-key");
        assert_eq!(cfg.schema.as_deref(), Some("audit"));
    }

    #[test]
    fn zero_timeout_is_refused() {
        let args = ["supalink", "--url", "https://x.supabase.co", "--timeout", "0", "info"];
        assert!(Params::try_parse_from(args).is_err());

        let params =
            Params::try_parse_from(["supalink", "--timeout", "5", "info"]).unwrap();
        assert_eq!(params.client_config().unwrap().timeout_secs, Some(5));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Params::try_parse_from(["supalink", "--url", "https://x.supabase.co"]).is_err());
    }
}
