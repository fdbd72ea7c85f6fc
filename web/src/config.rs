use anyhow::{Context, Result, anyhow};
use liblimno::SchemaVariant;
use serde::{Deserialize, Deserializer};
use std::{collections::HashMap, net::SocketAddr, path::Path, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct ListenConfig {
    pub(crate) host: String,
    pub(crate) port: u16,
}

const DEFAULT_HTTP_PORT: u16 = 8080;
const DEFAULT_HOST: &str = "0.0.0.0";
const PORT_ENV_VAR: &str = "PORT";

fn default_listen() -> ListenConfig {
    ListenConfig {
        host: DEFAULT_HOST.to_string(),
        port: DEFAULT_HTTP_PORT,
    }
}

fn default_static_dir() -> PathBuf {
    PathBuf::from(".")
}

// This handles the case where the `listen` block is PRESENT, but a field may be missing.
fn deserialize_listen_with_default_port<'de, D>(deserializer: D) -> Result<ListenConfig, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(deny_unknown_fields)]
    struct PartialListenConfig {
        host: Option<String>,
        port: Option<u16>,
    }

    let partial_config = PartialListenConfig::deserialize(deserializer)?;

    Ok(ListenConfig {
        host: partial_config
            .host
            .unwrap_or_else(|| DEFAULT_HOST.to_string()),
        port: partial_config.port.unwrap_or(DEFAULT_HTTP_PORT),
    })
}

#[derive(Debug, Deserialize, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct EnvConfig {
    #[serde(default = "default_listen")]
    #[serde(deserialize_with = "deserialize_listen_with_default_port")]
    pub(crate) listen: ListenConfig,
    #[serde(default)]
    pub(crate) schema: SchemaVariant,
    /// directory served for any request that isn't part of the api
    #[serde(default = "default_static_dir")]
    pub(crate) static_dir: PathBuf,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            schema: SchemaVariant::default(),
            static_dir: default_static_dir(),
        }
    }
}

impl EnvConfig {
    /// Picks the block for environment `envname` out of a yaml document that
    /// maps environment names to configurations.
    pub(crate) fn parse(contents: &str, envname: &str) -> Result<Self> {
        let mut configs: HashMap<String, EnvConfig> =
            serde_yaml::from_str(contents).with_context(|| "Couldn't parse config file")?;
        configs
            .remove(envname)
            .ok_or_else(|| anyhow!("No configuration found for environment '{envname}'"))
    }

    /// Load the configuration for `envname` from a file. A config file that
    /// doesn't exist is not an error; the defaults are used instead.
    pub(crate) async fn load<P: AsRef<Path>>(path: P, envname: &str) -> Result<Self> {
        let path = path.as_ref();
        let exists = tokio::fs::try_exists(path)
            .await
            .with_context(|| format!("Unable to check for config file {}", path.display()))?;
        if !exists {
            debug!(?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }
        debug!(?path, envname, "Loading config");
        let contents = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&contents, envname)
    }

    /// Apply overrides from the process environment
    pub(crate) fn init(&mut self) -> Result<()> {
        self.apply_port_override(std::env::var(PORT_ENV_VAR).ok().as_deref())
    }

    fn apply_port_override(&mut self, value: Option<&str>) -> Result<()> {
        match value.map(str::trim) {
            None | Some("") => Ok(()),
            Some(port) => {
                debug!("Using port {port} from environment variable {PORT_ENV_VAR}");
                self.listen.port = port.parse().with_context(|| {
                    format!("Invalid port '{port}' in environment variable {PORT_ENV_VAR}")
                })?;
                Ok(())
            }
        }
    }

    pub(crate) fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.listen.host, self.listen.port)
            .parse()
            .with_context(|| {
                format!(
                    "Invalid listen address {}:{}",
                    self.listen.host, self.listen.port
                )
            })
    }
}
