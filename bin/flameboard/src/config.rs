//! Runtime settings, layered from `config/default.toml` (optional) and
//! `FLAMEBOARD_*` environment variables.

use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub openai: OpenAiSettings,
}

#[derive(Debug, Default, Deserialize)]
pub struct OpenAiSettings {
    /// Falls back to the plain OPENAI_API_KEY variable when unset
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
}

impl Settings {
    pub fn load() -> anyhow::Result<Self> {
        let mut settings: Settings = Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 8080)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(Environment::with_prefix("FLAMEBOARD").separator("__"))
            .build()?
            .try_deserialize()?;

        if settings.openai.api_key.is_none() {
            settings.openai.api_key = std::env::var("OPENAI_API_KEY").ok();
        }
        Ok(settings)
    }
}
