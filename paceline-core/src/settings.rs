use config::{Config, ConfigError, File};
use lazy_static::lazy_static;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct Settings {
    pub default_interval_secs: u64,
    pub default_context: usize,
    pub placeholder_name: String,
    pub storage_key: String,
    pub storage_path: String,
}

impl Settings {
    fn new() -> Result<Settings, ConfigError> {
        let config = Config::builder()
            .set_default("default_interval_secs", 2)?
            .set_default("default_context", 3)?
            .set_default("placeholder_name", "noname")?
            .set_default("storage_key", "race-splits")?
            .set_default("storage_path", "races")?
            .add_source(File::with_name("config.yaml").required(false))
            .build()?;

        config.try_deserialize()
    }
}

lazy_static! {
    pub static ref GLOBAL_CONFIG: Settings = Settings::new().expect("failed to read config file");
}
