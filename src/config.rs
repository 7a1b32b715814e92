use std::path::PathBuf;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_file: PathBuf,
    pub host: String,
    pub port: u16,
    /// Sessions expire after this long without a request.
    pub session_inactivity_minutes: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("data.json"),
            host: "0.0.0.0".to_owned(),
            port: 5002,
            session_inactivity_minutes: 60,
        }
    }
}

impl Config {
    /// Reads `DATA_FILE`, `HOST`, `PORT` and `SESSION_INACTIVITY_MINUTES`,
    /// after loading `.env` if there is one.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        let mut config = Self::default();

        if let Ok(data_file) = dotenv::var("DATA_FILE") {
            config.data_file = data_file.into();
        }
        if let Ok(host) = dotenv::var("HOST") {
            config.host = host;
        }
        if let Ok(port) = dotenv::var("PORT") {
            config.port = port.parse().with_context(|| format!("invalid PORT {port:?}"))?;
        }
        if let Ok(minutes) = dotenv::var("SESSION_INACTIVITY_MINUTES") {
            config.session_inactivity_minutes = minutes
                .parse()
                .with_context(|| format!("invalid SESSION_INACTIVITY_MINUTES {minutes:?}"))?;
        }

        Ok(config)
    }
}
