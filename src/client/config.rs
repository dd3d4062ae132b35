use config::{Config, Environment};
use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Deserialize)]
pub struct ClientSettings {
    pub api_url: String,
}

impl ClientSettings {
    /// Read `API_URL` from the environment, falling back to the local
    /// default.
    pub fn new() -> Self {
        Config::builder()
            .set_default("api_url", DEFAULT_API_URL)
            .unwrap()
            .add_source(Environment::default())
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }
}
