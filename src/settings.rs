use config::{Config, Environment};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub image_folder: String,
}

impl Settings {
    pub fn new() -> Self {
        Config::builder()
            .set_default("image_folder", "data/images")
            .unwrap()
            .add_source(Environment::default())
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }
}
