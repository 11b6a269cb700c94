use std::collections::HashMap;

use rocket::{
    figment::Figment,
    serde::{Deserialize, Serialize},
};

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct Config {
    /// API token -> GitHub user id
    #[serde(default)]
    pub tokens: HashMap<String, String>,
}

pub fn config_provider() -> Figment {
    use rocket::figment::providers::{Env, Serialized};

    Figment::from(Serialized::defaults(Config::default()))
        .merge(rocket::Config::figment())
        .merge(Env::prefixed("BOOKMARK_").global())
}

pub fn get_database_url() -> String {
    config_provider()
        .extract_inner("databases.main.url")
        .expect("databases.main.url must be set")
}
