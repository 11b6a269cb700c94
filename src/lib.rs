#[macro_use]
extern crate rocket;

pub mod api;
pub mod db;
pub mod store;
pub mod utils;

#[cfg(test)]
#[cfg(not(tarpaulin_include))]
#[ctor::ctor]
fn init() {
    crate::utils::logging::setup_console_log();
}

pub(crate) mod misc {
    use rocket::serde::json::Json;
    use utoipa::OpenApi;

    use crate::api::bookmark;

    #[get("/openapi.json")]
    pub fn openapi() -> Json<utoipa::openapi::OpenApi> {
        Json(bookmark::misc::ApiDoc::openapi())
    }

    pub fn docs() -> Vec<rocket::Route> {
        routes![openapi]
    }

}

#[cfg(not(tarpaulin_include))]
pub async fn rocket() -> rocket::Rocket<rocket::Build> {
    use rocket_db_pools::Database;

    use crate::api::configs::{self, Config};
    use crate::api::fairings::db::Db;
    use crate::api::guards::TokenAuthenticator;
    use crate::api::{bookmark, guards};
    use crate::misc;

    crate::utils::logging::setup_console_log();
    crate::db::connection::run_migrations().await;

    let cfg_provider = configs::config_provider();
    let config = cfg_provider
        .extract::<Config>()
        .expect("invalid bookmark service configuration");
    let authenticator: guards::SharedAuthenticator =
        Box::new(TokenAuthenticator::new(config.tokens));

    rocket::custom(cfg_provider)
        .attach(Db::init())
        .manage(authenticator)
        .mount("/bookmark", bookmark::routes())
        .mount("/api-docs", misc::docs())
}
