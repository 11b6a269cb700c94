use super::errors::Error;
use super::fairings::db::Db;
use super::guards::Authenticated;
use crate::db;
use crate::store::{BookmarkStore, OwnerId};

use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket_db_pools::Connection;
use tracing::debug;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(crate = "rocket::serde")]
pub struct CreateBookmark {
    /// The URL to bookmark
    pub url: String,
    /// Optional description of the bookmark
    #[serde(default)]
    pub description: String,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Debug)]
#[serde(crate = "rocket::serde")]
pub struct Bookmark {
    pub id: Uuid,
    pub owner: String,
    pub url: String,
    pub note: String,
    #[schema(format = DateTime, value_type=String)]
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: time::OffsetDateTime,
}

impl From<db::bookmark::Bookmark> for Bookmark {
    fn from(m: db::bookmark::Bookmark) -> Self {
        Self {
            id: m.id,
            owner: m.owner,
            url: m.url,
            note: m.note,
            created_at: m.created_at,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(crate = "rocket::serde")]
pub struct Bookmarks {
    pub bookmarks: Vec<Bookmark>,
}

/// Bookmark a URL
#[utoipa::path(
    post,
    path = "/bookmark",
    request_body = CreateBookmark,
    responses(
        (status = 200, description = "Bookmark created success", body = Bookmark),
        (status = 401, description = "Missing or unknown API token")
    ),
    security(
        ("api_key" = [])
    )
)]
#[post("/", format = "application/json", data = "<payload>")]
pub async fn create_bookmark(
    user: Authenticated,
    mut db: Connection<Db>,
    payload: Json<CreateBookmark>,
) -> Result<Json<Bookmark>, Error> {
    let payload = payload.into_inner();
    let m = BookmarkStore::new(&mut **db)
        .create(Some(&user.0), payload.url, payload.description)
        .await?;
    Ok(Json(m.into()))
}

/// List all bookmarks of an owner
#[utoipa::path(
    get,
    path = "/bookmark/{owner}",
    params(
        ("owner" = String, Path, description = "The owner of bookmarks, e.g. `github-octocat`")
    ),
    responses(
        (status = 200, description = "Bookmarks listed success", body = Bookmarks)
    )
)]
#[get("/<owner>")]
pub async fn list_bookmarks(mut db: Connection<Db>, owner: &str) -> Result<Json<Bookmarks>, Error> {
    let rv = BookmarkStore::new(&mut **db)
        .list_by_owner(&OwnerId::from(owner))
        .await?;
    debug!(?rv, "list results");

    Ok(Json(Bookmarks {
        bookmarks: rv.into_iter().map(Bookmark::from).collect(),
    }))
}

/// Delete a bookmark
#[utoipa::path(
    delete,
    path = "/bookmark/{id}",
    params(
        ("id" = String, Path, description = "The bookmark id to be deleted")
    ),
    responses(
        (status = 200, description = "Bookmark deleted, or there was nothing to delete"),
        (status = 401, description = "Missing or unknown API token")
    ),
    security(
        ("api_key" = [])
    )
)]
#[delete("/<id>")]
pub async fn delete_bookmark(
    user: Authenticated,
    mut db: Connection<Db>,
    id: &str,
) -> Result<(), Error> {
    BookmarkStore::new(&mut **db)
        .delete(Some(&user.0), id)
        .await?;
    Ok(())
}

pub fn routes() -> Vec<rocket::Route> {
    routes![create_bookmark, list_bookmarks, delete_bookmark]
}

pub(crate) mod misc {
    use super::*;

    use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
    use utoipa::{Modify, OpenApi};

    struct SecurityAddon;

    impl Modify for SecurityAddon {
        fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
            let components = openapi.components.get_or_insert_with(Default::default);
            components.add_security_scheme(
                "api_key",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }

    #[derive(OpenApi)]
    #[openapi(
        info(
            title = "Bookmarks API",
            description = "Create, list and delete URL bookmarks of GitHub users",
            version = "1.0"
        ),
        paths(create_bookmark, list_bookmarks, delete_bookmark),
        components(schemas(CreateBookmark, Bookmark, Bookmarks)),
        modifiers(&SecurityAddon)
    )]
    pub struct ApiDoc;
}
