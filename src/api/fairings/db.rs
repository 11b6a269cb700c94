use diesel_async::{
    pooled_connection::{
        deadpool::{BuildError, Object, Pool, PoolError},
        AsyncDieselConnectionManager,
    },
    AsyncPgConnection,
};
use rocket::figment::Figment;
use rocket_db_pools::{Database, Error};

use crate::db::connection;

pub type InitError = BuildError;
pub type GetError = PoolError;
pub type Connection = AsyncPgConnection;
pub struct BookmarkPool(Pool<Connection>);

const DEFAULT_MAX_CONNECTIONS: usize = 16;

#[rocket::async_trait]
impl rocket_db_pools::Pool for BookmarkPool {
    type Connection = Object<Connection>;

    type Error = Error<InitError, GetError>;

    async fn init(figment: &Figment) -> Result<Self, Self::Error> {
        let url = figment.extract_inner::<String>("url").map_err(Error::Config)?;
        let max_size = figment
            .extract_inner::<usize>("max_connections")
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);

        let manager = AsyncDieselConnectionManager::<Connection>::new(url);
        Pool::builder(manager)
            .max_size(max_size)
            .build()
            .map(Self)
            .map_err(Error::Init)
    }

    async fn get(&self) -> Result<Self::Connection, Self::Error> {
        let mut conn = self.0.get().await.map_err(Error::Get)?;
        connection::instrument(&mut conn);
        Ok(conn)
    }

    async fn close(&self) {
        self.0.close()
    }
}

#[derive(Database)]
#[database("main")]
pub struct Db(BookmarkPool);
