use diesel_async::AsyncPgConnection;

use crate::api::configs;

pub async fn establish() -> AsyncPgConnection {
    use diesel_async::AsyncConnection;

    let url = configs::get_database_url();

    let mut conn = AsyncPgConnection::establish(&url)
        .await
        .unwrap_or_else(|_| panic!("Error connecting database"));

    if cfg!(debug_assertions) {
        instrument(&mut conn);
    }

    conn
}

/// Log every statement run on `conn`.
pub fn instrument(conn: &mut AsyncPgConnection) {
    use diesel::connection::InstrumentationEvent;
    use diesel_async::AsyncConnection;

    conn.set_instrumentation(|event: InstrumentationEvent<'_>| match event {
        InstrumentationEvent::StartQuery { query, .. } => {
            tracing::debug!("Executing query: {}", query);
        }
        InstrumentationEvent::FinishQuery { query, error, .. } => match error {
            Some(e) => tracing::error!("Query failed: {}\nError: {:?}", query, e),
            None => tracing::debug!("Executing query succeeded: {}", query),
        },
        _ => {}
    });
}

pub async fn run_migrations() {
    use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
    use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

    const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");
    let conn = establish().await;

    let mut async_wrapper: AsyncConnectionWrapper<AsyncPgConnection> =
        AsyncConnectionWrapper::from(conn);

    tokio::task::spawn_blocking(move || {
        async_wrapper
            .run_pending_migrations(MIGRATIONS)
            .map(|_| ())
            .map_err(|e| e.to_string())
    })
    .await
    .expect("Error running migrations")
    .expect("Error running migrations");
}
