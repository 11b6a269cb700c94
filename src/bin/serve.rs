#[macro_use]
extern crate rocket;

#[launch]
#[cfg(not(tarpaulin_include))]
async fn rocket() -> _ {
    bookmark_service::rocket().await
}
