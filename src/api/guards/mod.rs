use std::collections::HashMap;

use rocket::http::Status;
use rocket::request::{FromRequest, Outcome, Request};
use tracing::debug;

use crate::api::errors::Error;
use crate::store::UserId;

/// Resolves the caller of a request to the user id of the identity provider.
pub trait Authenticator: Send + Sync + 'static {
    fn resolve(&self, request: &Request<'_>) -> Option<UserId>;
}

/// The authenticator managed by rocket.
pub type SharedAuthenticator = Box<dyn Authenticator>;

/// Looks up `Authorization: Bearer <token>` (or a bare token) in a fixed
/// token table. Tokens mapped to an empty user id are ignored.
pub struct TokenAuthenticator {
    tokens: HashMap<String, UserId>,
}

impl TokenAuthenticator {
    pub fn new(tokens: HashMap<String, String>) -> Self {
        Self {
            tokens: tokens
                .into_iter()
                .filter(|(_, user)| !user.is_empty())
                .map(|(token, user)| (token, UserId::new(user)))
                .collect(),
        }
    }
}

impl Authenticator for TokenAuthenticator {
    fn resolve(&self, request: &Request<'_>) -> Option<UserId> {
        let header = request.headers().get_one("Authorization")?;
        let token = header.strip_prefix("Bearer ").unwrap_or(header).trim();
        self.tokens.get(token).cloned()
    }
}

/// Who is calling. Anonymous callers get `Identity(None)`; operations that
/// need a user reject them.
#[derive(Debug)]
pub struct Identity(pub Option<UserId>);

impl Identity {
    pub fn user(&self) -> Option<&UserId> {
        self.0.as_ref()
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Identity {
    type Error = Error;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let Some(authenticator) = request.rocket().state::<SharedAuthenticator>() else {
            return Outcome::Error((
                Status::InternalServerError,
                Error::InternalServer("Missing Authenticator".to_string()),
            ));
        };

        let user = authenticator.resolve(request);
        match &user {
            Some(user) => debug!(%user, "authenticated request"),
            None => debug!("anonymous request"),
        }
        Outcome::Success(Identity(user))
    }
}

/// An identified caller. Anonymous requests are turned away with 401 before
/// any later guard (e.g. a pooled connection) runs.
#[derive(Debug)]
pub struct Authenticated(pub UserId);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Authenticated {
    type Error = Error;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        match request.guard::<Identity>().await {
            Outcome::Success(Identity(Some(user))) if !user.is_empty() => {
                Outcome::Success(Authenticated(user))
            }
            Outcome::Success(_) => Outcome::Error((
                Status::Unauthorized,
                Error::Unauthorized("no authenticated user".to_string()),
            )),
            Outcome::Error(e) => Outcome::Error(e),
            Outcome::Forward(status) => Outcome::Forward(status),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::utils::rand::rand_str;

    use super::*;

    use rocket::http::Header;
    use rocket::local::blocking;

    #[get("/")]
    fn whoami(identity: Identity) -> String {
        identity
            .user()
            .map(|user| user.to_string())
            .unwrap_or_default()
    }

    #[get("/private")]
    fn private(user: Authenticated) -> String {
        user.0.to_string()
    }

    fn test_client(tokens: HashMap<String, String>) -> blocking::Client {
        let authenticator: SharedAuthenticator = Box::new(TokenAuthenticator::new(tokens));
        let app = rocket::build()
            .manage(authenticator)
            .mount("/", routes![whoami, private]);
        blocking::Client::tracked(app).expect("valid rocket instance")
    }

    #[test]
    fn test_without_authenticator() {
        let app = rocket::build().mount("/", routes![whoami]);
        let client = blocking::Client::tracked(app).expect("valid rocket instance");
        let response = client.get(uri!(whoami)).dispatch();
        assert_eq!(response.status(), Status::InternalServerError);
    }

    #[test]
    fn test_anonymous() {
        let client = test_client(HashMap::new());
        let response = client.get(uri!(whoami)).dispatch();
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.into_string().unwrap(), "");
    }

    #[test]
    fn test_token_resolves_user() {
        let token = rand_str(32);
        let client = test_client(HashMap::from([(token.clone(), "alice".to_string())]));

        let response = client
            .get(uri!(whoami))
            .header(Header::new("Authorization", format!("Bearer {}", token)))
            .dispatch();
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.into_string().unwrap(), "alice");

        let response = client
            .get(uri!(whoami))
            .header(Header::new("Authorization", token))
            .dispatch();
        assert_eq!(response.into_string().unwrap(), "alice");
    }

    #[test]
    fn test_unknown_token_is_anonymous() {
        let client = test_client(HashMap::from([(rand_str(32), "alice".to_string())]));

        let response = client
            .get(uri!(whoami))
            .header(Header::new("Authorization", format!("Bearer {}", rand_str(32))))
            .dispatch();
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.into_string().unwrap(), "");
    }

    #[test]
    fn test_empty_user_is_anonymous() {
        let token = rand_str(32);
        let client = test_client(HashMap::from([(token.clone(), String::new())]));

        let response = client
            .get(uri!(whoami))
            .header(Header::new("Authorization", format!("Bearer {}", token)))
            .dispatch();
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.into_string().unwrap(), "");

        let response = client
            .get(uri!(private))
            .header(Header::new("Authorization", format!("Bearer {}", token)))
            .dispatch();
        assert_eq!(response.status(), Status::Unauthorized);
    }

    #[test]
    fn test_authenticated_guard() {
        let token = rand_str(32);
        let client = test_client(HashMap::from([(token.clone(), "alice".to_string())]));

        let response = client.get(uri!(private)).dispatch();
        assert_eq!(response.status(), Status::Unauthorized);

        let response = client
            .get(uri!(private))
            .header(Header::new("Authorization", format!("Bearer {}", token)))
            .dispatch();
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.into_string().unwrap(), "alice");
    }
}
