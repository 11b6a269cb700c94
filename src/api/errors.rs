use crate::store::StoreError;

#[derive(Responder, Debug)]
pub enum Error {
    #[response(status = 401)]
    Unauthorized(String),
    #[response(status = 500)]
    InternalServer(String),
}

impl From<StoreError> for Error {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Unauthenticated => Error::Unauthorized(e.to_string()),
            // already logged by the store, keep database details out of the response
            StoreError::Storage(_) => Error::InternalServer("Storage failure".to_string()),
        }
    }
}
