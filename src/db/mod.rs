// ORM Schema
pub mod schema;

// ORM Models
pub mod bookmark;

// Driver
pub mod connection;
