//! Credential service: PBKDF2 password hashing, JWT sealing and a user store
//! contract, served over REST and GraphQL.

pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod graphql;
pub mod state;
