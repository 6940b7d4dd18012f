//! GraphQL surface over the credential service.

pub mod auth;

use std::sync::Arc;

use async_graphql::{EmptySubscription, Schema};

use crate::auth::service::CredentialService;

pub type AppSchema = Schema<auth::AuthQuery, auth::AuthMutation, EmptySubscription>;

pub fn build_schema(service: Arc<CredentialService>) -> AppSchema {
    Schema::build(
        auth::AuthQuery::default(),
        auth::AuthMutation::default(),
        EmptySubscription,
    )
    .data(service)
    .finish()
}
