use std::sync::Arc;

use crate::auth::service::CredentialService;
use crate::graphql::{build_schema, AppSchema};

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CredentialService>,
    pub schema: AppSchema,
}

impl AppState {
    pub fn new(service: Arc<CredentialService>) -> Self {
        let schema = build_schema(service.clone());
        Self { service, schema }
    }
}
