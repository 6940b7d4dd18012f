//! Authentication schema and resolvers

use std::sync::Arc;

use async_graphql::{
    Context, ErrorExtensions, InputObject, Object, Result as GraphQLResult, SimpleObject,
};

use crate::auth::{
    dto::{LoginOutcome, PublicUser},
    service::CredentialService,
};

#[derive(SimpleObject, Clone, Debug)]
#[graphql(name = "User")]
pub struct UserObject {
    pub id: i32,
    pub email: String,
    pub biometric_key: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<PublicUser> for UserObject {
    fn from(u: PublicUser) -> Self {
        Self {
            id: u.id,
            email: u.email,
            biometric_key: u.biometric_key,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

#[derive(SimpleObject, Clone, Debug)]
pub struct AuthResponse {
    pub access_token: String,
    /// Same value as `accessToken`, kept for older clients.
    pub token: String,
    pub message: String,
}

impl From<LoginOutcome> for AuthResponse {
    fn from(o: LoginOutcome) -> Self {
        Self {
            token: o.access_token.clone(),
            access_token: o.access_token,
            message: "success".into(),
        }
    }
}

#[derive(InputObject, Debug)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(InputObject, Debug)]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub biometric_key: Option<String>,
}

fn service<'a>(ctx: &Context<'a>) -> GraphQLResult<&'a Arc<CredentialService>> {
    ctx.data::<Arc<CredentialService>>()
}

#[derive(Default)]
pub struct AuthQuery;

#[Object(name = "Query")]
impl AuthQuery {
    async fn get_user(&self, ctx: &Context<'_>, id: i32) -> GraphQLResult<UserObject> {
        let user = service(ctx)?
            .get_user_by_id(id)
            .await
            .map_err(|e| e.extend())?;
        Ok(user.into())
    }
}

#[derive(Default)]
pub struct AuthMutation;

#[Object(name = "Mutation")]
impl AuthMutation {
    async fn register(&self, ctx: &Context<'_>, data: RegisterInput) -> GraphQLResult<UserObject> {
        let user = service(ctx)?
            .register(&data.email, &data.password, data.biometric_key)
            .await
            .map_err(|e| e.extend())?;
        Ok(user.into())
    }

    async fn login(&self, ctx: &Context<'_>, data: LoginInput) -> GraphQLResult<AuthResponse> {
        let outcome = service(ctx)?
            .login_with_password(&data.email, &data.password)
            .await
            .map_err(|e| e.extend())?;
        Ok(outcome.into())
    }

    async fn biometric_login(
        &self,
        ctx: &Context<'_>,
        biometric_key: String,
    ) -> GraphQLResult<AuthResponse> {
        let outcome = service(ctx)?
            .login_with_biometric(&biometric_key)
            .await
            .map_err(|e| e.extend())?;
        Ok(outcome.into())
    }
}
