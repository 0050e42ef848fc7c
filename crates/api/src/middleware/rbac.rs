//! Extractors enforcing the role policy of `minicrm_core::authorization`.
//!
//! Each route names the operation it performs through a marker type in
//! [`perm`]; [`Authorized`] authenticates the caller and consults
//! [`minicrm_core::authorization::authorize`] before the handler (and its
//! body extractor) runs, so a denied request is a 403 regardless of payload.

use std::marker::PhantomData;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use minicrm_core::authorization::Operation;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// A route-level operation, named by a zero-sized marker type.
pub trait Permission: Send + Sync + 'static {
    const OPERATION: Operation;
}

/// An [`AuthUser`] the policy allows to perform `P::OPERATION`.
///
/// ```ignore
/// async fn update(auth: Authorized<perm::ClientUpdate>, ...) -> AppResult<...> {
///     tracing::info!(user_id = auth.user.user_id, "updating client");
/// }
/// ```
pub struct Authorized<P: Permission> {
    pub user: AuthUser,
    _permission: PhantomData<P>,
}

impl<P: Permission> FromRequestParts<AppState> for Authorized<P> {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        user.require(P::OPERATION)?;
        Ok(Authorized {
            user,
            _permission: PhantomData,
        })
    }
}

/// Any authenticated caller, whatever the role.
///
/// Functionally equivalent to [`AuthUser`] but named explicitly for routes
/// that are not tied to a resource.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}

/// Marker types for every guarded route operation.
pub mod perm {
    use minicrm_core::authorization::{Action, Operation, Resource};

    use super::Permission;

    macro_rules! permissions {
        ($($name:ident => ($resource:ident, $action:ident),)*) => {
            $(
                pub struct $name;

                impl Permission for $name {
                    const OPERATION: Operation = Operation::new(Resource::$resource, Action::$action);
                }
            )*
        };
    }

    permissions! {
        ClientRead => (Client, Read),
        ClientCreate => (Client, Create),
        ClientUpdate => (Client, Update),
        ClientDelete => (Client, Delete),
        ContractRead => (Contract, Read),
        ContractCreate => (Contract, Create),
        ContractUpdate => (Contract, Update),
        ContractDelete => (Contract, Delete),
        ServiceRead => (Service, Read),
        ServiceCreate => (Service, Create),
        ServiceUpdate => (Service, Update),
        ServiceDelete => (Service, Delete),
        DossierRead => (Dossier, Read),
        DossierCreate => (Dossier, Create),
        DossierUpdate => (Dossier, Update),
        DossierDelete => (Dossier, Delete),
        ActivityRead => (Activity, Read),
        UserRead => (User, Read),
        UserCreate => (User, Create),
        UserUpdate => (User, Update),
    }
}
