//! Request gates.
//!
//! - [`auth`]: the role-gated token [`Authenticator`](auth::Authenticator)
//!   and the [`AuthUser`](auth::AuthUser) identity it attaches
//! - [`ownership`]: tenant access check for `/schools/{school_id}/...` routes
//!
//! Gates are applied per route group in [`crate::router`]:
//!
//! ```ignore
//! let staff = Authenticator::new(state.jwt_config.clone(), &[Role::Admin, Role::SuperAdmin]);
//!
//! init_classes_router()
//!     .route_layer(middleware::from_fn_with_state(state.clone(), ensure_school_access))
//!     .route_layer(middleware::from_fn_with_state(staff, require_auth));
//! ```
//!
//! The last `route_layer` runs first, so the token is checked before the
//! tenant lookup touches the database.

pub mod auth;
pub mod ownership;
