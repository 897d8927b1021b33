//! Application services - the operations exposed to the delivery layer.

mod auth;
mod authorization;
mod blog;

pub use auth::{AuthService, IssuedToken, NewUser};
pub use authorization::authorize_owner_action;
pub use blog::BlogService;
