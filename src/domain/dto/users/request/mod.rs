pub mod create_user;
pub mod auth_request;
pub mod subscription_query;

pub use create_user::CreateUserRequest;
pub use auth_request::{AvatarRequest, LocalLoginRequest, SetPasswordRequest};
pub use subscription_query::RecipesLimitQuery;
