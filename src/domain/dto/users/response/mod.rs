pub mod user_response;

pub use user_response::{AvatarResponse, CreateUserResponse, SubscriptionResponse, UserResponse};
