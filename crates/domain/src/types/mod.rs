//! Domain types and models

pub mod auth;
pub mod user;

pub use auth::{
    ErrorBody, GoogleLoginResponse, LoginRequest, LoginResponse, ProfileImage, RefreshResponse,
    RegisterResponse, RegistrationForm,
};
pub use user::UserProfile;
