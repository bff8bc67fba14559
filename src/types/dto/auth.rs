use poem_openapi::Object;

use crate::types::dto::users::UserView;

#[derive(Object, Debug)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    /// "student", "staff" or "admin"
    pub role: String,
}

#[derive(Object, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub role: String,
}

#[derive(Object, Debug)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserView,
}

#[derive(Object, Debug)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_new: String,
}
