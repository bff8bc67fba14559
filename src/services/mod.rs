// Services layer - Business logic and orchestration
pub mod access_guard;
pub mod auth_service;
pub mod complaint_service;
pub mod lifecycle;
pub mod token_service;
pub mod user_admin_service;

pub use access_guard::AccessGuard;
pub use auth_service::AuthService;
pub use complaint_service::{AssigneeUpdate, ComplaintService};
pub use lifecycle::Lifecycle;
pub use token_service::{Claims, TokenService};
pub use user_admin_service::UserAdminService;
