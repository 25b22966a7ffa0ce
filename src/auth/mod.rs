// Authentication module
// Provides registration, sign-in with signed bearer tokens, and the bearer middleware

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use error::AuthError;
pub use handlers::{sign_in_handler, sign_up_handler};
pub use middleware::{require_bearer, AuthenticatedUser};
pub use models::{SignInRequest, SignUpRequest, TokenResponse, User};
pub use password::{Argon2PasswordService, PasswordService};
pub use repository::{PgUserStore, UserStore};
pub use service::{AuthService, AuthServiceImpl};
pub use token::{Claims, TokenService};
