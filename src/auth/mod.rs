pub mod config;
pub mod extractors;
pub mod guard;
pub mod middleware;
pub mod password;
pub mod principal;
pub mod token;

pub use config::JwtConfig;
pub use extractors::{AdminIdentity, CustomerIdentity, IdentityExtractor, OwnerIdentity};
pub use guard::{authenticate, authorize, AuthError, RequiredRole, TokenSource};
pub use middleware::AuthLayer;
pub use principal::Identity;
pub use token::{issue_token, verify_token, TokenError};
