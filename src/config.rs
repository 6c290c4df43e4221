use dotenvy::var;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub pool_size: u32,
    pub allowed_origin: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let database_url = var("DATABASE_URL").expect("DATABASE_URL must be set");
        let pool_size = var("DATABASE_POOL_SIZE")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(20);
        let host = var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = var("SERVER_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(5000);
        let allowed_origin =
            var("CORS_ALLOWED_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());
        Self {
            host,
            port,
            database_url,
            pool_size,
            allowed_origin,
        }
    }
}

/// Turns stored image keys into URLs clients can fetch.
#[derive(Clone, Debug)]
pub struct AssetConfig {
    pub base_url: String,
    pub default_restaurant_image: String,
}

impl AssetConfig {
    pub fn from_env() -> Self {
        let base_url =
            var("ASSET_BASE_URL").unwrap_or_else(|_| "http://localhost:5000/uploads".to_string());
        let default_restaurant_image = var("DEFAULT_RESTAURANT_IMAGE")
            .unwrap_or_else(|_| "http://localhost:3000/default-restaurant.png".to_string());
        Self {
            base_url,
            default_restaurant_image,
        }
    }

    /// Absolute URLs are returned unchanged, bare keys are joined onto
    /// `base_url`.
    pub fn url_for(&self, key: &str) -> String {
        if key.starts_with("http://") || key.starts_with("https://") {
            return key.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            key.trim_start_matches('/')
        )
    }
}

/// Admin account created at start-up when both email and password are set.
#[derive(Clone, Debug)]
pub struct BootstrapAdmin {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl BootstrapAdmin {
    pub fn from_env() -> Option<Self> {
        let email = var("BOOTSTRAP_ADMIN_EMAIL").ok().filter(|v| !v.trim().is_empty())?;
        let password = var("BOOTSTRAP_ADMIN_PASSWORD").ok().filter(|v| !v.is_empty())?;
        let name = var("BOOTSTRAP_ADMIN_NAME").unwrap_or_else(|_| "Administrator".to_string());
        Some(Self {
            name,
            email,
            password,
        })
    }
}
