use dotenvy::var;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub expiry_secs: u64,
    pub leeway_secs: u64,
    pub cookie_name: String,
    pub cookie_secure: bool,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        let secret = var("JWT_SECRET").expect("JWT_SECRET must be set");
        let issuer = var("JWT_ISSUER").unwrap_or_else(|_| "foodcart-auth".to_string());
        let audience = var("JWT_AUDIENCE").unwrap_or_else(|_| "foodcart".to_string());
        // 1 hour session
        let expiry_secs = var("JWT_EXPIRY_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(60 * 60);
        let leeway_secs = var("JWT_LEEWAY_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);
        let cookie_name = var("AUTH_COOKIE_NAME").unwrap_or_else(|_| "token".to_string());
        let cookie_secure = var("AUTH_COOKIE_SECURE")
            .ok()
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);
        Self {
            secret,
            issuer,
            audience,
            expiry_secs,
            leeway_secs,
            cookie_name,
            cookie_secure,
        }
    }
}
