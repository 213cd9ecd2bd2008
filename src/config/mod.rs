use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub upstream_api_url: String,
    pub upstream_api_token: Option<String>,
    pub upstream_timeout_ms: u64,
    pub orders_page_size: u32,
    pub jwt_secret: String,
    pub error_display_ms: u64,
    pub login_path: String,
    pub frontend_url: String,
    pub tls_cert_path: Option<String>,
    pub tls_key_path: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            host: env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("BACKEND_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            upstream_api_url: env::var("UPSTREAM_API_URL")
                .unwrap_or_else(|_| "http://localhost:8090".to_string()),
            upstream_api_token: env::var("UPSTREAM_API_TOKEN")
                .ok()
                .filter(|t| !t.is_empty()),
            upstream_timeout_ms: env::var("UPSTREAM_TIMEOUT_MS")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .unwrap_or(5000),
            orders_page_size: env::var("ORDERS_PAGE_SIZE")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .unwrap_or(1000),
            jwt_secret: env::var("JWT_SECRET")?,
            error_display_ms: env::var("ERROR_DISPLAY_MS")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            login_path: env::var("LOGIN_PATH").unwrap_or_else(|_| "/login".to_string()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "https://localhost:5173".to_string()),
            tls_cert_path: env::var("TLS_CERT_PATH").ok(),
            tls_key_path: env::var("TLS_KEY_PATH").ok(),
        })
    }

    /// Configuration for tests and local tooling: defaults everywhere, with
    /// the given secret and upstream URL.
    pub fn for_tests(jwt_secret: &str, upstream_api_url: &str) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            upstream_api_url: upstream_api_url.to_string(),
            upstream_api_token: None,
            upstream_timeout_ms: 5000,
            orders_page_size: 1000,
            jwt_secret: jwt_secret.to_string(),
            error_display_ms: 3000,
            login_path: "/login".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            tls_cert_path: None,
            tls_key_path: None,
        }
    }

    /// Both TLS paths, when HTTPS is configured.
    pub fn tls_paths(&self) -> Option<(&str, &str)> {
        match (&self.tls_cert_path, &self.tls_key_path) {
            (Some(cert), Some(key)) => Some((cert.as_str(), key.as_str())),
            _ => None,
        }
    }
}
