use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub auth_role: String,
    pub login_path: String,
    pub request_timeout_secs: u64,
    pub refresh_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            api_base_url: env::var("API_BASE_URL")
                .expect("API_BASE_URL must be set"),
            auth_role: env::var("AUTH_ROLE")
                .unwrap_or_else(|_| "admin".to_string()),
            login_path: env::var("LOGIN_PATH")
                .unwrap_or_else(|_| "/login".to_string()),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .expect("REQUEST_TIMEOUT_SECS must be a number"),
            refresh_timeout_secs: env::var("REFRESH_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .expect("REFRESH_TIMEOUT_SECS must be a number"),
        }
    }

    /// Config pointing at the given API base URL, with defaults for the rest.
    pub fn for_base_url(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            auth_role: "admin".to_string(),
            login_path: "/login".to_string(),
            request_timeout_secs: 30,
            refresh_timeout_secs: 10,
        }
    }

    pub fn auth_path(&self, action: &str) -> String {
        format!("/auth/{}/{}", self.auth_role, action)
    }
}
