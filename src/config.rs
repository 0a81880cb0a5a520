/// The default stylesheet matches the one the dashboard was designed against.
pub const DEFAULT_STYLESHEET: &str = "https://codepen.io/chriddyp/pen/bWLwgP.css";

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub artifact_path: String,
    pub stylesheet_url: String,
    pub debug: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(8050),
            artifact_path: std::env::var("ARTIFACT_PATH")
                .unwrap_or_else(|_| "seasonality-web-app-data.json".to_string()),
            stylesheet_url: std::env::var("STYLESHEET_URL")
                .unwrap_or_else(|_| DEFAULT_STYLESHEET.to_string()),
            debug: std::env::var("DEBUG")
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
