use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Studio identity printed on every assembled invoice.
    pub studio_name: String,
    pub business_details: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let studio_name = env::var("STUDIO_NAME").unwrap_or_else(|_| "Taj Studio".to_string());
        let business_details = env::var("STUDIO_BUSINESS_DETAILS")
            .unwrap_or_else(|_| "Badwani & Indore\n+91 7415856921".to_string());
        Ok(Self {
            port,
            database_url,
            host,
            studio_name,
            business_details,
        })
    }
}
