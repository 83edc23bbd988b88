use anyhow::Result;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:database.sqlite".to_string());

        let port = match env::var("PORT") {
            Ok(value) => value
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid port number, got '{value}'"))?,
            Err(_) => 3000,
        };

        Ok(Config { database_url, port })
    }
}
