use anyhow::{anyhow, Context, Result};
use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    /// Bearer token the SMS gateway presents on every request.
    pub api_token: String,
    pub port: u16,
    /// Exposes the telegram simulator endpoint.
    pub enable_simulator: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let database_url =
            env::var("DATABASE_URL").context("DATABASE_URL environment variable is required")?;
        let api_token =
            env::var("API_TOKEN").context("API_TOKEN environment variable is required")?;
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8080);
        let enable_simulator = env::var("ENABLE_SIMULATOR")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        if api_token.trim().is_empty() {
            return Err(anyhow!("API_TOKEN must not be empty"));
        }

        Ok(Self {
            database_url,
            api_token,
            port,
            enable_simulator,
        })
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}

#[cfg(test)]
mod tests {
    use super::parse_flag;

    #[test]
    fn flags() {
        assert!(parse_flag("1"));
        assert!(parse_flag(" TRUE "));
        assert!(parse_flag("yes"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag(""));
        assert!(!parse_flag("off"));
    }
}
