use std::env;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DB_NAME: &str = "employee_monitoring";

/// Runtime configuration, read once at startup from the environment
/// (a `.env` file is honoured when present).
#[derive(Debug, Clone)]
pub struct Config {
    pub mongo_uri: String,
    pub db_name: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_vars(
            env::var("MONGO_URI").ok(),
            env::var("PORT").ok(),
            env::var("MONGO_DB").ok(),
        )
    }

    fn from_vars(
        mongo_uri: Option<String>,
        port: Option<String>,
        db_name: Option<String>,
    ) -> Result<Self, String> {
        let mongo_uri =
            mongo_uri.ok_or_else(|| String::from("MONGO_URI is not defined in the environment"))?;

        let port = port
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let db_name = db_name.unwrap_or_else(|| String::from(DEFAULT_DB_NAME));

        Ok(Config {
            mongo_uri,
            db_name,
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uri() -> Option<String> {
        Some(String::from("mongodb://localhost:27017"))
    }

    #[test]
    fn missing_mongo_uri_is_an_error() {
        assert!(Config::from_vars(None, None, None).is_err());
    }

    #[test]
    fn port_and_db_name_fall_back_to_defaults() {
        let config = Config::from_vars(uri(), None, None).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.db_name, DEFAULT_DB_NAME);

        let config = Config::from_vars(uri(), Some("not-a-port".into()), None).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn explicit_values_win() {
        let config =
            Config::from_vars(uri(), Some("8081".into()), Some("monitor_db".into())).unwrap();
        assert_eq!(config.port, 8081);
        assert_eq!(config.db_name, "monitor_db");
    }
}
