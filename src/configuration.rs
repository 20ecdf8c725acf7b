use config::ConfigError;

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub application: ApplicationSettings,
    pub auth: AuthSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    pub port: u16,
    /// Deployment platform; destructive admin endpoints are only enabled
    /// when this is "dev".
    pub platform: String,
}

#[derive(serde::Deserialize, Clone)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: String,
    pub port: u16,
    pub host: String,
    pub database_name: String,
}

impl DatabaseSettings {
    pub fn connection_string(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database_name
        )
    }

    pub fn connection_string_without_db(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}",
            self.username, self.password, self.host, self.port
        )
    }
}

/// Token signing and lifetime settings.
///
/// `secret` is loaded once at startup and never mutated; rotating it
/// invalidates every outstanding access token.
#[derive(serde::Deserialize, Clone)]
pub struct AuthSettings {
    pub secret: String,
    pub issuer: String,
    pub access_token_expiry: i64,  // seconds (3600 = 1 hour)
    pub refresh_token_expiry: i64, // seconds (5184000 = 60 days)
}

pub fn get_configuration() -> Result<Settings, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("configuration").required(false))
        // CHIRPY__AUTH__SECRET=... overrides auth.secret, etc.
        .add_source(config::Environment::with_prefix("CHIRPY").separator("__"))
        .build()?;
    settings.try_deserialize::<Settings>()
}
