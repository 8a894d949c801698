#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub server: Server,
    pub database: Database,
    pub payment: Payment,
    pub storage: Storage,
    pub push: Push,
}

#[derive(Debug, Clone)]
pub struct Server {
    pub port: u16,
    pub body_limit: u64,
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct Payment {
    pub base_url: String,
    pub key_id: String,
    pub key_secret: String,
}

#[derive(Debug, Clone)]
pub struct Storage {
    pub endpoint: String,
    pub region: String,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
    pub public_base_url: String,
}

#[derive(Debug, Clone)]
pub struct Push {
    pub endpoint: String,
}

#[derive(Debug, Clone)]
pub struct JwtSecret {
    pub secret: String,
}
