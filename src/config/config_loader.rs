use anyhow::Result;

use super::config_model::{Database, DotEnvyConfig, JwtSecret, Payment, Push, Server, Storage};

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let server = Server {
        port: std::env::var("SERVER_PORT")
            .expect("SERVER_PORT is invalid")
            .parse()?,
        body_limit: std::env::var("SERVER_BODY_LIMIT")
            .expect("SERVER_BODY_LIMIT is invalid")
            .parse()?,
        timeout: std::env::var("SERVER_TIMEOUT")
            .expect("SERVER_TIMEOUT is invalid")
            .parse()?,
    };

    let database = Database {
        url: std::env::var("DATABASE_URL").expect("DATABASE_URL is invalid"),
    };

    let payment = Payment {
        base_url: std::env::var("RAZORPAY_BASE_URL")
            .unwrap_or_else(|_| "https://api.razorpay.com".to_string()),
        key_id: std::env::var("RAZORPAY_KEY_ID").expect("RAZORPAY_KEY_ID is invalid"),
        key_secret: std::env::var("RAZORPAY_KEY_SECRET").expect("RAZORPAY_KEY_SECRET is invalid"),
    };

    let storage = Storage {
        endpoint: std::env::var("STORAGE_ENDPOINT").expect("STORAGE_ENDPOINT is invalid"),
        region: std::env::var("STORAGE_REGION").unwrap_or_else(|_| "ap-south-1".to_string()),
        bucket: std::env::var("STORAGE_BUCKET").expect("STORAGE_BUCKET is invalid"),
        access_key: std::env::var("STORAGE_ACCESS_KEY").expect("STORAGE_ACCESS_KEY is invalid"),
        secret_key: std::env::var("STORAGE_SECRET_KEY").expect("STORAGE_SECRET_KEY is invalid"),
        public_base_url: std::env::var("STORAGE_PUBLIC_BASE_URL")
            .expect("STORAGE_PUBLIC_BASE_URL is invalid"),
    };

    let push = Push {
        endpoint: std::env::var("PUSH_ENDPOINT")
            .unwrap_or_else(|_| "https://exp.host/--/api/v2/push/send".to_string()),
    };

    Ok(DotEnvyConfig {
        server,
        database,
        payment,
        storage,
        push,
    })
}

pub fn get_jwt_secret() -> Result<JwtSecret> {
    dotenvy::dotenv().ok();

    Ok(JwtSecret {
        secret: std::env::var("JWT_SECRET").expect("JWT_SECRET is invalid"),
    })
}
