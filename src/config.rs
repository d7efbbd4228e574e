use std::net::SocketAddr;

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub endpoint: String,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
    /// Base under which uploaded objects are publicly reachable.
    pub public_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub listen_addr: SocketAddr,
    pub database_url: String,
    pub jwt: JwtConfig,
    pub storage: StorageConfig,
    pub max_upload_bytes: usize,
}

const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).with_context(|| format!("{key} must be set"));

        let host = lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = lookup("APP_PORT").unwrap_or_else(|| "8080".into());
        let listen_addr: SocketAddr = format!("{host}:{port}")
            .parse()
            .with_context(|| format!("APP_HOST/APP_PORT do not form an address: {host}:{port}"))?;

        let database_url = required("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: required("JWT_SECRET")?,
            issuer: lookup("JWT_ISSUER").unwrap_or_else(|| "foodshare".into()),
            audience: lookup("JWT_AUDIENCE").unwrap_or_else(|| "foodshare-clients".into()),
            ttl_minutes: lookup("JWT_TTL_MINUTES")
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
        };

        let endpoint = required("STORAGE_ENDPOINT")?;
        let bucket = required("STORAGE_BUCKET")?;
        let public_url = lookup("STORAGE_PUBLIC_URL")
            .unwrap_or_else(|| format!("{}/{}", endpoint.trim_end_matches('/'), bucket));
        let storage = StorageConfig {
            access_key: required("STORAGE_ACCESS_KEY")?,
            secret_key: required("STORAGE_SECRET_KEY")?,
            region: lookup("STORAGE_REGION").unwrap_or_else(|| "us-east-1".into()),
            endpoint,
            bucket,
            public_url,
        };

        let max_upload_bytes = match lookup("MAX_UPLOAD_BYTES") {
            Some(v) => v
                .parse::<usize>()
                .with_context(|| format!("MAX_UPLOAD_BYTES is not a byte count: {v}"))?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Self {
            listen_addr,
            database_url,
            jwt,
            storage,
            max_upload_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_vars() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("DATABASE_URL", "postgres://localhost/foodshare"),
            ("JWT_SECRET", "secret"),
            ("STORAGE_ENDPOINT", "http://minio:9000/"),
            ("STORAGE_BUCKET", "videos"),
            ("STORAGE_ACCESS_KEY", "ak"),
            ("STORAGE_SECRET_KEY", "sk"),
        ])
    }

    fn load(vars: &HashMap<&'static str, &'static str>) -> anyhow::Result<AppConfig> {
        AppConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()))
    }

    #[test]
    fn applies_defaults() {
        let cfg = load(&base_vars()).expect("config should load");
        assert_eq!(cfg.jwt.issuer, "foodshare");
        assert_eq!(cfg.jwt.audience, "foodshare-clients");
        assert_eq!(cfg.jwt.ttl_minutes, 60);
        assert_eq!(cfg.storage.region, "us-east-1");
        assert_eq!(cfg.storage.public_url, "http://minio:9000/videos");
        assert_eq!(cfg.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(cfg.listen_addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn reads_listen_address() {
        let mut vars = base_vars();
        vars.insert("APP_HOST", "127.0.0.1");
        vars.insert("APP_PORT", "9090");
        let cfg = load(&vars).expect("config should load");
        assert_eq!(cfg.listen_addr, "127.0.0.1:9090".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn rejects_bad_port() {
        let mut vars = base_vars();
        vars.insert("APP_PORT", "eighty");
        let err = load(&vars).unwrap_err();
        assert!(err.to_string().contains("APP_PORT"));
    }

    #[test]
    fn explicit_public_url_wins() {
        let mut vars = base_vars();
        vars.insert("STORAGE_PUBLIC_URL", "https://cdn.example.com");
        vars.insert("MAX_UPLOAD_BYTES", "1024");
        let cfg = load(&vars).expect("config should load");
        assert_eq!(cfg.storage.public_url, "https://cdn.example.com");
        assert_eq!(cfg.max_upload_bytes, 1024);
    }

    #[test]
    fn missing_required_variable_is_named() {
        let mut vars = base_vars();
        vars.remove("JWT_SECRET");
        let err = load(&vars).unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));
    }

    #[test]
    fn rejects_non_numeric_upload_limit() {
        let mut vars = base_vars();
        vars.insert("MAX_UPLOAD_BYTES", "lots");
        assert!(load(&vars).is_err());
    }
}
