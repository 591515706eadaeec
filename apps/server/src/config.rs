use std::{net::SocketAddr, time::Duration};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("KP_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid KP_LISTEN_ADDR: {}", e))?;
        let db_path = std::env::var("KP_DB_PATH").unwrap_or_else(|_| "./db/app.db".into());
        let cors_allow = std::env::var("KP_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let request_timeout =
            parse_request_timeout(std::env::var("KP_REQUEST_TIMEOUT_MS").ok().as_deref())?;
        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout,
        })
    }
}

/// Milliseconds from `KP_REQUEST_TIMEOUT_MS`, 30s when unset.
fn parse_request_timeout(raw: Option<&str>) -> anyhow::Result<Duration> {
    let timeout_ms: u64 = raw
        .unwrap_or("30000")
        .trim()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid KP_REQUEST_TIMEOUT_MS: {}", e))?;
    Ok(Duration::from_millis(timeout_ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_timeout_defaults_when_unset() {
        assert_eq!(parse_request_timeout(None).unwrap(), Duration::from_secs(30));
        assert_eq!(
            parse_request_timeout(Some("2500")).unwrap(),
            Duration::from_millis(2500)
        );
    }

    #[test]
    fn malformed_request_timeout_is_an_error() {
        for raw in ["30s", "", "-1"] {
            let err = parse_request_timeout(Some(raw)).unwrap_err();
            assert!(err.to_string().contains("KP_REQUEST_TIMEOUT_MS"));
        }
    }
}
