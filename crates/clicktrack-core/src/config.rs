#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_dir: String,
    /// Public origin of the tracker, used to build example URLs in the UI.
    pub base_url: String,
    pub debug: bool,
    pub duckdb_memory_limit: String,
    /// Empty means any origin may call the JSON API.
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            port: std::env::var("CLICKTRACK_PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .map_err(|e| format!("invalid port: {e}"))?,
            data_dir: std::env::var("CLICKTRACK_DATA_DIR")
                .unwrap_or_else(|_| "./data".to_string()),
            base_url: std::env::var("CLICKTRACK_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            debug: std::env::var("CLICKTRACK_DEBUG")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            duckdb_memory_limit: std::env::var("CLICKTRACK_DUCKDB_MEMORY")
                .unwrap_or_else(|_| "1GB".to_string()),
            cors_origins: std::env::var("CLICKTRACK_CORS_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        })
    }

    /// Path of the DuckDB file inside `data_dir`.
    pub fn database_path(&self) -> String {
        format!("{}/clicktrack.db", self.data_dir)
    }
}
