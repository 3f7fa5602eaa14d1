use clap::Parser;

use crate::fibonacci::{DEFAULT_MAX_N, U64_MAX_N};

#[derive(Parser, Debug, Clone)]
#[command(name = "fib-probe", about = "Recursive Fibonacci probe for measuring platform execution limits")]
pub struct Config {
    /// address to bind, e.g. 0.0.0.0:8080
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind: String,

    /// largest accepted n
    #[arg(long, env = "FIB_MAX_N", default_value_t = DEFAULT_MAX_N,
          value_parser = clap::value_parser!(u32).range(0..=U64_MAX_N as i64))]
    pub max_n: u32,

    /// when set, requests must send a matching x-api-key header
    #[arg(long, env = "INTERNAL_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

/// Per-process state shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub max_n: u32,
    pub api_key: Option<String>,
    pub instance_id: String,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_n: config.max_n,
            // an empty key would otherwise match requests without the header
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
            instance_id: instance_id(),
        }
    }
}

/// Machine hostname, then `HOSTNAME`, then `unknown`.
pub fn hostname() -> String {
    gethostname::gethostname()
        .into_string()
        .ok()
        .filter(|h| !h.is_empty())
        .or_else(|| std::env::var("HOSTNAME").ok().filter(|h| !h.is_empty()))
        .unwrap_or_else(|| "unknown".to_string())
}

/// `<hostname>-<pid>`, fixed for the life of the process.
pub fn instance_id() -> String {
    format!("{}-{}", hostname(), std::process::id())
}
