#![allow(dead_code)]

use once_cell::sync::Lazy;
use tokio::sync::Mutex;
use tunables::services::logger::{LogLevel, Logger};

pub static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

pub fn quiet_logger() -> Logger {
    Logger::with_level("test", LogLevel::Error)
}

pub fn restore_env(key: &str, previous: Option<String>) {
    match previous {
        Some(value) => std::env::set_var(key, value),
        None => std::env::remove_var(key),
    }
}
