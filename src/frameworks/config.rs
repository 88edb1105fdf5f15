use std::{env, time::Duration};

// Runtime/server constants (not gameplay tuning).

pub fn http_port() -> u16 {
    env::var("MUSEUM_SERVER_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3001)
}

pub fn critique_service_url() -> String {
    env::var("CRITIQUE_SERVICE_URL").unwrap_or_else(|_| "http://127.0.0.1:11434".to_string())
}

pub fn critique_model() -> String {
    env::var("CRITIQUE_MODEL").unwrap_or_else(|_| "llama3".to_string())
}

pub fn critique_timeout() -> Duration {
    let millis = env::var("CRITIQUE_TIMEOUT_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(30_000);
    Duration::from_millis(millis)
}

pub fn quota_file_path() -> String {
    env::var("CRITIQUE_QUOTA_FILE").unwrap_or_else(|_| "data/critique_quota.json".to_string())
}

pub fn user_name() -> String {
    env::var("MUSEUM_USER_NAME").unwrap_or_else(|_| "Curator".to_string())
}

pub fn starting_balance() -> i64 {
    env::var("MUSEUM_STARTING_BALANCE")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(100_000_000)
}

pub fn rng_seed() -> u64 {
    env::var("MUSEUM_RNG_SEED")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
}

pub const INPUT_CHANNEL_CAPACITY: usize = 1024;
pub const HALL_BROADCAST_CAPACITY: usize = 128;
pub const EVENT_BROADCAST_CAPACITY: usize = 256;

pub const TICK_INTERVAL: Duration = Duration::from_millis(1000 / 60);
pub const DAILY_CRITIQUE_SAMPLE: usize = 3;
