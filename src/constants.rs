pub mod logcollector {
    pub const N_MIN_INPUT_THREADS: i64 = 1;
    pub const OUTPUT_MIN_QUEUE_SIZE: i64 = 128;
}

pub mod debug {
    pub const LEVEL_NONE: i64 = 0;
    pub const LEVEL_FULL: i64 = 2;
}

pub mod flags {
    pub const DISABLED: i64 = 0;
    pub const ENABLED: i64 = 1;
}

pub mod limits {
    pub const UNBOUNDED: i64 = i64::MAX;
    pub const SUGGESTION_LIMIT: usize = 3;
}

pub mod env {
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
}
