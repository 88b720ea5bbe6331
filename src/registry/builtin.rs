use super::{OptionValue, Registry};
use crate::constants::debug::{LEVEL_FULL, LEVEL_NONE};
use crate::constants::flags::{DISABLED, ENABLED};
use crate::constants::limits::UNBOUNDED;
use crate::constants::logcollector::{N_MIN_INPUT_THREADS, OUTPUT_MIN_QUEUE_SIZE};
use crate::errors::OptionError;
use once_cell::sync::Lazy;

// (name, default, min, max, description)
pub type Entry = (&'static str, OptionValue, OptionValue, OptionValue, &'static str);

const DEBUG_HELP: &str = "Debug level (0: no debug, 1: first level of debug, 2: full debugging).";

const fn debug_level(name: &'static str) -> Entry {
    (name, LEVEL_NONE, LEVEL_NONE, LEVEL_FULL, DEBUG_HELP)
}

const fn switch(name: &'static str, default: OptionValue, description: &'static str) -> Entry {
    (name, default, DISABLED, ENABLED, description)
}

const SYSCHECK: &[Entry] = &[
    ("sleep", 1, 0, 64, "Seconds to sleep after hashing `sleep_after` files, to cap CPU and memory usage."),
    ("sleep_after", 100, 1, 99999, "Number of files hashed between two sleeps."),
    ("rt_delay", 10, 1, 1000, "Delay in milliseconds before dispatching real-time notifications, so temporary files such as editor swaps are skipped."),
    ("max_fd_win_rt", 256, 1, 1024, "Maximum number of directories monitored in real time on Windows."),
    ("max_audit_entries", 256, 1, 4096, "Maximum number of directories monitored for who-data on Linux."),
    ("default_max_depth", 256, 1, 320, "Maximum directory recursion level."),
    ("symlink_scan_interval", 600, 1, 2592000, "Seconds between checks of symbolic links configured in the directories section."),
    ("file_max_size", 1024, 0, 4095, "Maximum file size in MB for computing integrity hashes."),
    debug_level("logging"),
];

const ROOTCHECK: &[Entry] = &[
    ("sleep", 50, 0, 1000, "Milliseconds to sleep per inspected PID or suspicious port."),
];

const SCA: &[Entry] = &[
    ("request_db_interval", 5, 0, 60, "Minutes to wait before resending a scan when the DB integrity check fails."),
    switch("remote_commands", DISABLED, "Accept command checks from policies pushed by the manager. Local policies ignore this option."),
    ("commands_timeout", 30, 1, 300, "Timeout in seconds for commands executed during a scan."),
];

const REMOTE: &[Entry] = &[
    ("recv_counter_flush", 128, 10, 999999, "Received-message counter flush threshold."),
    ("comp_average_printout", 19999, 10, 999999, "Compression averages printout interval."),
    switch("verify_msg_id", DISABLED, "Verify message ids."),
    switch("pass_empty_keyfile", ENABLED, "Keep running when the client keys file is empty."),
    ("sender_pool", 8, 1, 64, "Number of shared file sender threads."),
    ("request_pool", 1024, 1, 4096, "Limit of parallel request dispatchers."),
    ("request_timeout", 10, 1, 600, "Seconds before rejecting a new request."),
    ("response_timeout", 60, 1, 3600, "Seconds to wait for a request response."),
    ("request_rto_sec", 1, 0, 60, "Retransmission timeout, seconds part."),
    ("request_rto_msec", 0, 0, 999, "Retransmission timeout, milliseconds part."),
    ("max_attempts", 4, 1, 16, "Maximum number of sending attempts."),
    ("shared_reload", 10, 1, 18000, "Shared files reloading interval in seconds."),
    ("rlimit_nofile", 65536, 1024, 1048576, "Maximum number of file descriptors the server can open."),
    ("recv_timeout", 1, 1, 60, "Seconds to wait for a client response over TCP."),
    ("send_timeout", 1, 1, 60, "Seconds to wait for a client delivery over TCP."),
    switch("nocmerged", ENABLED, "Merge shared configuration to be broadcast to agents."),
    ("keyupdate_interval", 10, 1, 3600, "Keys file reloading latency in seconds."),
    ("worker_pool", 4, 1, 16, "Number of parallel worker threads."),
    ("state_interval", 5, 0, 86400, "Seconds between status file updates. 0 disables it."),
    switch("guess_agent_group", DISABLED, "Guess the group an agent belongs to."),
    ("group_data_flush", 86400, 0, 2592000, "Minimum seconds between cleanups of residual data from unused groups. 0 never cleans up."),
    ("receive_chunk", 4096, 1024, 16384, "TCP receiving chunk size. Powers of two are suggested."),
    ("buffer_relax", 1, 0, 2, "Network buffer release after use (0: keep, 1: shrink to the receive chunk, 2: free)."),
    ("tcp_keepidle", 30, 1, 7200, "Idle seconds before TCP starts sending keepalive probes."),
    ("tcp_keepintvl", 10, 1, 100, "Seconds between individual keepalive probes."),
    ("tcp_keepcnt", 3, 1, 50, "Keepalive probes sent before dropping the connection."),
    debug_level("logging"),
];

const MAIL: &[Entry] = &[
    switch("strict_checking", ENABLED, "Strict checking of alert mail settings."),
    switch("grouping", ENABLED, "Group several alerts into one mail."),
    switch("full_subject", DISABLED, "Use the full alert description as the mail subject."),
    switch("geoip", ENABLED, "Include GeoIP data in mails."),
];

const AUTH: &[Entry] = &[
    ("timeout_sec", 1, 0, UNBOUNDED, "Enrollment socket timeout, seconds part."),
    ("timeout_usec", 0, 0, 999999, "Enrollment socket timeout, microseconds part."),
    debug_level("logging"),
];

const CLIENT_BUFFER: &[Entry] = &[
    ("tolerance", 15, 0, 600, "Seconds the buffer may stay full before a flooding alert."),
    ("min_eps", 50, 1, 1000, "Lowest events-per-second rate the buffer may be throttled to."),
    ("warn_level", 90, 0, 100, "Buffer usage percentage that raises a warning."),
    ("normal_level", 70, 0, 99, "Buffer usage percentage considered back to normal."),
];

const CLIENT: &[Entry] = &[
    ("state_interval", 5, 0, 86400, "Seconds between agent status file updates. 0 disables it."),
    ("recv_timeout", 60, 1, 600, "Seconds to wait for a server response."),
    switch("remote_conf", ENABLED, "Apply configuration pushed from the manager."),
    debug_level("logging"),
];

const LOGCOLLECTOR: &[Entry] = &[
    ("loop_timeout", 2, 1, 120, "Seconds between file reading loops."),
    ("open_attempts", 8, 0, 998, "Attempts to reopen a file that failed to open."),
    switch("remote_commands", DISABLED, "Accept command and full_command entries from shared configuration."),
    ("vcheck_files", 64, 0, 1024, "Reading loops between checks for file changes."),
    ("max_lines", 10000, 0, 1000000, "Maximum lines read from one file per loop. 0 means unlimited."),
    ("max_files", 1000, 1, 100000, "Maximum number of files monitored at once."),
    ("sock_fail_time", 300, 1, 3600, "Seconds to wait before reconnecting to a failed output socket."),
    ("input_threads", 4, N_MIN_INPUT_THREADS, 128, "Number of input reader threads."),
    ("queue_size", 1024, OUTPUT_MIN_QUEUE_SIZE, 220000, "Output queue size per target."),
    ("sample_log_length", 64, 1, 4096, "Characters of a sample log line kept in diagnostics."),
    ("rlimit_nofile", 1100, 1024, 1048576, "Maximum number of file descriptors the collector can open."),
    switch("force_reload", DISABLED, "Periodically reload monitored files."),
    ("reload_interval", 64, 1, 86400, "Seconds between forced file reloads."),
    ("reload_delay", 1000, 0, 30000, "Milliseconds to wait while reloading a file."),
    ("exclude_files_interval", 86400, 1, 172800, "Seconds between refreshes of the excluded files list."),
    debug_level("logging"),
];

const DATABASE_OUTPUT: &[Entry] = &[
    ("reconnect_attempts", 10, 1, 9999, "Attempts to reconnect to the database."),
];

const EXEC: &[Entry] = &[
    ("request_timeout", 60, 1, 3600, "Seconds to wait for an active-response request."),
    ("max_restart_lock", 600, 0, 3600, "Maximum seconds the restart lock may be held."),
    debug_level("logging"),
];

const INTEGRATOR: &[Entry] = &[debug_level("logging")];

pub const SUBSYSTEMS: &[(&str, &[Entry])] = &[
    ("syscheck", SYSCHECK),
    ("rootcheck", ROOTCHECK),
    ("sca", SCA),
    ("remote", REMOTE),
    ("mail", MAIL),
    ("auth", AUTH),
    ("client_buffer", CLIENT_BUFFER),
    ("client", CLIENT),
    ("logcollector", LOGCOLLECTOR),
    ("database_output", DATABASE_OUTPUT),
    ("exec", EXEC),
    ("integrator", INTEGRATOR),
];

pub fn build() -> Result<Registry, OptionError> {
    build_from(SUBSYSTEMS)
}

pub fn build_from(table: &[(&str, &[Entry])]) -> Result<Registry, OptionError> {
    let mut registry = Registry::new();
    for (subsystem, entries) in table {
        for &(name, default, min, max, description) in entries.iter() {
            registry.register_described(subsystem, name, default, min, max, description)?;
        }
    }
    Ok(registry)
}

static BUILTIN: Lazy<Registry> = Lazy::new(|| match build() {
    Ok(registry) => registry,
    Err(err) => panic!("compiled-in option table is defective: {}", err),
});

pub fn registry() -> &'static Registry {
    &BUILTIN
}
