// =============================================================================
// PROGRESS TICK
// =============================================================================

/// Default cadence of the cosmetic progress tick (milliseconds)
pub const TICK_INTERVAL_MS: u64 = 200;

/// Smallest progress increment per tick
pub const TICK_STEP_MIN: u8 = 1;

/// Largest progress increment per tick
pub const TICK_STEP_MAX: u8 = 5;

/// Progress never advances past this value while a request is in flight
pub const PROGRESS_CAP: u8 = 95;

/// Progress reported once a result has arrived
pub const PROGRESS_COMPLETE: u8 = 100;

// =============================================================================
// UPLOAD FILTER
// =============================================================================

/// Accepted filename extension (compared case-insensitively)
pub const ZIP_EXTENSION: &str = ".zip";

/// Content types treated as ZIP archives
pub const ZIP_CONTENT_TYPES: &[&str] = &["application/zip", "application/x-zip-compressed", "application/x-zip"];

// =============================================================================
// REPORT
// =============================================================================

/// Width of the `=` rule framing the report body
pub const REPORT_RULE_WIDTH: usize = 40;

/// Prefix of exported report filenames
pub const REPORT_FILE_PREFIX: &str = "analysis_report_";

// =============================================================================
// STORAGE PATHS
// =============================================================================

/// Working directory for config and logs
pub const STORE_DIR: &str = ".zip-cleaner";

/// Config file inside STORE_DIR
pub const CONFIG_FILE: &str = "config.yaml";

/// Log directory inside STORE_DIR
pub const LOGS_DIR: &str = "logs";

/// Log file inside LOGS_DIR
pub const LOG_FILE: &str = "zipclean.log";
