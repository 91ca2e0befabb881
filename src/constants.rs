// =============================================================================
// EVENT LOOP
// =============================================================================

/// Poll interval for events in milliseconds while work is in flight
pub const EVENT_POLL_MS: u64 = 8;

/// Poll interval when nothing is happening
pub const IDLE_POLL_MS: u64 = 50;

/// Minimum time between renders (ms) - caps at ~28fps
pub const RENDER_THROTTLE_MS: u64 = 36;

// =============================================================================
// UI LAYOUT
// =============================================================================

/// Height of the status bar
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Height of the title header
pub const HEADER_HEIGHT: u16 = 3;

/// Width of the centered upload and loader cards
pub const CARD_WIDTH: u16 = 64;

/// Minimum rows moved by PageUp/PageDown in the results tree
pub const TREE_PAGE_AMOUNT: usize = 10;

/// Columns of indentation per tree depth
pub const TREE_INDENT: usize = 2;

// =============================================================================
// LOGGING
// =============================================================================

/// Filter used when RUST_LOG is unset
pub const DEFAULT_LOG_FILTER: &str = "zipclean=info,zc_base=info";
