// CurveLens - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "CurveLens";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "CurveLens";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Config file name, resolved next to the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory under the platform data dir that holds the default curve store.
pub const STORE_DIR_NAME: &str = "store";

// =============================================================================
// Curve list view
// =============================================================================

/// Row count at which the curve table switches from the standard grid to the
/// virtualised renderer. Below this every row is laid out each frame.
pub const VIRTUALIZATION_THRESHOLD: usize = 100;

/// Horizontal offset subtracted from the pointer position when anchoring a
/// context menu, so the menu opens under the cursor rather than beside it.
pub const CONTEXT_MENU_OFFSET_X: f32 = 2.0;

/// Vertical offset subtracted from the pointer position when anchoring a
/// context menu.
pub const CONTEXT_MENU_OFFSET_Y: f32 = 4.0;

/// Repaint interval while a fetch is in flight, so the result is picked up
/// promptly without a busy loop.
pub const FETCH_POLL_INTERVAL_MS: u64 = 50;

// =============================================================================
// File store
// =============================================================================

/// Extension of log documents inside the curve store.
pub const LOG_DOCUMENT_EXTENSION: &str = "json";

/// Depth of `<root>/<well>/<wellbore>/<log>.json` below the store root.
pub const STORE_LOG_DEPTH: usize = 3;

/// Maximum size of a single log document. Larger files are rejected rather
/// than read into memory.
pub const MAX_LOG_DOCUMENT_BYTES: u64 = 64 * 1024 * 1024; // 64 MB

/// Retry limits for transient I/O errors while reading a log document.
pub const MAX_READ_RETRIES: u32 = 3;

/// Backoff between read retries, indexed by attempt.
pub const READ_RETRY_DELAYS_MS: [u64; 3] = [50, 100, 200];

/// Slice length used when sleeping through a simulated fetch delay, bounding
/// how long a cancelled fetch keeps its worker thread alive.
pub const CANCEL_CHECK_INTERVAL_MS: u64 = 10;

/// Default simulated latency added to every store fetch.
pub const DEFAULT_FETCH_DELAY_MS: u64 = 0;

/// Upper bound on the simulated latency accepted from config.
pub const MAX_FETCH_DELAY_MS: u64 = 30_000;

// =============================================================================
// UI defaults
// =============================================================================

/// Default body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 13.0;

/// Minimum accepted font size.
pub const MIN_FONT_SIZE: f32 = 8.0;

/// Maximum accepted font size.
pub const MAX_FONT_SIZE: f32 = 32.0;

/// Default server label shown in the status bar when none is configured.
pub const DEFAULT_SERVER_NAME: &str = "Local store";

/// Number of notifications kept for the notification list.
pub const MAX_NOTIFICATIONS: usize = 50;

// =============================================================================
// Logging
// =============================================================================

/// Default log level when neither RUST_LOG, --debug nor config set one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Accepted values for `[logging] level`.
pub const VALID_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
