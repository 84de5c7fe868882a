//! # Innate Primitives
//!
//! Hardcoded runtime constants for the Scribbler CORE.
//!
//! Scribbler starts with an empty workspace but fixed layout rules.
//! These primitives are compiled into the binary and are immutable at runtime.

/// Maximum number of entries retained in the backup store.
///
/// - Eviction keeps the `BACKUP_CAPACITY` most recently archived entries
///   (ordered by name, descending) and deletes the rest.
/// - Enforced at the end of every fully-forward commit.
pub const BACKUP_CAPACITY: usize = 10;

/// File name of the staging slot inside the workspace.
///
/// The staging slot always holds the newest committed artifact; it is
/// overwritten in place on every commit.
pub const STAGING_FILE_NAME: &str = "Background.bmp";

/// Directory name of the backup store inside the workspace.
pub const BACKUP_DIR_NAME: &str = "Backup";

/// File name of the persisted engine state inside the workspace.
pub const STATE_FILE_NAME: &str = "history.state";

/// File name of the persisted text history inside the workspace.
pub const TEXT_HISTORY_FILE_NAME: &str = "History.txt";

/// Maximum number of text history entries kept when saving to disk.
///
/// Older entries beyond this count are dropped on save; the in-memory
/// log is unbounded for the lifetime of the process.
pub const MAX_SAVED_TEXTS: usize = 1000;

/// Magic bytes for the Scribbler binary state format header.
///
/// - File Header = Magic Bytes ("SCRB") + Version (u8) before payload.
pub const MAGIC_BYTES: &[u8; 4] = b"SCRB";

/// Current serialization format version.
///
/// Increment this when making breaking changes to the state format.
pub const FORMAT_VERSION: u8 = 1;

/// Prefix of backup entry file names.
///
/// A backup entry is named `Background_<timestamp>.bmp` where the timestamp
/// is zero-padded UTC down to milliseconds, so lexicographic order over the
/// full file name equals chronological archive order.
pub const BACKUP_NAME_PREFIX: &str = "Background_";

/// Suffix of backup entry file names.
pub const BACKUP_NAME_SUFFIX: &str = ".bmp";

/// `chrono` format string for the timestamp portion of backup names.
///
/// `%.3f` renders exactly three fractional digits, keeping names fixed-width.
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S%.3f";

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum length for scribbled text, in bytes.
///
/// Longer inputs are rejected by the content generator.
/// This prevents memory exhaustion from malicious or malformed input.
pub const MAX_TEXT_LENGTH: usize = 1024;

/// Maximum width or height of a generated image, in pixels.
///
/// Keeps a single artifact bounded to a sane allocation.
pub const MAX_IMAGE_DIMENSION: u32 = 16384;
