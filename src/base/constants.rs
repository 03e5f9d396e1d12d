//! Domain constants: file extensions, scan tuning, lookup limits.

/// Extension of ordinary source files (declarations with bodies).
pub const SOURCE_EXTENSION: &str = "vala";

/// Extension of declaration-only files (API bindings without bodies).
pub const DECLARATION_EXTENSION: &str = "vapi";

/// Extensions a local project scan picks up.
pub const PROJECT_EXTENSIONS: &[&str] = &[SOURCE_EXTENSION, DECLARATION_EXTENSION];

/// Extensions a system declaration scan picks up.
pub const SYSTEM_EXTENSIONS: &[&str] = &[DECLARATION_EXTENSION];

/// Files parsed per scheduler tick.
pub const SCAN_BATCH_SIZE: usize = 5;

/// Environment variable overriding the system declaration directories.
/// Holds a platform path list (`:`-separated on Unix).
pub const SYSTEM_DIRS_ENV: &str = "VALENCE_SYSTEM_DIRS";

/// Standard locations of system declaration files.
pub const DEFAULT_SYSTEM_DIRS: &[&str] = &["/usr/share/vala/vapi", "/usr/local/share/vala/vapi"];

/// Full name of the implicit root namespace.
pub const ROOT_NAMESPACE: &str = "";

/// Nesting limit for recursive name resolution.
pub const MAX_RESOLVE_DEPTH: usize = 64;
