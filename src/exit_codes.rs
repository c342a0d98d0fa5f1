//! Exit code constants for the flipflop CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unreadable files)
//! - 2: Catalog load failure
//! - 3: Template format failure
//! - 4: Contract violation (tag index out of range)
//! - 5: Unresolved random tags under `--strict`

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unreadable input files, invalid config.
pub const USER_ERROR: i32 = 1;

/// Snippet catalog source could not be loaded.
pub const CATALOG_FAILURE: i32 = 2;

/// Template blob could not be parsed or has an unsupported version.
pub const TEMPLATE_FAILURE: i32 = 3;

/// A tag sequence operation was called with an invalid index.
pub const CONTRACT_VIOLATION: i32 = 4;

/// Random tags were left unresolved and the caller asked for strictness.
pub const UNRESOLVED_TAGS: i32 = 5;
