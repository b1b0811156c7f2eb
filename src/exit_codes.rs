//! Exit code constants for the conjure CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid settings)
//! - 2: Document failure (unreadable, malformed, or missing required fields)
//! - 3: Resolution failure (inheritance chain or value substitution)
//! - 4: Output failure (bad output path or failed write)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or invalid settings.
pub const USER_ERROR: i32 = 1;

/// Document failure: load or validation error.
pub const DOCUMENT_FAILURE: i32 = 2;

/// Resolution failure: inheritance chain or substitution error.
pub const RESOLUTION_FAILURE: i32 = 3;

/// Output failure: invalid output path or write error.
pub const OUTPUT_FAILURE: i32 = 4;
