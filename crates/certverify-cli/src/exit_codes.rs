//! Process exit codes. Part of the CLI contract.

pub const SUCCESS: i32 = 0;
pub const REJECTED: i32 = 1; // Verdict was a rejection, or lookup found nothing
pub const CONFIG_ERROR: i32 = 2; // Bad configuration, unreadable input
pub const TIMED_OUT: i32 = 3; // Verification exceeded verify_timeout_secs
pub const LOOKUP_FAILED: i32 = 4; // Registry could not be queried
