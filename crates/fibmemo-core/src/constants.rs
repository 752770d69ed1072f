//! Constants for the seeded cache, recursion policy and process exit codes.

/// Highest index pre-seeded into every new cache.
pub const SEED_MAX_INDEX: u64 = 10;

/// Fibonacci values for n = 0..=10, loaded into every cache at construction.
pub const SEED_TABLE: [u64; 11] = [0, 1, 1, 2, 3, 5, 8, 13, 21, 34, 55];

/// Default maximum recursion depth for the recursive strategy.
///
/// A request whose gap to the highest cached index exceeds this depth is
/// filled bottom-up instead.
pub const DEFAULT_RECURSION_LIMIT: usize = 1_000;

/// Minimum progress change (1%) before reporting an update.
pub const PROGRESS_REPORT_THRESHOLD: f64 = 0.01;

/// Maximum Fibonacci index whose value fits in a u64.
/// F(93) = 12200160415121876738
pub const MAX_FIB_U64: u64 = 93;

/// Process exit codes.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// Input was not a valid non-negative integer.
    pub const ERROR_INPUT: i32 = 2;
    /// The computation itself failed.
    pub const ERROR_COMPUTE: i32 = 3;
    /// Computation cancelled by user (Ctrl+C).
    pub const ERROR_CANCELED: i32 = 130;
}
