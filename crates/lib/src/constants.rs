//! Constants used throughout the coder-gerrit-sync library.
//!
//! Central definitions for protocol strings shared by the clients and the sync routine.

/// Comment appended to keys that arrive without one, marking them as managed by this tool.
pub const SYNC_COMMENT: &str = "coder-sync";

/// Header carrying the Coder API session token.
pub const CODER_SESSION_HEADER: &str = "Coder-Session-Token";

/// Number of users requested per page when listing Coder users.
pub const CODER_USERS_PAGE_SIZE: usize = 100;

/// Line Gerrit prepends to every JSON response to defeat XSSI.
pub const GERRIT_XSSI_PREFIX: &str = ")]}'";

/// Path prefix Gerrit uses for authenticated REST endpoints.
pub const GERRIT_AUTH_PREFIX: &str = "a";

/// Default per-request timeout, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Longest response body excerpt kept in HTTP status errors.
pub const ERROR_BODY_LIMIT: usize = 512;
