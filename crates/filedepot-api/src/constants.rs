/// API version segment used in route paths.
pub const API_VERSION: &str = "v1";

/// Prefix for all versioned API routes.
pub const API_PREFIX: &str = "/api/v1";
