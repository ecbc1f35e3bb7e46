//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// User Roles
// =============================================================================

/// Default role assigned to new users
pub const ROLE_USER: &str = "user";

/// Administrator role with elevated privileges
pub const ROLE_ADMIN: &str = "admin";

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Minimum sweet name length (after trimming)
pub const MIN_SWEET_NAME_LENGTH: usize = 2;

/// Maximum sweet name length (after trimming)
pub const MAX_SWEET_NAME_LENGTH: usize = 100;

/// Largest quantity that survives a round trip through a JSON number.
pub const MAX_QUANTITY: f64 = 9_007_199_254_740_991.0;

// =============================================================================
// Authentication
// =============================================================================

/// Default JWT token expiration in hours (7 days)
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24 * 7;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;
