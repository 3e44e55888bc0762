//! Application-wide constants.

/// Name of the session cookie issued by the login endpoint.
pub const SESSION_COOKIE_NAME: &str = "giftwise_session";

/// Sessions expire this many days after issuance, regardless of activity.
pub const SESSION_MAX_AGE_DAYS: i64 = 7;
