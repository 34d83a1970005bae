//! Validation helpers and constants for the teams domain

use regex::Regex;

/// Minimum length of user and team names
pub const MIN_NAME_LENGTH: usize = 4;

/// Minimum password length at registration
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// `maxMemberCount` must be strictly greater than this
pub const MIN_MAX_MEMBER_COUNT: i32 = 10;

/// Capacity used when a new team does not name one
pub const DEFAULT_MAX_MEMBER_COUNT: i32 = 11;

/// Random starting score bounds, inclusive
pub const MIN_SCORE: i32 = 1;
pub const MAX_SCORE: i32 = 100;

lazy_static::lazy_static! {
    /// Email validation regex
    pub static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+$").unwrap();
}

pub fn validate_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Length in characters, not bytes
pub fn is_name_too_short(name: &str) -> bool {
    name.chars().count() < MIN_NAME_LENGTH
}

pub fn is_password_too_short(password: &str) -> bool {
    password.chars().count() < MIN_PASSWORD_LENGTH
}

pub fn is_max_member_count_too_low(max_member_count: i32) -> bool {
    max_member_count <= MIN_MAX_MEMBER_COUNT
}
