//! Argument validation for interests, user id lists and single user ids.
//!
//! Every check runs before a request is built. Container checks come before
//! element checks, and elements are checked left to right as
//! type, then length, then charset. The first failure is returned; errors are
//! never aggregated.
//!
//! Lengths are counted in characters.
//!
//! User ids in lists and ids passed to `delete_user` only have a maximum
//! length. Token generation additionally rejects the empty string.

use serde_json::Value;

use crate::error::ArgumentError;
use crate::types::TargetKind;

pub const INTEREST_MAX_LENGTH: usize = 164;
pub const INTERESTS_MAX_COUNT: usize = 100;
pub const USER_ID_MAX_LENGTH: usize = 164;
pub const USERS_MAX_COUNT: usize = 1000;

const INTEREST_PUNCTUATION: &str = "_-=@,.;";

/// Validate a typed interest list.
pub fn interests<S: AsRef<str>>(interests: &[S]) -> Result<(), ArgumentError> {
    target_count(TargetKind::Interests, interests.len())?;
    interests.iter().try_for_each(|i| interest(i.as_ref()))
}

/// Validate a typed user id list.
pub fn users<S: AsRef<str>>(users: &[S]) -> Result<(), ArgumentError> {
    target_count(TargetKind::Users, users.len())?;
    users.iter().try_for_each(|u| listed_user_id(u.as_ref()))
}

/// Validate a single interest name.
pub fn interest(interest: &str) -> Result<(), ArgumentError> {
    max_length("interest", interest, INTEREST_MAX_LENGTH)?;
    if !interest.chars().all(is_interest_char) {
        return Err(ArgumentError::ForbiddenCharacter {
            subject: "interest",
            value: interest.to_owned(),
        });
    }
    Ok(())
}

/// Validate a single user id. `allow_empty` is false for token generation.
pub fn user_id(user_id: &str, allow_empty: bool) -> Result<(), ArgumentError> {
    if !allow_empty && user_id.is_empty() {
        return Err(ArgumentError::EmptyString("userId"));
    }
    if user_id.chars().count() > USER_ID_MAX_LENGTH {
        return Err(ArgumentError::IdTooLong {
            subject: "userId",
            max: USER_ID_MAX_LENGTH,
        });
    }
    Ok(())
}

/// Validate a dynamically typed interest list, returning the names.
pub fn interests_value(value: Option<&Value>) -> Result<Vec<String>, ArgumentError> {
    target_list_value(TargetKind::Interests, value, interest)
}

/// Validate a dynamically typed user id list, returning the ids.
pub fn users_value(value: Option<&Value>) -> Result<Vec<String>, ArgumentError> {
    target_list_value(TargetKind::Users, value, listed_user_id)
}

/// Validate a dynamically typed single user id.
///
/// Checks run as required, empty (unless `allow_empty`), type, then length.
pub fn user_id_value(value: Option<&Value>, allow_empty: bool) -> Result<String, ArgumentError> {
    let value = present(value).ok_or(ArgumentError::Required("userId"))?;
    if !allow_empty && value.as_str() == Some("") {
        return Err(ArgumentError::EmptyString("userId"));
    }
    let id = value.as_str().ok_or_else(|| ArgumentError::NotAString {
        subject: "userId",
        value: value.to_string(),
    })?;
    user_id(id, allow_empty)?;
    Ok(id.to_owned())
}

fn target_list_value(
    kind: TargetKind,
    value: Option<&Value>,
    check: fn(&str) -> Result<(), ArgumentError>,
) -> Result<Vec<String>, ArgumentError> {
    let value = present(value).ok_or(ArgumentError::Required(kind.field()))?;
    let items = value
        .as_array()
        .ok_or(ArgumentError::NotAList(kind.field()))?;
    target_count(kind, items.len())?;

    items
        .iter()
        .map(|item| {
            let target = item.as_str().ok_or_else(|| ArgumentError::NotAString {
                subject: kind.element(),
                value: item.to_string(),
            })?;
            check(target)?;
            Ok(target.to_owned())
        })
        .collect()
}

fn target_count(kind: TargetKind, count: usize) -> Result<(), ArgumentError> {
    if count == 0 {
        return Err(ArgumentError::EmptyTargets(kind.element()));
    }
    if count > kind.max_targets() {
        return Err(ArgumentError::LimitExceeded {
            noun: kind.count_noun(),
            count,
            max: kind.max_targets(),
        });
    }
    Ok(())
}

fn listed_user_id(user_id: &str) -> Result<(), ArgumentError> {
    max_length("user id", user_id, USER_ID_MAX_LENGTH)
}

fn max_length(subject: &'static str, value: &str, max: usize) -> Result<(), ArgumentError> {
    if value.chars().count() > max {
        return Err(ArgumentError::TooLong {
            subject,
            value: value.to_owned(),
            max,
        });
    }
    Ok(())
}

fn is_interest_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || INTEREST_PUNCTUATION.contains(c)
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}
