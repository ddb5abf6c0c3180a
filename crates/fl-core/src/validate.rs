//! # Validation
//!
//! The single validation boundary for the workspace. The API layer runs
//! these checks before touching storage; the store itself only ever
//! reports `NotFound`.

use crate::error::{AppError, Result};
use crate::models::{FlameUpdate, Mode, NewFlame};

/// Inclusive content length bounds, counted in characters.
pub const MIN_CONTENT_CHARS: usize = 10;
pub const MAX_CONTENT_CHARS: usize = 280;

/// Inclusive rating bounds.
pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// Checks the 10-280 character bound on flame content.
pub fn content_length(content: &str) -> Result<()> {
    let chars = content.chars().count();
    if chars < MIN_CONTENT_CHARS {
        return Err(AppError::ValidationError(format!(
            "flame too short: minimum {MIN_CONTENT_CHARS} characters"
        )));
    }
    if chars > MAX_CONTENT_CHARS {
        return Err(AppError::ValidationError(format!(
            "flame too long: maximum {MAX_CONTENT_CHARS} characters"
        )));
    }
    Ok(())
}

/// Checks a 1-5 star rating.
pub fn rating(value: i32) -> Result<()> {
    if !(MIN_RATING..=MAX_RATING).contains(&value) {
        return Err(AppError::ValidationError(format!(
            "rating must be between {MIN_RATING} and {MAX_RATING}"
        )));
    }
    Ok(())
}

/// Checks a generation request's mode string against the known set.
/// `community` is reserved for user submissions and rejected here.
pub fn generation_mode(raw: &str) -> Result<Mode> {
    let mode: Mode = raw.parse()?;
    if mode == Mode::Community {
        return Err(AppError::ValidationError(
            "mode 'community' is not generatable".into(),
        ));
    }
    Ok(mode)
}

/// Full check for a community submission.
pub fn new_flame(flame: &NewFlame) -> Result<()> {
    content_length(&flame.content)
}

/// Checks the editable fields of a moderation update.
pub fn flame_update(updates: &FlameUpdate) -> Result<()> {
    if let Some(content) = &updates.content {
        content_length(content)?;
    }
    if let Some(likes) = updates.likes {
        if likes < 0 {
            return Err(AppError::ValidationError("likes must be non-negative".into()));
        }
    }
    Ok(())
}
