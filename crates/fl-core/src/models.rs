//! # Domain Models
//!
//! These structs represent the core entities of Flameboard.
//! Records carry sequential integer ids assigned by the store; wire field
//! names are camelCase to match the JSON API.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A short user-facing text line (generated or community-submitted) with
/// moderation and popularity metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flame {
    pub id: i64,
    pub content: String,
    /// Content category; free text, but only [`Mode`] values drive generation
    pub mode: String,
    /// Display name; `None` means anonymous
    pub author: Option<String>,
    pub likes: i64,
    /// New submissions start unapproved and stay out of the public listing
    pub is_approved: bool,
    /// Featured-flame flag; the store keeps at most one set at a time
    pub is_daily: bool,
    pub created_at: DateTime<Utc>,
}

/// A record of one AI text-generation attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Generation {
    pub id: i64,
    pub mode: String,
    /// User-supplied seed/context text, if any
    pub input: Option<String>,
    pub output: String,
    /// 1-5 stars, set after the fact; a second rating overwrites the first
    pub rating: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Fields the caller supplies when submitting a flame; the store fills in
/// the rest (id, likes, flags, timestamp).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFlame {
    pub content: String,
    pub mode: String,
    #[serde(default)]
    pub author: Option<String>,
}

/// Fields recorded for a completed generation attempt.
#[derive(Debug, Clone)]
pub struct NewGeneration {
    pub mode: String,
    pub input: Option<String>,
    pub output: String,
}

/// Partial update for a flame. `None` fields are left unchanged; id and
/// created_at are immutable and deliberately absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlameUpdate {
    pub content: Option<String>,
    pub mode: Option<String>,
    pub author: Option<String>,
    pub likes: Option<i64>,
    pub is_approved: Option<bool>,
    pub is_daily: Option<bool>,
}

/// Partial update for a generation; used to attach a rating after the fact.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationUpdate {
    pub rating: Option<i32>,
}

/// Aggregate counters surfaced on the stats endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FlameStats {
    pub total_flames: usize,
    pub total_generations: usize,
    pub approved_flames: usize,
    /// Flames created since local midnight on the server
    pub today_flames: usize,
}

/// The fixed set of content categories the generator understands.
/// `Community` tags user submissions and is never sent upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Bar,
    Flirty,
    Roast,
    Compliment,
    Joke,
    Community,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Bar => "bar",
            Mode::Flirty => "flirty",
            Mode::Roast => "roast",
            Mode::Compliment => "compliment",
            Mode::Joke => "joke",
            Mode::Community => "community",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = crate::error::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bar" => Ok(Mode::Bar),
            "flirty" => Ok(Mode::Flirty),
            "roast" => Ok(Mode::Roast),
            "compliment" => Ok(Mode::Compliment),
            "joke" => Ok(Mode::Joke),
            "community" => Ok(Mode::Community),
            other => Err(crate::error::AppError::ValidationError(format!(
                "unknown mode '{other}'"
            ))),
        }
    }
}
