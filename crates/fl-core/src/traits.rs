//! # Core Traits (Ports)
//!
//! Any plugin must implement these traits to be used by the binary.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    Flame, FlameStats, FlameUpdate, Generation, GenerationUpdate, Mode, NewFlame, NewGeneration,
};

/// Data persistence contract for flames and generations.
///
/// Implementations own both collections exclusively; every operation is a
/// single atomic step from the caller's point of view, and lookups on
/// missing ids report `NotFound` rather than panicking. Validation of field
/// contents happens before these methods are called (see [`crate::validate`]).
#[async_trait]
pub trait FlameStore: Send + Sync {
    // Flame operations
    async fn create_flame(&self, flame: NewFlame) -> Result<Flame>;
    async fn get_flame(&self, id: i64) -> Result<Flame>;
    /// All flames, newest first. Default limit 50.
    async fn list_flames(&self, limit: Option<usize>, offset: usize) -> Result<Vec<Flame>>;
    /// Approved flames only, most-liked first (ties: lower id first).
    /// Default limit 20.
    async fn list_approved_flames(&self, limit: Option<usize>, offset: usize)
        -> Result<Vec<Flame>>;
    async fn get_daily_flame(&self) -> Result<Flame>;
    /// Merges the given fields into the record. Promoting a flame to daily
    /// demotes any previously-daily flame.
    async fn update_flame(&self, id: i64, updates: FlameUpdate) -> Result<Flame>;
    /// Atomic like increment; concurrent likes never lose an update.
    async fn like_flame(&self, id: i64) -> Result<Flame>;

    // Generation operations
    async fn create_generation(&self, generation: NewGeneration) -> Result<Generation>;
    async fn get_generation(&self, id: i64) -> Result<Generation>;
    /// Newest first. Default limit 50.
    async fn list_generations(
        &self,
        limit: Option<usize>,
        offset: usize,
    ) -> Result<Vec<Generation>>;
    async fn update_generation(&self, id: i64, updates: GenerationUpdate) -> Result<Generation>;

    // Stats
    async fn stats(&self) -> Result<FlameStats>;
}

/// Upstream text-generation contract.
///
/// May be slow or fail independently of the store; callers record the
/// result only after this returns successfully.
#[async_trait]
pub trait FlameGenerator: Send + Sync {
    async fn generate(&self, mode: Mode, input: Option<&str>) -> Result<String>;
}
