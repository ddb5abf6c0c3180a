//! # fl-storage-mem
//!
//! In-memory implementation of `FlameStore` backed by DashMap.
//! Process-local and transient; a database plugin can replace it behind the
//! same trait without touching callers.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{Duration, Local, Utc};
use dashmap::DashMap;
use rand::Rng;
use tokio::sync::Mutex;

use fl_core::error::{AppError, Result};
use fl_core::models::{
    Flame, FlameStats, FlameUpdate, Generation, GenerationUpdate, Mode, NewFlame, NewGeneration,
};
use fl_core::traits::FlameStore;

const DEFAULT_FLAME_LIMIT: usize = 50;
const DEFAULT_APPROVED_LIMIT: usize = 20;
const DEFAULT_GENERATION_LIMIT: usize = 50;

pub struct MemFlameStore {
    flames: DashMap<i64, Flame>,
    generations: DashMap<i64, Generation>,
    // Ids start at 1 and are never reused within a process lifetime
    next_flame_id: AtomicI64,
    next_generation_id: AtomicI64,
    /// Serializes daily-flame promotions, the only write that touches more
    /// than one record. Per-record writes go through DashMap entry guards.
    daily_lock: Mutex<()>,
}

impl MemFlameStore {
    pub fn new() -> Self {
        Self {
            flames: DashMap::new(),
            generations: DashMap::new(),
            next_flame_id: AtomicI64::new(1),
            next_generation_id: AtomicI64::new(1),
            daily_lock: Mutex::new(()),
        }
    }

    /// A store pre-populated with a few approved community flames so a fresh
    /// instance doesn't serve an empty UI. The first seeded flame is the
    /// daily flame. Bootstrap convenience only; nothing depends on it.
    pub fn seeded() -> Self {
        let store = Self::new();
        let mut rng = rand::rng();

        let seeds: [(&str, Mode, &str); 3] = [
            (
                "That comeback was so cold, it made winter jealous ❄️",
                Mode::Roast,
                "FlameKing",
            ),
            (
                "Your style so fresh, it expired next week 🔥",
                Mode::Bar,
                "BarMaster",
            ),
            (
                "You're like WiFi - everyone's trying to connect with you but only the special ones get the password ✨",
                Mode::Compliment,
                "SweetTalker",
            ),
        ];

        for (i, (content, mode, author)) in seeds.into_iter().enumerate() {
            let id = store.next_flame_id.fetch_add(1, Ordering::SeqCst);
            let age = Duration::seconds(rng.random_range(0..7 * 24 * 3600));
            store.flames.insert(
                id,
                Flame {
                    id,
                    content: content.to_string(),
                    mode: mode.to_string(),
                    author: Some(author.to_string()),
                    likes: rng.random_range(10..110),
                    is_approved: true,
                    is_daily: i == 0,
                    created_at: Utc::now() - age,
                },
            );
        }

        tracing::debug!(flames = store.flames.len(), "seeded initial flames");
        store
    }

    fn page<T>(items: Vec<T>, limit: usize, offset: usize) -> Vec<T> {
        items.into_iter().skip(offset).take(limit).collect()
    }
}

impl Default for MemFlameStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FlameStore for MemFlameStore {
    async fn create_flame(&self, flame: NewFlame) -> Result<Flame> {
        let id = self.next_flame_id.fetch_add(1, Ordering::SeqCst);
        let record = Flame {
            id,
            content: flame.content,
            mode: flame.mode,
            author: flame.author,
            likes: 0,
            // New submissions wait for moderation
            is_approved: false,
            is_daily: false,
            created_at: Utc::now(),
        };
        self.flames.insert(id, record.clone());
        Ok(record)
    }

    async fn get_flame(&self, id: i64) -> Result<Flame> {
        self.flames
            .get(&id)
            .map(|f| f.clone())
            .ok_or_else(|| AppError::flame_not_found(id))
    }

    async fn list_flames(&self, limit: Option<usize>, offset: usize) -> Result<Vec<Flame>> {
        let mut all: Vec<Flame> = self.flames.iter().map(|f| f.clone()).collect();
        // Newest first; equal timestamps fall back to the later id
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(Self::page(all, limit.unwrap_or(DEFAULT_FLAME_LIMIT), offset))
    }

    async fn list_approved_flames(
        &self,
        limit: Option<usize>,
        offset: usize,
    ) -> Result<Vec<Flame>> {
        let mut approved: Vec<Flame> = self
            .flames
            .iter()
            .filter(|f| f.is_approved)
            .map(|f| f.clone())
            .collect();
        // Most liked first; ties broken by insertion order (lower id)
        approved.sort_by(|a, b| b.likes.cmp(&a.likes).then(a.id.cmp(&b.id)));
        Ok(Self::page(
            approved,
            limit.unwrap_or(DEFAULT_APPROVED_LIMIT),
            offset,
        ))
    }

    async fn get_daily_flame(&self) -> Result<Flame> {
        self.flames
            .iter()
            .find(|f| f.is_daily)
            .map(|f| f.clone())
            .ok_or(AppError::NotFound("daily flame", 0))
    }

    async fn update_flame(&self, id: i64, updates: FlameUpdate) -> Result<Flame> {
        // At most one daily flame: promotions are serialized so two
        // concurrent ones can't both survive the sweep below.
        let promoting = updates.is_daily == Some(true);
        let _guard = if promoting {
            Some(self.daily_lock.lock().await)
        } else {
            None
        };

        let updated = {
            let mut entry = self
                .flames
                .get_mut(&id)
                .ok_or_else(|| AppError::flame_not_found(id))?;
            if let Some(content) = updates.content {
                entry.content = content;
            }
            if let Some(mode) = updates.mode {
                entry.mode = mode;
            }
            if let Some(author) = updates.author {
                entry.author = Some(author);
            }
            if let Some(likes) = updates.likes {
                entry.likes = likes;
            }
            if let Some(is_approved) = updates.is_approved {
                entry.is_approved = is_approved;
            }
            if let Some(is_daily) = updates.is_daily {
                entry.is_daily = is_daily;
            }
            entry.clone()
        };

        // The new daily is marked before the old one is demoted, so a
        // concurrent read always finds a daily flame; a transient second
        // one resolves to whichever the read reaches first.
        if promoting {
            for mut flame in self.flames.iter_mut() {
                if *flame.key() != id {
                    flame.is_daily = false;
                }
            }
        }
        Ok(updated)
    }

    async fn like_flame(&self, id: i64) -> Result<Flame> {
        // Single read-modify-write under the entry's shard guard
        let mut entry = self
            .flames
            .get_mut(&id)
            .ok_or_else(|| AppError::flame_not_found(id))?;
        entry.likes += 1;
        Ok(entry.clone())
    }

    async fn create_generation(&self, generation: NewGeneration) -> Result<Generation> {
        let id = self.next_generation_id.fetch_add(1, Ordering::SeqCst);
        let record = Generation {
            id,
            mode: generation.mode,
            input: generation.input,
            output: generation.output,
            rating: None,
            created_at: Utc::now(),
        };
        self.generations.insert(id, record.clone());
        Ok(record)
    }

    async fn get_generation(&self, id: i64) -> Result<Generation> {
        self.generations
            .get(&id)
            .map(|g| g.clone())
            .ok_or_else(|| AppError::generation_not_found(id))
    }

    async fn list_generations(
        &self,
        limit: Option<usize>,
        offset: usize,
    ) -> Result<Vec<Generation>> {
        let mut all: Vec<Generation> = self.generations.iter().map(|g| g.clone()).collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(Self::page(
            all,
            limit.unwrap_or(DEFAULT_GENERATION_LIMIT),
            offset,
        ))
    }

    async fn update_generation(&self, id: i64, updates: GenerationUpdate) -> Result<Generation> {
        let mut entry = self
            .generations
            .get_mut(&id)
            .ok_or_else(|| AppError::generation_not_found(id))?;
        if let Some(rating) = updates.rating {
            // One rating per generation; a second rating overwrites
            entry.rating = Some(rating);
        }
        Ok(entry.clone())
    }

    async fn stats(&self) -> Result<FlameStats> {
        // Day boundary is local midnight on the server
        let today = Local::now().date_naive();
        let mut approved = 0;
        let mut today_count = 0;
        for flame in self.flames.iter() {
            if flame.is_approved {
                approved += 1;
            }
            if flame.created_at.with_timezone(&Local).date_naive() == today {
                today_count += 1;
            }
        }
        Ok(FlameStats {
            total_flames: self.flames.len(),
            total_generations: self.generations.len(),
            approved_flames: approved,
            today_flames: today_count,
        })
    }
}
