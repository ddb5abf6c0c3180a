//! flameboard/crates/fl-core/src/lib.rs
//!
//! The central domain logic and interface definitions for Flameboard.

pub mod error;
pub mod models;
pub mod traits;
pub mod validate;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use traits::*;

#[cfg(test)]
mod tests {
    use super::models::*;

    #[test]
    fn flame_serializes_camel_case() {
        let flame = Flame {
            id: 1,
            content: "Hello Rust, stay toasty".to_string(),
            mode: Mode::Bar.to_string(),
            author: None,
            likes: 0,
            is_approved: false,
            is_daily: false,
            created_at: chrono::Utc::now(),
        };
        let json = serde_json::to_value(&flame).unwrap();
        assert_eq!(json["isApproved"], serde_json::json!(false));
        assert_eq!(json["mode"], serde_json::json!("bar"));
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn mode_round_trips_through_str() {
        for raw in ["bar", "flirty", "roast", "compliment", "joke", "community"] {
            let mode: Mode = raw.parse().unwrap();
            assert_eq!(mode.as_str(), raw);
        }
        assert!("disstrack".parse::<Mode>().is_err());
    }

    #[test]
    fn flame_update_deserializes_partial_bodies() {
        let update: FlameUpdate = serde_json::from_str(r#"{"isApproved": true}"#).unwrap();
        assert_eq!(update.is_approved, Some(true));
        assert!(update.content.is_none());
        assert!(update.is_daily.is_none());
    }
}
