//! Interrogation-practice cards.

use serde::{Deserialize, Deserializer, Serialize};

/// How hard a practice question is, on a 0..=5 scale.
///
/// The backend's value is clamped rather than rejected so a single odd card
/// does not discard the whole set. Floats are rounded, numeric strings are
/// parsed, and `null` or an unparsable string reads as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(into = "u8")]
pub struct Difficulty(u8);

/// Every shape a difficulty has been seen to arrive in.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDifficulty {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Difficulty {
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Self {
        Self(value.min(Self::MAX))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl From<i64> for Difficulty {
    fn from(value: i64) -> Self {
        Self(value.clamp(0, Self::MAX as i64) as u8)
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<RawDifficulty>::deserialize(deserializer)? {
            Some(RawDifficulty::Int(n)) => n.into(),
            Some(RawDifficulty::Float(f)) => from_float(f),
            Some(RawDifficulty::Text(s)) => s.trim().parse().map(from_float).unwrap_or_default(),
            None => Self::default(),
        })
    }
}

// NaN casts to 0.
fn from_float(value: f64) -> Difficulty {
    Difficulty(value.round().clamp(0.0, Difficulty::MAX as f64) as u8)
}

impl From<Difficulty> for u8 {
    fn from(value: Difficulty) -> Self {
        value.0
    }
}

/// A single simulated question from a police officer or cross-examiner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeCard {
    pub category: String,
    pub question: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Why the authority asks this; hidden until revealed.
    #[serde(default)]
    pub purpose: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_decodes() {
        let json = r#"{
            "category": "Evidence",
            "question": "How can you prove the threat was made?",
            "purpose": "Checks whether you have recordings or witnesses.",
            "difficulty": 4
        }"#;
        let card: PracticeCard = serde_json::from_str(json).unwrap();
        assert_eq!(card.category, "Evidence");
        assert_eq!(card.difficulty.get(), 4);
    }

    fn difficulty_of(raw: &str) -> u8 {
        let json = format!(r#"{{ "category": "c", "question": "q", "difficulty": {raw} }}"#);
        let card: PracticeCard = serde_json::from_str(&json).unwrap();
        card.difficulty.get()
    }

    #[test]
    fn difficulty_is_clamped() {
        assert_eq!(difficulty_of("9"), 5);
        assert_eq!(difficulty_of("-2"), 0);
        assert_eq!(Difficulty::new(7).get(), 5);
    }

    #[test]
    fn difficulty_accepts_floats_strings_and_null() {
        assert_eq!(difficulty_of("3.0"), 3);
        assert_eq!(difficulty_of("2.6"), 3);
        assert_eq!(difficulty_of("7.5"), 5);
        assert_eq!(difficulty_of(r#""3""#), 3);
        assert_eq!(difficulty_of(r#"" 4 ""#), 4);
        assert_eq!(difficulty_of(r#""hard""#), 0);
        assert_eq!(difficulty_of("null"), 0);
    }

    #[test]
    fn one_odd_difficulty_keeps_the_whole_set() {
        let json = r#"[
            { "category": "Evidence", "question": "q1", "difficulty": 3.0 },
            { "category": "Timeline", "question": "q2", "difficulty": null },
            { "category": "Motive", "question": "q3", "difficulty": "3" },
            { "category": "Basic Fact", "question": "q4", "difficulty": 2 }
        ]"#;
        let cards: Vec<PracticeCard> = serde_json::from_str(json).unwrap();
        let levels: Vec<u8> = cards.iter().map(|c| c.difficulty.get()).collect();
        assert_eq!(levels, [3, 0, 3, 2]);
    }

    #[test]
    fn difficulty_serializes_as_number() {
        let card = PracticeCard {
            category: "Consistency".into(),
            question: "q".into(),
            difficulty: Difficulty::new(3),
            purpose: "p".into(),
        };
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["difficulty"], 3);
    }
}
