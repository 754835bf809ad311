use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::QuizError;

/// Answer category. Each question's options map to categories by position.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum Category {
    A,
    B,
    C,
    D,
}

impl Category {
    /// All categories in tie-break order.
    pub const ALL: [Category; 4] = [Category::A, Category::B, Category::C, Category::D];

    /// Category for the option at `position` in a question's answer list.
    pub fn from_position(position: usize) -> Option<Self> {
        Self::ALL.get(position).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::A => "A",
            Category::B => "B",
            Category::C => "C",
            Category::D => "D",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| QuizError::UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_map_in_order() {
        assert_eq!(Category::from_position(0), Some(Category::A));
        assert_eq!(Category::from_position(1), Some(Category::B));
        assert_eq!(Category::from_position(2), Some(Category::C));
        assert_eq!(Category::from_position(3), Some(Category::D));
        assert_eq!(Category::from_position(4), None);
    }

    #[test]
    fn parses_exact_labels_only() {
        assert_eq!("C".parse::<Category>().unwrap(), Category::C);
        assert!(matches!(
            "c".parse::<Category>(),
            Err(QuizError::UnknownCategory(s)) if s == "c"
        ));
        assert!("E".parse::<Category>().is_err());
        assert!("".parse::<Category>().is_err());
    }

    #[test]
    fn serializes_as_letter() {
        assert_eq!(serde_json::to_string(&Category::B).unwrap(), "\"B\"");
        assert_eq!(Category::D.to_string(), "D");
    }
}
