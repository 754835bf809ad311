use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::category::Category;
use crate::error::QuizError;

/// One entry per question: the literal option text the user picked, or `None` if skipped.
pub type UserAnswers = Vec<Option<String>>;

/// A multiple-choice question. Options map to categories by position (0→A .. 3→D).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Question {
    /// Prompt shown to the user.
    pub question: String,
    /// Ordered answer options.
    pub answers: Vec<String>,
}

impl Question {
    /// Category of `answer` within this question's options, by exact equality.
    pub fn category_of(&self, answer: &str) -> Option<Category> {
        let position = self.answers.iter().position(|opt| opt == answer)?;
        Category::from_position(position)
    }
}

/// The fixed question set supplied by the quiz flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct QuizDefinition {
    pub questions: Vec<Question>,
}

impl QuizDefinition {
    /// Parse and validate a quiz definition from JSON.
    pub fn parse(content: &str) -> Result<Self, QuizError> {
        let definition: QuizDefinition = serde_json::from_str(content)
            .map_err(|e| QuizError::Definition(format!("malformed JSON: {e}")))?;

        if definition.questions.is_empty() {
            return Err(QuizError::Definition("quiz has no questions".to_string()));
        }

        for (index, q) in definition.questions.iter().enumerate() {
            if q.answers.is_empty() {
                return Err(QuizError::Definition(format!(
                    "question {index} has no answer options"
                )));
            }
            if q.answers.len() != Category::ALL.len() {
                warn!(
                    index,
                    options = q.answers.len(),
                    "question does not have exactly four options; extras count toward no category"
                );
            }
        }

        Ok(definition)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_of_uses_exact_match() {
        let q = Question {
            question: "Pick one".to_string(),
            answers: vec!["Jazz".into(), "Dinner".into(), "Coffee".into(), "Tequila".into()],
        };
        assert_eq!(q.category_of("Coffee"), Some(Category::C));
        assert_eq!(q.category_of("coffee"), None);
        assert_eq!(q.category_of("Coffee "), None);
    }

    #[test]
    fn fifth_option_maps_to_no_category() {
        let q = Question {
            question: "Pick one".to_string(),
            answers: vec!["1".into(), "2".into(), "3".into(), "4".into(), "5".into()],
        };
        assert_eq!(q.category_of("4"), Some(Category::D));
        assert_eq!(q.category_of("5"), None);
    }

    #[test]
    fn parse_valid_definition() {
        let content = r#"{"questions":[
            {"question":"Friday night?","answers":["Dance","Dine","Relax","Party"]},
            {"question":"Drink?","answers":["Cocktail","Wine","Coffee","Margarita"]}
        ]}"#;
        let def = QuizDefinition::parse(content).unwrap();
        assert_eq!(def.len(), 2);
        assert_eq!(def.questions[1].answers[3], "Margarita");
    }

    #[test]
    fn parse_rejects_empty_and_optionless() {
        assert!(matches!(
            QuizDefinition::parse(r#"{"questions":[]}"#),
            Err(QuizError::Definition(_))
        ));
        assert!(matches!(
            QuizDefinition::parse(r#"{"questions":[{"question":"x","answers":[]}]}"#),
            Err(QuizError::Definition(m)) if m.contains("question 0")
        ));
        assert!(QuizDefinition::parse("not json").is_err());
    }
}
