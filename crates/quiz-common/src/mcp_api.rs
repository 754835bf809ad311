use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::recommendation::Recommendation;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SubmitAnswersParams {
    /// One entry per question, in question order: the exact option text chosen, or null if skipped.
    pub answers: Vec<Option<String>>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetRecommendationParams {
    /// Category label such as "A" or "D".
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RecommendationView {
    pub title: String,
    pub subtitle: String,
    pub lines: Vec<String>,
    pub cta: String,
    pub icon: String,
    pub decorative_icon: String,
}

impl From<&Recommendation> for RecommendationView {
    fn from(rec: &Recommendation) -> Self {
        Self {
            title: rec.title.to_string(),
            subtitle: rec.subtitle.to_string(),
            lines: rec.lines.iter().map(|l| l.to_string()).collect(),
            cta: rec.cta.to_string(),
            icon: rec.icon.to_string(),
            decorative_icon: rec.decorative_icon.to_string(),
        }
    }
}

/// Everything the result card needs for one render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SummaryView {
    pub category: Category,
    pub recommendation: RecommendationView,
    pub question_count: usize,
    /// Whether the restart button currently carries the pulse animation.
    pub pulse: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Entry,
    Summary,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RouteResponse {
    pub route: Route,
}
