/// MCP server for the quiz result screen.
///
/// Exposes six tools:
/// - `list_questions`: The quiz definition answers must line up with
/// - `submit_answers`: Tally answers and show the result card
/// - `get_summary`: Re-render the current result card
/// - `get_recommendation`: Look up the recommendation for a category label
/// - `get_current_recommendation`: The recommendation last published by the result screen
/// - `restart`: Return to the entry screen
use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use tokio::sync::Mutex;
use tracing::info;

use quiz_common::mcp_api::{
    GetRecommendationParams, RecommendationView, RouteResponse, SubmitAnswersParams, SummaryView,
};
use quiz_common::model::QuizDefinition;
use quiz_common::recommendation;
use quiz_common::reporter::ScoreSink;

use crate::state::AppState;

#[derive(Clone)]
pub struct QuizSummaryServer {
    quiz: Arc<QuizDefinition>,
    state: Arc<Mutex<AppState>>,
    tool_router: ToolRouter<QuizSummaryServer>,
}

impl QuizSummaryServer {
    /// A server with its own session state. Build one per client connection.
    pub fn new(quiz: Arc<QuizDefinition>, sink: Option<Arc<dyn ScoreSink>>) -> Self {
        let state = Arc::new(Mutex::new(AppState::new(Arc::clone(&quiz), sink)));
        Self {
            quiz,
            state,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl QuizSummaryServer {
    #[tool(description = "List the quiz questions and their answer options, in order. Option position maps to category: first=A, second=B, third=C, fourth=D.")]
    async fn list_questions(&self) -> Result<Json<QuizDefinition>, String> {
        Ok(Json(QuizDefinition::clone(&self.quiz)))
    }

    #[tool(description = "Submit the user's answers (one per question, exact option text or null if skipped) and show the result card with the most chosen category and its recommendation.")]
    async fn submit_answers(
        &self,
        Parameters(params): Parameters<SubmitAnswersParams>,
    ) -> Result<Json<SummaryView>, String> {
        let mut state = self.state.lock().await;
        let view = state
            .show_summary(params.answers)
            .map_err(|e| format!("submit_answers failed: {e}"))?;
        Ok(Json(view))
    }

    #[tool(description = "Re-render the current result card, including the restart button pulse state. Fails when no answers have been submitted since the last restart.")]
    async fn get_summary(&self) -> Result<Json<SummaryView>, String> {
        let mut state = self.state.lock().await;
        let view = state
            .current_summary()
            .map_err(|e| format!("get_summary failed: {e}"))?;
        Ok(Json(view))
    }

    #[tool(description = "Get the recommendation for a category label (A, B, C or D). Labels are matched exactly; anything else returns an empty recommendation.")]
    async fn get_recommendation(
        &self,
        Parameters(params): Parameters<GetRecommendationParams>,
    ) -> Result<Json<RecommendationView>, String> {
        let record = recommendation::resolve_label(&params.category);
        Ok(Json(RecommendationView::from(record)))
    }

    #[tool(description = "Get the recommendation currently published by the result screen. Empty while on the entry screen.")]
    async fn get_current_recommendation(&self) -> Result<Json<RecommendationView>, String> {
        let state = self.state.lock().await;
        Ok(Json(state.current_recommendation()))
    }

    #[tool(description = "Start a new journey: discard the submitted answers and return to the entry screen.")]
    async fn restart(&self) -> Result<Json<RouteResponse>, String> {
        info!("restart tool invoked");
        let mut state = self.state.lock().await;
        state.restart();
        Ok(Json(RouteResponse {
            route: state.route(),
        }))
    }
}

#[tool_handler]
impl ServerHandler for QuizSummaryServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "quiz-summary".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Quiz result screen MCP server. Call list_questions to see the quiz, then \
submit_answers with one entry per question (the exact option text, or null if skipped) to get \
the matched category and recommendation. get_summary re-renders the card, get_recommendation \
looks up a category directly, and restart returns to the entry screen."
                    .to_string(),
            ),
        }
    }
}
