/// Navigation and answer state for one client session.
///
/// The session is either on the entry screen or on the summary screen. The summary
/// screen stays mounted across resubmissions so an unchanged result is not reported
/// twice; restarting unmounts it and forgets the answers.
use std::sync::Arc;

use tracing::info;

use quiz_common::error::QuizError;
use tokio::sync::watch;

use quiz_common::mcp_api::{RecommendationView, Route, SummaryView};
use quiz_common::model::{QuizDefinition, UserAnswers};
use quiz_common::recommendation::Recommendation;
use quiz_common::reporter::ScoreSink;
use quiz_common::screen::SummaryScreen;

use crate::error::AppError;

pub struct AppState {
    quiz: Arc<QuizDefinition>,
    sink: Option<Arc<dyn ScoreSink>>,
    route: Route,
    answers: UserAnswers,
    screen: Option<SummaryScreen>,
    recommendation: Option<watch::Receiver<Option<&'static Recommendation>>>,
}

impl AppState {
    pub fn new(quiz: Arc<QuizDefinition>, sink: Option<Arc<dyn ScoreSink>>) -> Self {
        Self {
            quiz,
            sink,
            route: Route::Entry,
            answers: Vec::new(),
            screen: None,
            recommendation: None,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    /// Store `answers` and render the summary, mounting the screen if needed.
    ///
    /// A submission whose length does not match the quiz is rejected before anything
    /// changes.
    pub fn show_summary(&mut self, answers: UserAnswers) -> Result<SummaryView, AppError> {
        if answers.len() != self.quiz.len() {
            return Err(QuizError::LengthMismatch {
                answers: answers.len(),
                questions: self.quiz.len(),
            }
            .into());
        }

        let screen = self.screen.get_or_insert_with(|| {
            let screen = SummaryScreen::mount(self.sink.clone());
            self.recommendation = Some(screen.current_recommendation());
            screen
        });
        let view = screen.render(&answers, &self.quiz.questions)?;

        self.answers = answers;
        self.route = Route::Summary;
        Ok(view)
    }

    /// Re-render the mounted summary screen with the stored answers.
    pub fn current_summary(&mut self) -> Result<SummaryView, AppError> {
        let screen = self.screen.as_mut().ok_or(AppError::NoSummary)?;
        Ok(screen.render(&self.answers, &self.quiz.questions)?)
    }

    /// Record last published by the mounted screen; empty on the entry screen.
    pub fn current_recommendation(&self) -> RecommendationView {
        let record = self
            .recommendation
            .as_ref()
            .and_then(|rx| *rx.borrow())
            .copied()
            .unwrap_or_default();
        RecommendationView::from(&record)
    }

    /// Go back to the entry screen, dropping the summary screen and the answers.
    pub fn restart(&mut self) -> Route {
        if self.screen.take().is_some() {
            info!("summary screen torn down");
        }
        self.recommendation = None;
        self.answers.clear();
        self.route = Route::Entry;
        self.route
    }
}

#[cfg(test)]
mod tests {
    use futures::future::{self, BoxFuture, FutureExt};
    use quiz_common::category::Category;
    use quiz_common::model::Question;
    use quiz_common::reporter::{ReportError, ScoreResponse, ScoreUpdate};

    use super::*;

    #[derive(Default)]
    struct CountingSink {
        sent: std::sync::Mutex<Vec<Category>>,
    }

    impl ScoreSink for CountingSink {
        fn submit(
            &self,
            update: ScoreUpdate,
        ) -> BoxFuture<'static, Result<ScoreResponse, ReportError>> {
            self.sent.lock().unwrap().push(update.score);
            future::ready(Ok(ScoreResponse(serde_json::Value::Null))).boxed()
        }
    }

    fn quiz() -> Arc<QuizDefinition> {
        Arc::new(QuizDefinition {
            questions: (0..2)
                .map(|i| Question {
                    question: format!("q{i}"),
                    answers: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                })
                .collect(),
        })
    }

    fn answers(picks: [Option<&str>; 2]) -> UserAnswers {
        picks.iter().map(|p| p.map(str::to_string)).collect()
    }

    #[tokio::test]
    async fn starts_on_entry_with_no_summary() {
        let mut state = AppState::new(quiz(), None);
        assert_eq!(state.route(), Route::Entry);
        assert!(matches!(state.current_summary(), Err(AppError::NoSummary)));
    }

    #[tokio::test]
    async fn submit_navigates_to_summary() {
        let mut state = AppState::new(quiz(), None);
        let view = state.show_summary(answers([Some("b"), Some("b")])).unwrap();
        assert_eq!(view.category, Category::B);
        assert_eq!(view.question_count, 2);
        assert_eq!(state.route(), Route::Summary);

        let again = state.current_summary().unwrap();
        assert_eq!(again.category, Category::B);
    }

    #[tokio::test]
    async fn wrong_length_submission_changes_nothing() {
        let mut state = AppState::new(quiz(), None);
        let err = state.show_summary(vec![Some("a".to_string())]).unwrap_err();
        assert!(matches!(
            err,
            AppError::Quiz(QuizError::LengthMismatch {
                answers: 1,
                questions: 2
            })
        ));
        assert_eq!(state.route(), Route::Entry);
    }

    #[tokio::test]
    async fn restart_is_idempotent() {
        let mut state = AppState::new(quiz(), None);
        state.show_summary(answers([Some("c"), None])).unwrap();

        for _ in 0..3 {
            assert_eq!(state.restart(), Route::Entry);
            assert_eq!(state.route(), Route::Entry);
            assert!(matches!(state.current_summary(), Err(AppError::NoSummary)));
        }
    }

    #[tokio::test]
    async fn recommendation_slot_follows_winner_changes() {
        let mut state = AppState::new(quiz(), None);
        assert_eq!(state.current_recommendation().title, "");

        state.show_summary(answers([Some("a"), None])).unwrap();
        assert_eq!(state.current_recommendation().subtitle, "YAMAS");
        let slot = state.recommendation.as_mut().unwrap();
        assert!(slot.has_changed().unwrap());
        slot.borrow_and_update();

        state.show_summary(answers([Some("a"), Some("a")])).unwrap();
        state.current_summary().unwrap();
        assert!(!state.recommendation.as_ref().unwrap().has_changed().unwrap());

        state.show_summary(answers([Some("c"), Some("c")])).unwrap();
        assert!(state.recommendation.as_ref().unwrap().has_changed().unwrap());
        assert_eq!(state.current_recommendation().subtitle, "RAFAELO");

        state.restart();
        assert!(state.recommendation.is_none());
        assert_eq!(
            state.current_recommendation(),
            RecommendationView::from(&Recommendation::default())
        );
    }

    #[tokio::test]
    async fn reports_per_mount_and_per_change() {
        let sink = Arc::new(CountingSink::default());
        let mut state = AppState::new(quiz(), Some(sink.clone() as Arc<dyn ScoreSink>));

        state.show_summary(answers([Some("a"), None])).unwrap();
        state.show_summary(answers([Some("a"), Some("a")])).unwrap();
        state.current_summary().unwrap();
        state.show_summary(answers([Some("d"), Some("d")])).unwrap();

        state.restart();
        state.show_summary(answers([Some("d"), None])).unwrap();

        assert_eq!(
            *sink.sent.lock().unwrap(),
            vec![Category::A, Category::D, Category::D]
        );
    }
}
