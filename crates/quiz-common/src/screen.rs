/// One mounted instance of the quiz result screen.
///
/// Each render re-tallies the answers from scratch, publishes the recommendation and
/// reports the category when it changed since the previous render, and samples the
/// pulse flag. Dropping the screen tears it down and stops the pulse timer.
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::info;

use crate::error::QuizError;
use crate::mcp_api::{RecommendationView, SummaryView};
use crate::model::Question;
use crate::pulse::{PulseTimer, PULSE_PERIOD};
use crate::recommendation::{Recommendation, RecommendationNotifier};
use crate::reporter::{ResultReporter, ScoreSink};
use crate::tally::tally;

pub struct SummaryScreen {
    notifier: RecommendationNotifier,
    reporter: Option<ResultReporter>,
    pulse: PulseTimer,
}

impl SummaryScreen {
    /// Mount with the standard pulse period. Must be called from within a tokio runtime.
    pub fn mount(sink: Option<Arc<dyn ScoreSink>>) -> Self {
        Self::mount_with_period(sink, PULSE_PERIOD)
    }

    pub(crate) fn mount_with_period(
        sink: Option<Arc<dyn ScoreSink>>,
        pulse_period: Duration,
    ) -> Self {
        Self {
            notifier: RecommendationNotifier::new(),
            reporter: sink.map(ResultReporter::new),
            pulse: PulseTimer::start(pulse_period),
        }
    }

    /// Slot holding the recommendation for the most recently selected category.
    pub fn current_recommendation(&self) -> watch::Receiver<Option<&'static Recommendation>> {
        self.notifier.subscribe()
    }

    pub fn reporter(&self) -> Option<&ResultReporter> {
        self.reporter.as_ref()
    }

    pub fn render<A: AsRef<str>>(
        &mut self,
        answers: &[Option<A>],
        questions: &[Question],
    ) -> Result<SummaryView, QuizError> {
        let outcome = tally(answers, questions)?;
        let category = outcome.selected();

        let record = self.notifier.update(category);
        if let Some(reporter) = self.reporter.as_mut() {
            if reporter.report_if_changed(category).is_some() {
                info!(
                    %category,
                    skipped = outcome.skipped,
                    unmatched = outcome.unmatched,
                    "quiz result reported"
                );
            }
        }

        Ok(SummaryView {
            category,
            recommendation: RecommendationView::from(record),
            question_count: answers.len(),
            pulse: self.pulse.is_pulsing(),
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::future::{self, BoxFuture, FutureExt};

    use super::*;
    use crate::category::Category;
    use crate::recommendation::resolve;
    use crate::reporter::{ReportError, ScoreResponse, ScoreUpdate};

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

    fn questions() -> Vec<Question> {
        ["Night out?", "Treat?", "Drink?"]
            .iter()
            .map(|q| Question {
                question: q.to_string(),
                answers: vec!["Music".into(), "Dinner".into(), "Coffee".into(), "Tequila".into()],
            })
            .collect()
    }

    #[tokio::test]
    async fn render_exposes_result_card() {
        let mut screen = SummaryScreen::mount(None);
        let view = screen
            .render(&[Some("Coffee"), Some("Coffee"), Some("Music")], &questions())
            .unwrap();

        assert_eq!(view.category, Category::C);
        assert_eq!(view.recommendation.subtitle, "RAFAELO");
        assert_eq!(view.recommendation.lines.len(), 2);
        assert_eq!(view.question_count, 3);
        assert!(!view.pulse);
    }

    #[tokio::test]
    async fn rerender_with_same_winner_does_not_report_again() {
        let sink = Arc::new(CountingSink::default());
        let mut screen = SummaryScreen::mount(Some(sink.clone() as Arc<dyn ScoreSink>));
        let qs = questions();

        screen.render(&[Some("Music"), None, None], &qs).unwrap();
        screen.render(&[Some("Music"), Some("Music"), None], &qs).unwrap();
        screen.render(&[Some("Dinner"), Some("Dinner"), None], &qs).unwrap();
        screen.render(&[Some("Dinner"), Some("Dinner"), Some("Music")], &qs).unwrap();

        assert_eq!(*sink.sent.lock().unwrap(), vec![Category::A, Category::B]);
    }

    #[tokio::test]
    async fn render_publishes_current_recommendation() {
        let mut screen = SummaryScreen::mount(None);
        let rx = screen.current_recommendation();

        screen
            .render(&[Some("Tequila"), Some("Tequila"), None], &questions())
            .unwrap();
        assert_eq!(*rx.borrow(), Some(resolve(Category::D)));
    }

    #[tokio::test]
    async fn mismatched_lengths_fail_without_reporting() {
        let sink = Arc::new(CountingSink::default());
        let mut screen = SummaryScreen::mount(Some(sink.clone() as Arc<dyn ScoreSink>));

        let err = screen.render(&[Some("Music")], &questions()).unwrap_err();
        assert!(matches!(err, QuizError::LengthMismatch { .. }));
        assert!(sink.sent.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn pulse_flag_follows_timer() {
        let mut screen = SummaryScreen::mount(None);
        let answers: Vec<Option<String>> = vec![None, None, None];

        assert!(!screen.render(&answers, &questions()).unwrap().pulse);
        tokio::time::sleep(PULSE_PERIOD + Duration::from_millis(10)).await;
        assert!(screen.render(&answers, &questions()).unwrap().pulse);
    }
}
