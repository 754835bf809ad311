/// Answer tallying and category selection.
///
/// Pure functions over the caller's answers and question set. Each answered question
/// adds one to the category at the position of the chosen option; skipped answers and
/// answers not found among the question's options count toward nothing.
use crate::category::Category;
use crate::error::QuizError;
use crate::model::Question;

/// Per-category answer counts, indexed by [`Category::index`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryTally {
    counts: [u32; 4],
}

impl CategoryTally {
    pub fn from_counts(counts: [u32; 4]) -> Self {
        Self { counts }
    }

    pub fn get(&self, category: Category) -> u32 {
        self.counts[category.index()]
    }

    pub fn increment(&mut self, category: Category) {
        self.counts[category.index()] += 1;
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Most chosen category. Ties go to the earliest in A, B, C, D order, so an
    /// all-zero tally selects A.
    pub fn selected(&self) -> Category {
        let mut best = Category::A;
        for category in Category::ALL {
            if self.get(category) > self.get(best) {
                best = category;
            }
        }
        best
    }
}

/// Result of one tally pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TallyOutcome {
    pub tally: CategoryTally,
    /// Entries with no answer.
    pub skipped: usize,
    /// Entries whose answer text is not one of the question's first four options.
    pub unmatched: usize,
}

impl TallyOutcome {
    pub fn selected(&self) -> Category {
        self.tally.selected()
    }
}

/// Count answers per category.
///
/// `answers` and `questions` must be the same length; entry `i` of `answers` is
/// looked up in `questions[i]`.
pub fn tally<A: AsRef<str>>(
    answers: &[Option<A>],
    questions: &[Question],
) -> Result<TallyOutcome, QuizError> {
    if answers.len() != questions.len() {
        return Err(QuizError::LengthMismatch {
            answers: answers.len(),
            questions: questions.len(),
        });
    }

    let mut outcome = TallyOutcome {
        tally: CategoryTally::default(),
        skipped: 0,
        unmatched: 0,
    };

    for (answer, question) in answers.iter().zip(questions) {
        let Some(answer) = answer else {
            outcome.skipped += 1;
            continue;
        };
        match question.category_of(answer.as_ref()) {
            Some(category) => outcome.tally.increment(category),
            None => outcome.unmatched += 1,
        }
    }

    Ok(outcome)
}
