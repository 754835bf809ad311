/// Static recommendation content per category, plus the change-aware publisher that
/// keeps the "current recommendation" slot up to date.
use tokio::sync::watch;
use tracing::debug;

use crate::category::Category;
use crate::change::ChangeGuard;

/// Pre-authored promotional content for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Recommendation {
    /// Persona headline.
    pub title: &'static str,
    /// Venue or brand name.
    pub subtitle: &'static str,
    pub lines: &'static [&'static str],
    /// Call to action.
    pub cta: &'static str,
    pub icon: &'static str,
    pub decorative_icon: &'static str,
}

const EMPTY: Recommendation = Recommendation {
    title: "",
    subtitle: "",
    lines: &[],
    cta: "",
    icon: "",
    decorative_icon: "",
};

// Indexed by Category::index.
static RECOMMENDATIONS: [Recommendation; 4] = [
    Recommendation {
        title: "The Groove Lover",
        subtitle: "YAMAS",
        lines: &[
            "You're all about good vibes, great music, and creamy Baileys cocktails.",
            "Your perfect match: Yamas: where rhythm meets indulgence.",
        ],
        cta: "Complimentary Baileys cocktail treat",
        icon: "🎵",
        decorative_icon: "♪",
    },
    Recommendation {
        title: "The Indulgent Diner",
        subtitle: "ONZA",
        lines: &[
            "You enjoy life's finer things curated meals, laughter, and sophistication.",
            "Your Baileys match: Onza, the home of fine dining and decadent treats.",
        ],
        cta: "Baileys dessert or cocktail pairing",
        icon: "🍽️",
        decorative_icon: "✦",
    },
    Recommendation {
        title: "The Chill Connoisseur",
        subtitle: "RAFAELO",
        lines: &[
            "You love cozy moments, great conversations, and sweet indulgences",
            "Your match: Rafaelo, where Baileys meets coffee, ice cream, and milkshakes.",
        ],
        cta: "Baileys coffee or ice cream treat.",
        icon: "☕",
        decorative_icon: "❋",
    },
    Recommendation {
        title: "Your matched Cocktail",
        subtitle: "DON MARGARITA",
        lines: &["Classic, zesty, and always a crowd-pleaser."],
        cta: "👉 Cheers to your DON MARGARITA choice!",
        icon: "🍹",
        decorative_icon: "✧",
    },
];

pub fn resolve(category: Category) -> &'static Recommendation {
    &RECOMMENDATIONS[category.index()]
}

/// Resolve a raw category label. Anything other than "A".."D" gets the empty record.
pub fn resolve_label(label: &str) -> &'static Recommendation {
    match label.parse::<Category>() {
        Ok(category) => resolve(category),
        Err(_) => &EMPTY,
    }
}

/// Publishes the record for the selected category into a watch slot, but only when
/// the category differs from the last one published.
pub struct RecommendationNotifier {
    guard: ChangeGuard<Category>,
    slot: watch::Sender<Option<&'static Recommendation>>,
}

impl RecommendationNotifier {
    pub fn new() -> Self {
        let (slot, _) = watch::channel(None);
        Self {
            guard: ChangeGuard::new(),
            slot,
        }
    }

    /// Receiver that always holds the most recently published record.
    pub fn subscribe(&self) -> watch::Receiver<Option<&'static Recommendation>> {
        self.slot.subscribe()
    }

    /// Resolve `category` and publish if it changed. Returns the resolved record.
    pub fn update(&mut self, category: Category) -> &'static Recommendation {
        let record = resolve(category);
        if self.guard.admit(&category) {
            debug!(%category, title = record.title, "publishing recommendation");
            self.slot.send_replace(Some(record));
        }
        record
    }
}

impl Default for RecommendationNotifier {
    fn default() -> Self {
        Self::new()
    }
}
