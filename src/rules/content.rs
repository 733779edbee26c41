//! Content quality heuristics over narrative and marketing copy.
//!
//! Every text instance in the feed is tagged with a [`TextCategory`], and the
//! category decides the word-count bounds it is held to. Narrative fields are
//! checked once per translation. All findings are warnings.

use crate::feed::{Dish, Feed, FieldPath, Narrative, Node, NodeKind, Restaurant};
use crate::issue::{IssueCollector, RuleSet, ValidationIssue};
use crate::rules::text::{
    ends_with_terminal, mean_word_length, mentions, uniform_sentences, word_count,
};

/// Narrative texts longer than this must mention the dish
const DISH_MENTION_MIN_WORDS: usize = 20;

/// Texts longer than this get the readability checks
const READABILITY_MIN_WORDS: usize = 15;

const MAX_MEAN_WORD_LENGTH: f64 = 8.0;

/// Inclusive word-count limits for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordBounds {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextCategory {
    /// `chef_highlight`
    ChefHighlight,
    /// `chef_story`, `seasonal_story`, `cultural_context`
    LongNarrative,
    /// Remaining narrative fields, no length bound
    Narrative,
    /// Loyalty promo blurb and promotional offer copy
    MarketingCopy,
    SocialBlurb,
    /// One entry of `key_message_points`
    KeyMessage,
}

impl TextCategory {
    pub fn bounds(self) -> WordBounds {
        let (min, max) = match self {
            TextCategory::ChefHighlight => (Some(10), Some(50)),
            TextCategory::LongNarrative => (Some(30), None),
            TextCategory::Narrative => (None, None),
            TextCategory::MarketingCopy => (Some(5), None),
            TextCategory::SocialBlurb => (Some(10), None),
            TextCategory::KeyMessage => (Some(3), Some(10)),
        };
        WordBounds { min, max }
    }

    pub fn for_narrative(kind: Narrative) -> Self {
        match kind {
            Narrative::ChefHighlight => TextCategory::ChefHighlight,
            Narrative::ChefStory | Narrative::SeasonalStory | Narrative::CulturalContext => {
                TextCategory::LongNarrative
            }
            Narrative::ChefAnecdote | Narrative::CulinaryPhilosophy | Narrative::IngredientStory => {
                TextCategory::Narrative
            }
        }
    }

    fn is_narrative(self) -> bool {
        matches!(
            self,
            TextCategory::ChefHighlight | TextCategory::LongNarrative | TextCategory::Narrative
        )
    }
}

/// One free-text value found in the feed.
#[derive(Debug, Clone)]
pub struct TextItem<'a> {
    pub path: FieldPath,
    /// Human description used in messages, e.g. `Dish 'd1' chef_story (en)`
    pub label: String,
    pub text: &'a str,
    pub category: TextCategory,
    /// Dish name a long narrative should mention
    pub subject: Option<&'a str>,
    /// Offer copy, expected to carry `!` or `?`
    pub needs_emphasis: bool,
}

// ============================================================================
// TEXT ENUMERATION
// ============================================================================

/// Free-text values of one node, in field declaration order.
pub fn node_texts<'a>(node: &Node<'a>) -> Vec<TextItem<'a>> {
    match node.kind {
        NodeKind::Restaurant(index, restaurant) => restaurant_texts(index, restaurant, &node.path),
        NodeKind::Dish(_, dish) => dish_texts(dish, &node.path),
        _ => Vec::new(),
    }
}

fn restaurant_texts<'a>(
    index: usize,
    restaurant: &'a Restaurant,
    path: &FieldPath,
) -> Vec<TextItem<'a>> {
    let label = restaurant.label(index);
    let mut items = Vec::new();
    let mut push = |path: FieldPath, label: String, text: &'a str, category, needs_emphasis| {
        items.push(TextItem {
            path,
            label,
            text,
            category,
            subject: None,
            needs_emphasis,
        })
    };

    if let Some(points) = restaurant.key_message_points.get() {
        let points_path = path.field("key_message_points");
        for (j, point) in points.iter().enumerate() {
            push(
                points_path.index(j),
                format!("Restaurant '{}' key_message_point[{}]", label, j),
                point,
                TextCategory::KeyMessage,
                false,
            );
        }
    }

    let marketing = match restaurant.marketing_extension.get() {
        Some(m) => m,
        None => return items,
    };
    let marketing_path = path.field("marketing_extension");

    if let Some(blurb) = marketing
        .loyalty_program
        .get()
        .and_then(|p| p.promo_blurb.as_str())
    {
        push(
            marketing_path.field("loyalty_program").field("promo_blurb"),
            format!("Restaurant '{}' loyalty program promo_blurb", label),
            blurb,
            TextCategory::MarketingCopy,
            false,
        );
    }

    if let Some(offers) = marketing.promotional_offers.get() {
        let offers_path = marketing_path.field("promotional_offers");
        for (j, offer) in offers.iter().enumerate() {
            if let Some(copy) = offer.get().and_then(|o| o.marketing_copy.as_str()) {
                push(
                    offers_path.index(j).field("marketing_copy"),
                    format!("Restaurant '{}' promotional_offer[{}] marketing_copy", label, j),
                    copy,
                    TextCategory::MarketingCopy,
                    true,
                );
            }
        }
    }

    if let Some(blurb) = marketing
        .social_media_strategy
        .get()
        .and_then(|s| s.social_media_blurb.as_str())
    {
        push(
            marketing_path
                .field("social_media_strategy")
                .field("social_media_blurb"),
            format!("Restaurant '{}' social_media_blurb", label),
            blurb,
            TextCategory::SocialBlurb,
            false,
        );
    }

    items
}

fn dish_texts<'a>(dish: &'a Dish, path: &FieldPath) -> Vec<TextItem<'a>> {
    let mut items = Vec::new();
    for (kind, field) in dish.narratives() {
        let translated = match field.get() {
            Some(t) => t,
            None => continue,
        };
        let translations_path = path.field(kind.as_str()).field("translations");
        for (lang, text) in translated.texts() {
            items.push(TextItem {
                path: translations_path.field(lang),
                label: format!("Dish '{}' {} ({})", dish.label(), kind, lang),
                text,
                category: TextCategory::for_narrative(kind),
                subject: Some(dish.display_name()),
                needs_emphasis: false,
            });
        }
    }
    items
}

// ============================================================================
// CHECKS
// ============================================================================

/// Run the content heuristics over every text in the feed.
pub fn check_content_quality(feed: &Feed) -> Vec<ValidationIssue> {
    feed.nodes().iter().flat_map(check_node).collect()
}

/// Content heuristics for the texts of a single node.
pub fn check_node(node: &Node<'_>) -> Vec<ValidationIssue> {
    let mut out = IssueCollector::new(RuleSet::Content);
    for item in node_texts(node) {
        check_text(&item, &mut out);
    }
    out.into_issues()
}

fn check_text(item: &TextItem<'_>, out: &mut IssueCollector) {
    let words = word_count(item.text);
    let bounds = item.category.bounds();
    let label = &item.label;

    match (bounds.min, bounds.max) {
        (Some(min), _) if words < min => out.warning(
            &item.path,
            "content.too_short",
            format!(
                "{} is too short ({} words). Aim for at least {} words.",
                label, words, min
            ),
        ),
        (_, Some(max)) if words > max => out.warning(
            &item.path,
            "content.too_long",
            format!(
                "{} is too long ({} words). Aim for at most {} words.",
                label, words, max
            ),
        ),
        _ => {}
    }

    if item.category == TextCategory::KeyMessage {
        return;
    }

    if !item.text.trim().is_empty() && !ends_with_terminal(item.text) {
        out.warning(
            &item.path,
            "content.punctuation",
            format!("{} should end with proper punctuation.", label),
        );
    }

    if let Some(subject) = item.subject.filter(|_| item.category.is_narrative()) {
        if words > DISH_MENTION_MIN_WORDS && !mentions(item.text, subject) {
            out.warning(
                &item.path,
                "content.dish_name",
                format!(
                    "{} should mention the dish name '{}' for better SEO.",
                    label, subject
                ),
            );
        }
    }

    if words > READABILITY_MIN_WORDS {
        if let Some(mean) = mean_word_length(item.text) {
            if mean > MAX_MEAN_WORD_LENGTH {
                out.warning(
                    &item.path,
                    "content.complexity",
                    format!(
                        "{} has high average word length ({:.1}). Consider simplifying language.",
                        label, mean
                    ),
                );
            }
        }
        if uniform_sentences(item.text) {
            out.warning(
                &item.path,
                "content.sentence_variety",
                format!(
                    "{} has uniform sentence lengths. Consider varying sentence structure.",
                    label
                ),
            );
        }
    }

    if item.needs_emphasis && !item.text.contains(['!', '?']) {
        out.warning(
            &item.path,
            "content.offer_emphasis",
            format!(
                "{} may be more engaging with exclamation or question marks.",
                label
            ),
        );
    }
}
