//! Keyword coverage across all marketing and narrative copy of a feed.
//!
//! Unlike the other rule sets this runs once over the whole document: it
//! gathers keywords and texts, reduces the text into token frequencies, then
//! compares the two.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::feed::{Feed, FieldPath};
use crate::issue::{IssueCollector, RuleSet, ValidationIssue};
use crate::rules::content::{node_texts, TextCategory};
use crate::rules::text::{is_stopword, words};

/// Keywords used fewer times than this are "low use"
const LOW_USE_BELOW: usize = 3;

/// Low-use keywords are only flagged when the corpus has more texts than this
const LOW_USE_MIN_TEXTS: usize = 5;

const TOP_TOKENS: usize = 10;

/// A term the feed's copy is expected to use, and where it was declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    pub text: String,
    pub path: FieldPath,
}

/// Token frequencies of a corpus, remembering first-seen order.
///
/// Frequencies skip stopwords; the per-text word sequences keep them, so
/// phrases are matched against the text as written.
#[derive(Debug, Default)]
pub struct TokenStats {
    counts: HashMap<String, usize>,
    order: Vec<String>,
    texts: Vec<Vec<String>>,
}

impl TokenStats {
    pub fn from_texts<'a>(texts: impl IntoIterator<Item = &'a str>) -> Self {
        texts
            .into_iter()
            .map(words)
            .fold(Self::default(), |mut stats, text_words| {
                for token in text_words.iter().filter(|w| !is_stopword(w)) {
                    let count = stats.counts.entry(token.clone()).or_insert(0);
                    if *count == 0 {
                        stats.order.push(token.clone());
                    }
                    *count += 1;
                }
                stats.texts.push(text_words);
                stats
            })
    }

    pub fn text_count(&self) -> usize {
        self.texts.len()
    }

    pub fn count(&self, token: &str) -> usize {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Occurrences of a word sequence. Phrases never span two texts, and a
    /// phrase made only of stopwords never matches.
    pub fn phrase_count(&self, phrase: &[String]) -> usize {
        if phrase.iter().all(|w| is_stopword(w)) {
            return 0;
        }
        match phrase {
            [single] => self.count(single),
            _ => self
                .texts
                .iter()
                .map(|text| {
                    text.windows(phrase.len())
                        .filter(|window| *window == phrase)
                        .count()
                })
                .sum(),
        }
    }

    /// Most frequent tokens, count descending, ties in first-seen order.
    pub fn top(&self, n: usize) -> Vec<TokenCount> {
        let mut ranked: Vec<TokenCount> = self
            .order
            .iter()
            .map(|token| TokenCount {
                token: token.clone(),
                count: self.count(token),
            })
            .collect();
        // stable sort keeps first-seen order among equal counts
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(n);
        ranked
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenCount {
    pub token: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordUsage {
    pub keyword: String,
    pub count: usize,
}

/// Informational summary of a keyword analysis; never affects pass/fail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeoReport {
    pub texts_analyzed: usize,
    pub top_tokens: Vec<TokenCount>,
    /// Keywords that appeared at least once, in keyword order
    pub keyword_usage: Vec<KeywordUsage>,
}

#[derive(Debug, Clone)]
pub struct SeoAnalysis {
    pub issues: Vec<ValidationIssue>,
    pub report: SeoReport,
}

/// Restaurant key messages, then dish names, lower-cased and de-duplicated.
pub fn collect_keywords(feed: &Feed) -> Vec<Keyword> {
    let mut seen = HashSet::new();
    let mut keywords = Vec::new();
    let mut add = |text: &str, path: FieldPath| {
        let text = text.to_lowercase();
        if seen.insert(text.clone()) {
            keywords.push(Keyword { text, path });
        }
    };

    for (i, restaurant) in feed.restaurants() {
        if let Some(points) = restaurant.key_message_points.get() {
            let points_path = FieldPath::root("restaurants")
                .index(i)
                .field("key_message_points");
            for (j, point) in points.iter().enumerate() {
                add(point, points_path.index(j));
            }
        }
    }

    for (i, dish) in feed.dishes() {
        add(
            dish.display_name(),
            FieldPath::root("dishes").index(i).field("name"),
        );
    }

    keywords
}

/// Every marketing and narrative text, in traversal order.
pub fn collect_corpus(feed: &Feed) -> Vec<&str> {
    feed.nodes()
        .iter()
        .flat_map(node_texts)
        .filter(|item| item.category != TextCategory::KeyMessage)
        .map(|item| item.text)
        .collect()
}

pub fn analyze_seo(feed: &Feed) -> SeoAnalysis {
    let keywords = collect_keywords(feed);
    let corpus = collect_corpus(feed);
    let stats = TokenStats::from_texts(corpus.iter().copied());
    tracing::debug!(
        keywords = keywords.len(),
        texts = stats.text_count(),
        "keyword analysis"
    );

    let mut out = IssueCollector::new(RuleSet::Seo);
    let mut keyword_usage = Vec::new();

    for keyword in &keywords {
        let uses = stats.phrase_count(&words(&keyword.text));

        if uses > 0 {
            keyword_usage.push(KeywordUsage {
                keyword: keyword.text.clone(),
                count: uses,
            });
        }

        if stats.text_count() == 0 {
            continue;
        }
        if uses == 0 {
            out.warning(
                &keyword.path,
                "seo.unused_keyword",
                format!("Key term '{}' is not used in marketing text", keyword.text),
            );
        } else if uses < LOW_USE_BELOW && stats.text_count() > LOW_USE_MIN_TEXTS {
            out.warning(
                &keyword.path,
                "seo.low_keyword_use",
                format!(
                    "Key term '{}' has low usage in marketing text ({} uses)",
                    keyword.text, uses
                ),
            );
        }
    }

    SeoAnalysis {
        issues: out.into_issues(),
        report: SeoReport {
            texts_analyzed: stats.text_count(),
            top_tokens: stats.top(TOP_TOKENS),
            keyword_usage,
        },
    }
}

pub fn check_seo(feed: &Feed) -> Vec<ValidationIssue> {
    analyze_seo(feed).issues
}
