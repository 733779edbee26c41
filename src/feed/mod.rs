//! Typed view over an ORFS feed document.
//!
//! The model mirrors the JSON layout of a static feed: a header, then ordered
//! lists of restaurants, dishes and bundles. Every field is a [`Field`], so an
//! absent key, a well-typed value and a wrong-typed value stay distinguishable
//! and the rule sets can report shape problems instead of failing the load.

pub mod error;
pub mod field;
pub mod path;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

pub use error::LoadError;
pub use field::{json_kind, Field, Shape};
pub use path::FieldPath;

/// Version assumed when the header does not declare one
pub const DEFAULT_VERSION: &str = "1.0";

/// Versions that carry the marketing and narrative extensions
pub const MARKETING_VERSIONS: &[&str] = &["1.1", "1.2"];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Feed {
    pub header: Field<Header>,
    pub restaurants: Field<Vec<Field<Restaurant>>>,
    pub dishes: Field<Vec<Field<Dish>>>,
    pub bundles: Field<Vec<Field<Bundle>>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Header {
    pub version: Field<String>,
    pub timestamp: Field<i64>,
    pub provider: Field<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Restaurant {
    pub id: Field<String>,
    pub name: Field<String>,
    pub description: Field<String>,
    pub key_message_points: Field<Vec<String>>,
    pub suggested_prompt_template: Field<String>,
    pub marketing_extension: Field<MarketingExtension>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MarketingExtension {
    pub loyalty_program: Field<LoyaltyProgram>,
    pub promotional_offers: Field<Vec<Field<PromotionalOffer>>>,
    pub social_media_strategy: Field<SocialMediaStrategy>,
    pub website_cta: Field<WebsiteCta>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoyaltyProgram {
    pub program_name: Field<String>,
    pub tiers: Field<Vec<Field<LoyaltyTier>>>,
    pub promo_blurb: Field<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoyaltyTier {
    pub tier_name: Field<String>,
    pub benefits: Field<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PromotionalOffer {
    pub offer_name: Field<String>,
    pub details: Field<String>,
    pub start_time: Field<i64>,
    pub end_time: Field<i64>,
    pub marketing_copy: Field<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SocialMediaStrategy {
    pub platforms: Field<Vec<String>>,
    pub hashtags: Field<Vec<String>>,
    pub posting_schedule: Field<Value>,
    pub social_media_blurb: Field<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WebsiteCta {
    pub button_text: Field<String>,
    pub target_url: Field<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Dish {
    pub id: Field<String>,
    pub name: Field<String>,
    pub restaurant_id: Field<String>,
    pub category: Field<String>,
    pub price: Field<Value>,
    pub chef_story: Field<TranslatedString>,
    pub chef_highlight: Field<TranslatedString>,
    pub chef_anecdote: Field<TranslatedString>,
    pub culinary_philosophy: Field<TranslatedString>,
    pub seasonal_story: Field<TranslatedString>,
    pub cultural_context: Field<TranslatedString>,
    pub ingredient_story: Field<TranslatedString>,
    pub supplier_location: Field<SupplierLocation>,
    pub supplier_certification: Field<String>,
    pub farm_distance: Field<f64>,
    pub sustainability_impact: Field<String>,
    pub upgrade_options: Field<Vec<Field<UpgradeOption>>>,
    pub lto_details: Field<LtoDetails>,
    pub customer_feedback_summary: Field<String>,
}

/// Language-keyed variants of one logical text field.
///
/// Translations are kept in a `BTreeMap`, so they are visited in language
/// code order regardless of how the producer ordered them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TranslatedString {
    pub translations: Field<BTreeMap<String, Field<String>>>,
}

impl TranslatedString {
    /// Well-typed `(language, text)` pairs.
    pub fn texts(&self) -> impl Iterator<Item = (&str, &str)> {
        self.translations
            .get()
            .into_iter()
            .flat_map(|map| map.iter())
            .filter_map(|(lang, text)| text.as_str().map(|t| (lang.as_str(), t)))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SupplierLocation {
    pub detailed: Field<DetailedAddress>,
    pub compact: Field<String>,
    pub latitude: Field<f64>,
    pub longitude: Field<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DetailedAddress {
    pub street_address: Field<String>,
    pub locality: Field<String>,
    pub state: Field<String>,
    pub country: Field<String>,
    pub zipcode: Field<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpgradeOption {
    pub new_name: Field<String>,
    pub new_price: Field<f64>,
    pub marketing_copy: Field<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LtoDetails {
    pub start_time: Field<i64>,
    pub end_time: Field<i64>,
    pub marketing_copy: Field<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Bundle {
    pub bundle_id: Field<String>,
    pub id: Field<String>,
    pub bundle_name: Field<String>,
    pub included_items: Field<Vec<String>>,
    pub bundle_price: Field<f64>,
    pub bundle_marketing_copy: Field<String>,
}

field::object_shape!(
    Header,
    Restaurant,
    MarketingExtension,
    LoyaltyProgram,
    LoyaltyTier,
    PromotionalOffer,
    SocialMediaStrategy,
    WebsiteCta,
    Dish,
    TranslatedString,
    SupplierLocation,
    DetailedAddress,
    UpgradeOption,
    LtoDetails,
    Bundle,
);

/// Dish-level storytelling fields, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Narrative {
    ChefStory,
    ChefHighlight,
    ChefAnecdote,
    CulinaryPhilosophy,
    SeasonalStory,
    CulturalContext,
    IngredientStory,
}

impl Narrative {
    pub const ALL: [Narrative; 7] = [
        Narrative::ChefStory,
        Narrative::ChefHighlight,
        Narrative::ChefAnecdote,
        Narrative::CulinaryPhilosophy,
        Narrative::SeasonalStory,
        Narrative::CulturalContext,
        Narrative::IngredientStory,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Narrative::ChefStory => "chef_story",
            Narrative::ChefHighlight => "chef_highlight",
            Narrative::ChefAnecdote => "chef_anecdote",
            Narrative::CulinaryPhilosophy => "culinary_philosophy",
            Narrative::SeasonalStory => "seasonal_story",
            Narrative::CulturalContext => "cultural_context",
            Narrative::IngredientStory => "ingredient_story",
        }
    }
}

impl std::fmt::Display for Narrative {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Restaurant {
    /// Identifier used in messages: the id, or `restaurant-{index}`.
    pub fn label(&self, index: usize) -> String {
        self.id
            .non_empty()
            .map(str::to_string)
            .unwrap_or_else(|| format!("restaurant-{}", index))
    }
}

impl Dish {
    pub fn label(&self) -> &str {
        self.id.non_empty().unwrap_or("unknown")
    }

    /// Name used for mention checks and keywords, falling back to the id.
    pub fn display_name(&self) -> &str {
        self.name.non_empty().unwrap_or_else(|| self.label())
    }

    pub fn narrative(&self, kind: Narrative) -> &Field<TranslatedString> {
        match kind {
            Narrative::ChefStory => &self.chef_story,
            Narrative::ChefHighlight => &self.chef_highlight,
            Narrative::ChefAnecdote => &self.chef_anecdote,
            Narrative::CulinaryPhilosophy => &self.culinary_philosophy,
            Narrative::SeasonalStory => &self.seasonal_story,
            Narrative::CulturalContext => &self.cultural_context,
            Narrative::IngredientStory => &self.ingredient_story,
        }
    }

    pub fn narratives(&self) -> impl Iterator<Item = (Narrative, &Field<TranslatedString>)> {
        Narrative::ALL
            .into_iter()
            .map(move |kind| (kind, self.narrative(kind)))
    }
}

impl Bundle {
    pub fn label(&self) -> &str {
        self.bundle_id
            .non_empty()
            .or_else(|| self.id.non_empty())
            .unwrap_or("unknown")
    }
}

/// Top-level entity lists of a feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Restaurants,
    Dishes,
    Bundles,
}

impl Section {
    pub fn as_str(self) -> &'static str {
        match self {
            Section::Restaurants => "restaurants",
            Section::Dishes => "dishes",
            Section::Bundles => "bundles",
        }
    }
}

/// One unit of per-entity analysis, in document traversal order.
#[derive(Debug, Clone)]
pub struct Node<'a> {
    pub path: FieldPath,
    pub kind: NodeKind<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum NodeKind<'a> {
    Header(&'a Field<Header>),
    /// A section key holding something other than a list
    MalformedSection(Section, &'a Value),
    /// A list element that is not an object
    MalformedEntity(Section, &'a Value),
    Restaurant(usize, &'a Restaurant),
    Dish(usize, &'a Dish),
    Bundle(usize, &'a Bundle),
}

impl Feed {
    /// Read and decode a feed file.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let value = load_json(path)?;
        Self::from_value(&value)
    }

    pub fn from_json_str(content: &str) -> Result<Self, LoadError> {
        let value: Value = serde_json::from_str(content).map_err(|source| LoadError::Parse {
            origin: "feed document".to_string(),
            source,
        })?;
        Self::from_value(&value)
    }

    /// Decode an already-parsed document. Only a non-object root is fatal.
    pub fn from_value(value: &Value) -> Result<Self, LoadError> {
        if !value.is_object() {
            return Err(LoadError::Shape {
                found: json_kind(value),
            });
        }
        Feed::deserialize(value).map_err(|source| LoadError::Parse {
            origin: "feed document".to_string(),
            source,
        })
    }

    /// Declared version, or [`DEFAULT_VERSION`] when the header omits it.
    pub fn version(&self) -> &str {
        self.header
            .get()
            .and_then(|h| h.version.non_empty())
            .unwrap_or(DEFAULT_VERSION)
    }

    pub fn restaurants(&self) -> impl Iterator<Item = (usize, &Restaurant)> {
        present_entities(&self.restaurants)
    }

    pub fn dishes(&self) -> impl Iterator<Item = (usize, &Dish)> {
        present_entities(&self.dishes)
    }

    pub fn bundles(&self) -> impl Iterator<Item = (usize, &Bundle)> {
        present_entities(&self.bundles)
    }

    /// Flatten the document into analysis nodes: header, then restaurants,
    /// dishes and bundles in list order.
    pub fn nodes(&self) -> Vec<Node<'_>> {
        let mut nodes = vec![Node {
            path: FieldPath::root("header"),
            kind: NodeKind::Header(&self.header),
        }];

        push_section(&mut nodes, Section::Restaurants, &self.restaurants, |i, r| {
            NodeKind::Restaurant(i, r)
        });
        push_section(&mut nodes, Section::Dishes, &self.dishes, |i, d| {
            NodeKind::Dish(i, d)
        });
        push_section(&mut nodes, Section::Bundles, &self.bundles, |i, b| {
            NodeKind::Bundle(i, b)
        });

        nodes
    }
}

/// Read a file and parse it as a JSON value.
pub fn load_json(path: &Path) -> Result<Value, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| LoadError::Parse {
        origin: path.display().to_string(),
        source,
    })
}

fn present_entities<T>(section: &Field<Vec<Field<T>>>) -> impl Iterator<Item = (usize, &T)> {
    section
        .get()
        .into_iter()
        .flat_map(|items| items.iter().enumerate())
        .filter_map(|(i, item)| item.get().map(|entity| (i, entity)))
}

fn push_section<'a, T>(
    nodes: &mut Vec<Node<'a>>,
    section: Section,
    field: &'a Field<Vec<Field<T>>>,
    wrap: impl Fn(usize, &'a T) -> NodeKind<'a>,
) {
    match field {
        Field::Absent => {}
        Field::Malformed(raw) => nodes.push(Node {
            path: FieldPath::root(section.as_str()),
            kind: NodeKind::MalformedSection(section, raw),
        }),
        Field::Present(items) => {
            for (index, item) in items.iter().enumerate() {
                let path = FieldPath::root(section.as_str()).index(index);
                let kind = match item {
                    Field::Present(entity) => wrap(index, entity),
                    Field::Malformed(raw) => NodeKind::MalformedEntity(section, raw),
                    // list elements are never absent
                    Field::Absent => continue,
                };
                nodes.push(Node { path, kind });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_version_defaults_when_missing() {
        let feed = Feed::from_value(&json!({ "header": { "provider": "acme" } })).unwrap();
        assert_eq!(feed.version(), DEFAULT_VERSION);

        let feed = Feed::from_value(&json!({ "header": { "version": "1.2" } })).unwrap();
        assert_eq!(feed.version(), "1.2");
    }

    #[test]
    fn test_non_object_root_is_load_error() {
        let err = Feed::from_value(&json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, LoadError::Shape { found: "array" }));
    }

    #[test]
    fn test_invalid_json_is_load_error() {
        let err = Feed::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn test_wrong_types_do_not_fail_load() {
        let feed = Feed::from_value(&json!({
            "restaurants": "nope",
            "dishes": [ { "id": "d1", "upgrade_options": {"new_name": "x"} }, 42 ],
        }))
        .unwrap();

        assert!(feed.restaurants.is_malformed());
        let dishes: Vec<_> = feed.dishes().collect();
        assert_eq!(dishes.len(), 1);
        assert!(dishes[0].1.upgrade_options.is_malformed());
    }

    #[test]
    fn test_array_is_not_an_entity() {
        let feed = Feed::from_value(&json!({ "bundles": [ ["b1", "Combo"] ] })).unwrap();
        assert_eq!(feed.bundles().count(), 0);
        let nodes = feed.nodes();
        assert!(matches!(
            nodes[1].kind,
            NodeKind::MalformedEntity(Section::Bundles, _)
        ));
    }

    #[test]
    fn test_nodes_follow_traversal_order() {
        let feed = Feed::from_value(&json!({
            "bundles": [ { "bundle_id": "b1" } ],
            "dishes": [ { "id": "d1" }, { "id": "d2" } ],
            "restaurants": [ { "id": "r1" } ],
        }))
        .unwrap();

        let paths: Vec<String> = feed.nodes().iter().map(|n| n.path.to_string()).collect();
        assert_eq!(
            paths,
            vec!["header", "restaurants[0]", "dishes[0]", "dishes[1]", "bundles[0]"]
        );
    }

    #[test]
    fn test_translated_texts_skip_non_strings() {
        let feed = Feed::from_value(&json!({
            "dishes": [ {
                "id": "d1",
                "chef_story": { "translations": { "fr": "Bonjour.", "en": "Hello.", "de": 3 } }
            } ]
        }))
        .unwrap();

        let (_, dish) = feed.dishes().next().unwrap();
        let story = dish.chef_story.get().unwrap();
        let texts: Vec<_> = story.texts().collect();
        assert_eq!(texts, vec![("en", "Hello."), ("fr", "Bonjour.")]);
    }

    #[test]
    fn test_labels_fall_back() {
        let restaurant = Restaurant::default();
        assert_eq!(restaurant.label(3), "restaurant-3");

        let bundle: Bundle = serde_json::from_value(json!({ "id": "combo-1" })).unwrap();
        assert_eq!(bundle.label(), "combo-1");

        let dish: Dish = serde_json::from_value(json!({ "id": "d9" })).unwrap();
        assert_eq!(dish.display_name(), "d9");
    }
}
