//! Structural rule set: per-entity shape, range and ordering checks.
//!
//! Every predicate is independent. An entity violating several rules gets one
//! issue per rule, and nothing short-circuits. Optional sections that are
//! absent are never reported; sections that are present are checked in full.
//! Where a section lists required members (social platforms/hashtags, bundle
//! name/items/price, LTO start/end), those members are required whenever the
//! section itself is present.

use std::ops::RangeInclusive;
use std::sync::LazyLock;

use regex::Regex;

use crate::feed::{
    json_kind, Bundle, Dish, Feed, Field, FieldPath, Header, LtoDetails, MarketingExtension,
    Node, NodeKind, PromotionalOffer, Restaurant, SocialMediaStrategy, SupplierLocation,
    WebsiteCta,
};
use crate::issue::{IssueCollector, RuleSet, ValidationIssue};

// ============================================================================
// RULE PARAMETERS
// ============================================================================

/// Placeholders every `suggested_prompt_template` must mention
pub const PROMPT_PLACEHOLDERS: &[&str] = &["restaurant_name", "key_message_points", "length"];

const LANGUAGE_CODE_PATTERN: &str = r"^[a-z]{2}$";

const LATITUDE_RANGE: RangeInclusive<f64> = -90.0..=90.0;
const LONGITUDE_RANGE: RangeInclusive<f64> = -180.0..=180.0;

/// Farm distances above this are suspicious but not invalid
const FARM_DISTANCE_LIMIT: f64 = 500.0;

const MIN_CTA_BUTTON_CHARS: usize = 2;
const MIN_CERTIFICATION_CHARS: usize = 2;
const MIN_SUSTAINABILITY_CHARS: usize = 10;
const MIN_LTO_COPY_CHARS: usize = 10;
const MIN_FEEDBACK_CHARS: usize = 5;
const MIN_BUNDLE_COPY_CHARS: usize = 10;

static LANGUAGE_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(LANGUAGE_CODE_PATTERN).expect("valid language code pattern"));

fn is_language_code(code: &str) -> bool {
    LANGUAGE_CODE_RE.is_match(code)
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Run every structural rule over the document, in traversal order.
pub fn check_structure(feed: &Feed) -> Vec<ValidationIssue> {
    feed.nodes().iter().flat_map(check_node).collect()
}

/// Structural rules for a single analysis node.
pub fn check_node(node: &Node<'_>) -> Vec<ValidationIssue> {
    let mut out = IssueCollector::new(RuleSet::Structure);
    let path = &node.path;

    match node.kind {
        NodeKind::Header(header) => check_header(header, path, &mut out),
        NodeKind::MalformedSection(section, raw) => out.error(
            path,
            "feed.section",
            format!(
                "'{}' must be a list, found {}",
                section.as_str(),
                json_kind(raw)
            ),
        ),
        NodeKind::MalformedEntity(section, raw) => out.error(
            path,
            "feed.entity",
            format!(
                "Entries of '{}' must be objects, found {}",
                section.as_str(),
                json_kind(raw)
            ),
        ),
        NodeKind::Restaurant(index, restaurant) => {
            check_restaurant(index, restaurant, path, &mut out)
        }
        NodeKind::Dish(_, dish) => check_dish(dish, path, &mut out),
        NodeKind::Bundle(_, bundle) => check_bundle(bundle, path, &mut out),
    }

    out.into_issues()
}

// ============================================================================
// SHARED HELPERS
// ============================================================================

/// Yield the section if it is a well-formed object; report it if it is not.
fn object<'a, T>(
    field: &'a Field<T>,
    path: &FieldPath,
    rule_id: &str,
    what: &str,
    out: &mut IssueCollector,
) -> Option<&'a T> {
    match field {
        Field::Absent => None,
        Field::Present(value) => Some(value),
        Field::Malformed(raw) => {
            out.error(
                path,
                rule_id,
                format!("{} must be an object, found {}", what, json_kind(raw)),
            );
            None
        }
    }
}

/// True when an optional text is present but shorter than `min_chars`, or
/// present with the wrong type.
fn short_text(field: &Field<String>, min_chars: usize) -> bool {
    match field {
        Field::Absent => false,
        Field::Present(text) => text.chars().count() < min_chars,
        Field::Malformed(_) => true,
    }
}

// ============================================================================
// HEADER
// ============================================================================

fn check_header(header: &Field<Header>, path: &FieldPath, out: &mut IssueCollector) {
    let header = match object(header, path, "header.format", "header", out) {
        Some(h) => h,
        None => return,
    };

    match &header.version {
        Field::Absent => {}
        Field::Present(version) if !version.trim().is_empty() => {}
        _ => out.error(
            &path.field("version"),
            "header.version",
            "header.version must be a non-empty string",
        ),
    }
}

// ============================================================================
// RESTAURANTS
// ============================================================================

fn check_restaurant(
    index: usize,
    restaurant: &Restaurant,
    path: &FieldPath,
    out: &mut IssueCollector,
) {
    let label = restaurant.label(index);

    match &restaurant.key_message_points {
        Field::Absent => {}
        Field::Present(points) if !points.is_empty() => {}
        _ => out.error(
            &path.field("key_message_points"),
            "restaurant.key_message_points",
            format!(
                "Restaurant '{}' has empty or invalid key_message_points",
                label
            ),
        ),
    }

    let template_path = path.field("suggested_prompt_template");
    match &restaurant.suggested_prompt_template {
        Field::Absent => {}
        Field::Present(template) if !template.trim().is_empty() => {
            for name in PROMPT_PLACEHOLDERS {
                let token = format!("{{{}}}", name);
                if !template.contains(&token) {
                    out.error(
                        &template_path,
                        "restaurant.prompt_placeholder",
                        format!(
                            "Restaurant '{}' suggested_prompt_template should include {}",
                            label, token
                        ),
                    );
                }
            }
        }
        _ => out.error(
            &template_path,
            "restaurant.prompt_template",
            format!(
                "Restaurant '{}' has empty or invalid suggested_prompt_template",
                label
            ),
        ),
    }

    let marketing_path = path.field("marketing_extension");
    if let Some(marketing) = object(
        &restaurant.marketing_extension,
        &marketing_path,
        "marketing.extension",
        &format!("Restaurant '{}' marketing_extension", label),
        out,
    ) {
        check_marketing(&label, marketing, &marketing_path, out);
    }
}

fn check_marketing(
    label: &str,
    marketing: &MarketingExtension,
    path: &FieldPath,
    out: &mut IssueCollector,
) {
    let loyalty_path = path.field("loyalty_program");
    if let Some(program) = object(
        &marketing.loyalty_program,
        &loyalty_path,
        "marketing.loyalty",
        &format!("Restaurant '{}' loyalty_program", label),
        out,
    ) {
        let tiers_path = loyalty_path.field("tiers");
        match &program.tiers {
            Field::Absent => {}
            Field::Present(tiers) if !tiers.is_empty() => {
                for (i, tier) in tiers.iter().enumerate() {
                    let tier_path = tiers_path.index(i);
                    match tier {
                        Field::Present(t) if t.tier_name.non_empty().is_some() => {}
                        Field::Present(_) => out.error(
                            &tier_path,
                            "marketing.loyalty_tier",
                            format!(
                                "Restaurant '{}' loyalty tier {} is missing tier_name",
                                label, i
                            ),
                        ),
                        _ => out.error(
                            &tier_path,
                            "marketing.loyalty_tier",
                            format!("Restaurant '{}' loyalty tier {} must be an object", label, i),
                        ),
                    }
                }
            }
            _ => out.error(
                &tiers_path,
                "marketing.loyalty_tiers",
                format!("Restaurant '{}' has invalid loyalty program tiers", label),
            ),
        }
    }

    let offers_path = path.field("promotional_offers");
    match &marketing.promotional_offers {
        Field::Absent => {}
        Field::Malformed(raw) => out.error(
            &offers_path,
            "marketing.offers",
            format!(
                "Restaurant '{}' promotional_offers must be a list, found {}",
                label,
                json_kind(raw)
            ),
        ),
        Field::Present(offers) => {
            for (j, offer) in offers.iter().enumerate() {
                let offer_path = offers_path.index(j);
                if let Some(offer) = object(
                    offer,
                    &offer_path,
                    "marketing.offer",
                    &format!("Restaurant '{}' promotional_offer[{}]", label, j),
                    out,
                ) {
                    check_offer(offer, &offer_path, out);
                }
            }
        }
    }

    let social_path = path.field("social_media_strategy");
    if let Some(social) = object(
        &marketing.social_media_strategy,
        &social_path,
        "marketing.social",
        &format!("Restaurant '{}' social_media_strategy", label),
        out,
    ) {
        check_social(label, social, &social_path, out);
    }

    let cta_path = path.field("website_cta");
    if let Some(cta) = object(
        &marketing.website_cta,
        &cta_path,
        "marketing.cta",
        &format!("Restaurant '{}' website_cta", label),
        out,
    ) {
        check_cta(label, cta, &cta_path, out);
    }
}

fn check_offer(offer: &PromotionalOffer, path: &FieldPath, out: &mut IssueCollector) {
    let name = offer.offer_name.non_empty().unwrap_or("unnamed");

    for (field, value) in [("start_time", &offer.start_time), ("end_time", &offer.end_time)] {
        if value.is_malformed() {
            out.error(
                &path.field(field),
                "marketing.offer_time",
                format!(
                    "Promotional offer '{}' {} must be integer epoch seconds",
                    name, field
                ),
            );
        }
    }

    if let (Some(start), Some(end)) = (offer.start_time.get(), offer.end_time.get()) {
        if start > end {
            out.error(
                path,
                "marketing.offer_window",
                format!(
                    "Promotional offer '{}' has end_time before start_time ({} < {})",
                    name, end, start
                ),
            );
        }
    }
}

fn check_social(
    label: &str,
    social: &SocialMediaStrategy,
    path: &FieldPath,
    out: &mut IssueCollector,
) {
    for (field, list) in [("platforms", &social.platforms), ("hashtags", &social.hashtags)] {
        match list {
            Field::Present(items) if !items.is_empty() => {}
            _ => out.error(
                &path.field(field),
                "marketing.social_list",
                format!(
                    "Restaurant '{}' social_media_strategy must include non-empty {} list",
                    label, field
                ),
            ),
        }
    }

    if let Some(hashtags) = social.hashtags.get() {
        let hashtags_path = path.field("hashtags");
        for (k, hashtag) in hashtags.iter().enumerate() {
            if !hashtag.starts_with('#') {
                out.error(
                    &hashtags_path.index(k),
                    "marketing.hashtag",
                    format!(
                        "Restaurant '{}' hashtag '{}' should start with #",
                        label, hashtag
                    ),
                );
            }
        }
    }
}

fn check_cta(label: &str, cta: &WebsiteCta, path: &FieldPath, out: &mut IssueCollector) {
    if short_text(&cta.button_text, MIN_CTA_BUTTON_CHARS) {
        out.error(
            &path.field("button_text"),
            "marketing.cta_button",
            format!("Restaurant '{}' website_cta button_text is too short", label),
        );
    }

    match &cta.target_url {
        Field::Absent => {}
        Field::Present(url) if url.starts_with("http") => {}
        _ => out.error(
            &path.field("target_url"),
            "marketing.cta_url",
            format!(
                "Restaurant '{}' website_cta target_url should start with http:// or https://",
                label
            ),
        ),
    }
}

// ============================================================================
// DISHES
// ============================================================================

fn check_dish(dish: &Dish, path: &FieldPath, out: &mut IssueCollector) {
    let label = dish.label();

    for (kind, field) in dish.narratives() {
        let narrative_path = path.field(kind.as_str());
        let translated = match field {
            Field::Absent => continue,
            Field::Present(translated) if translated.translations.is_set() => translated,
            _ => {
                out.error(
                    &narrative_path,
                    "dish.narrative_format",
                    format!(
                        "Dish '{}' has invalid {} format - must use TranslatedString format",
                        label, kind
                    ),
                );
                continue;
            }
        };

        let translations_path = narrative_path.field("translations");
        match &translated.translations {
            Field::Present(map) if !map.is_empty() => {
                for (lang, text) in map {
                    if !is_language_code(lang) {
                        out.error(
                            &translations_path.field(lang),
                            "dish.language_code",
                            format!(
                                "Dish '{}' has invalid language code '{}' in {}",
                                label, lang, kind
                            ),
                        );
                    }
                    if text.is_malformed() {
                        out.error(
                            &translations_path.field(lang),
                            "dish.narrative_text",
                            format!(
                                "Dish '{}' {} translation '{}' must be a string",
                                label, kind, lang
                            ),
                        );
                    }
                }
            }
            _ => out.error(
                &translations_path,
                "dish.narrative_translations",
                format!(
                    "Dish '{}' has empty or invalid translations in {}",
                    label, kind
                ),
            ),
        }
    }

    let location_path = path.field("supplier_location");
    if let Some(location) = object(
        &dish.supplier_location,
        &location_path,
        "dish.supplier_location",
        &format!("Dish '{}' supplier_location", label),
        out,
    ) {
        check_supplier_location(label, location, &location_path, out);
    }

    if short_text(&dish.supplier_certification, MIN_CERTIFICATION_CHARS) {
        out.error(
            &path.field("supplier_certification"),
            "dish.supplier_certification",
            format!("Dish '{}' has invalid supplier_certification: too short", label),
        );
    }

    let distance_path = path.field("farm_distance");
    match &dish.farm_distance {
        Field::Absent => {}
        Field::Present(distance) if *distance <= 0.0 => out.error(
            &distance_path,
            "dish.farm_distance",
            format!(
                "Dish '{}' has invalid farm_distance: {}. Must be a positive number.",
                label, distance
            ),
        ),
        Field::Present(distance) if *distance > FARM_DISTANCE_LIMIT => out.warning(
            &distance_path,
            "dish.farm_distance_large",
            format!(
                "Dish '{}' has a large farm_distance: {}. Verify if this is correct.",
                label, distance
            ),
        ),
        Field::Present(_) => {}
        Field::Malformed(raw) => out.error(
            &distance_path,
            "dish.farm_distance",
            format!(
                "Dish '{}' has invalid farm_distance: expected a positive number, found {}",
                label,
                json_kind(raw)
            ),
        ),
    }

    if short_text(&dish.sustainability_impact, MIN_SUSTAINABILITY_CHARS) {
        out.error(
            &path.field("sustainability_impact"),
            "dish.sustainability_impact",
            format!(
                "Dish '{}' has invalid sustainability_impact: too short. Aim for at least {} characters.",
                label, MIN_SUSTAINABILITY_CHARS
            ),
        );
    }

    check_upgrades(dish, label, &path.field("upgrade_options"), out);

    let lto_path = path.field("lto_details");
    if let Some(lto) = object(
        &dish.lto_details,
        &lto_path,
        "dish.lto",
        &format!("Dish '{}' lto_details", label),
        out,
    ) {
        check_lto(label, lto, &lto_path, out);
    }

    if short_text(&dish.customer_feedback_summary, MIN_FEEDBACK_CHARS) {
        out.error(
            &path.field("customer_feedback_summary"),
            "dish.feedback_summary",
            format!(
                "Dish '{}' has invalid customer_feedback_summary: too short",
                label
            ),
        );
    }
}

fn check_supplier_location(
    label: &str,
    location: &SupplierLocation,
    path: &FieldPath,
    out: &mut IssueCollector,
) {
    check_coordinate(
        label,
        "latitude",
        &location.latitude,
        LATITUDE_RANGE,
        path,
        "dish.latitude",
        out,
    );
    check_coordinate(
        label,
        "longitude",
        &location.longitude,
        LONGITUDE_RANGE,
        path,
        "dish.longitude",
        out,
    );

    let detailed_path = path.field("detailed");
    if let Some(detailed) = object(
        &location.detailed,
        &detailed_path,
        "dish.supplier_address",
        &format!("Dish '{}' supplier_location.detailed", label),
        out,
    ) {
        let missing: Vec<&str> = [
            ("street_address", &detailed.street_address),
            ("locality", &detailed.locality),
            ("state", &detailed.state),
            ("country", &detailed.country),
        ]
        .into_iter()
        .filter(|(_, value)| value.non_empty().is_none())
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            out.error(
                &detailed_path,
                "dish.supplier_address",
                format!(
                    "Dish '{}' supplier_location.detailed is missing: {}",
                    label,
                    missing.join(", ")
                ),
            );
        }
    }
}

fn check_coordinate(
    label: &str,
    name: &str,
    value: &Field<f64>,
    range: RangeInclusive<f64>,
    path: &FieldPath,
    rule_id: &str,
    out: &mut IssueCollector,
) {
    let message = match value {
        Field::Absent => return,
        Field::Present(v) if range.contains(v) => return,
        Field::Present(v) => format!(
            "Dish '{}' has invalid {} in supplier_location: {}",
            label, name, v
        ),
        Field::Malformed(raw) => format!(
            "Dish '{}' {} in supplier_location must be a number, found {}",
            label,
            name,
            json_kind(raw)
        ),
    };
    out.error(&path.field(name), rule_id, message);
}

fn check_upgrades(dish: &Dish, label: &str, path: &FieldPath, out: &mut IssueCollector) {
    let options = match &dish.upgrade_options {
        Field::Absent => return,
        Field::Present(options) => options,
        Field::Malformed(_) => {
            out.error(
                path,
                "dish.upgrade_options",
                format!("Dish '{}' upgrade_options must be an array", label),
            );
            return;
        }
    };

    for (i, option) in options.iter().enumerate() {
        let option_path = path.index(i);
        let option = match object(
            option,
            &option_path,
            "dish.upgrade_option",
            &format!("Dish '{}' upgrade_options[{}]", label, i),
            out,
        ) {
            Some(o) => o,
            None => continue,
        };

        if option.new_name.non_empty().is_none() {
            out.error(
                &option_path.field("new_name"),
                "dish.upgrade_name",
                format!("Dish '{}' upgrade_options[{}] is missing new_name", label, i),
            );
        }
        if option.new_price.is_malformed() {
            out.error(
                &option_path.field("new_price"),
                "dish.upgrade_price",
                format!("Dish '{}' upgrade_options[{}] has invalid new_price", label, i),
            );
        }
        if option.marketing_copy.non_empty().is_none() {
            out.error(
                &option_path.field("marketing_copy"),
                "dish.upgrade_copy",
                format!(
                    "Dish '{}' upgrade_options[{}] is missing marketing_copy",
                    label, i
                ),
            );
        }
    }
}

fn check_lto(label: &str, lto: &LtoDetails, path: &FieldPath, out: &mut IssueCollector) {
    for (field, value) in [("start_time", &lto.start_time), ("end_time", &lto.end_time)] {
        if value.get().is_none() {
            out.error(
                &path.field(field),
                "dish.lto_time",
                format!("Dish '{}' lto_details is missing valid {}", label, field),
            );
        }
    }

    if let (Some(start), Some(end)) = (lto.start_time.get(), lto.end_time.get()) {
        if start >= end {
            out.error(
                path,
                "dish.lto_window",
                format!(
                    "Dish '{}' lto_details has end_time that is not after start_time",
                    label
                ),
            );
        }
    }

    match &lto.marketing_copy {
        Field::Present(copy) if copy.chars().count() >= MIN_LTO_COPY_CHARS => {}
        _ => out.error(
            &path.field("marketing_copy"),
            "dish.lto_copy",
            format!(
                "Dish '{}' lto_details is missing or has too short marketing_copy",
                label
            ),
        ),
    }
}

// ============================================================================
// BUNDLES
// ============================================================================

fn check_bundle(bundle: &Bundle, path: &FieldPath, out: &mut IssueCollector) {
    let label = bundle.label();

    if bundle.bundle_name.non_empty().is_none() {
        out.error(
            &path.field("bundle_name"),
            "bundle.name",
            format!("Bundle '{}' must have a bundle_name", label),
        );
    }

    match &bundle.included_items {
        Field::Present(items) if !items.is_empty() => {}
        _ => out.error(
            &path.field("included_items"),
            "bundle.items",
            format!(
                "Bundle '{}' must have at least one item in included_items",
                label
            ),
        ),
    }

    match &bundle.bundle_price {
        Field::Present(price) if *price > 0.0 => {}
        _ => out.error(
            &path.field("bundle_price"),
            "bundle.price",
            format!(
                "Bundle '{}' must have a valid bundle_price greater than zero",
                label
            ),
        ),
    }

    if short_text(&bundle.bundle_marketing_copy, MIN_BUNDLE_COPY_CHARS) {
        out.error(
            &path.field("bundle_marketing_copy"),
            "bundle.marketing_copy",
            format!(
                "Bundle '{}' has invalid or too short bundle_marketing_copy",
                label
            ),
        );
    }
}
