//! Link Transformer
//!
//! Pure transformation from a raw URL string plus an [`AffiliateConfig`]
//! to an affiliate-tagged link and a best-effort product label. No network,
//! no retained state; the caller owns the result.
//!
//! Validation is a deliberately loose substring policy inherited from the
//! product: any input containing `"shopee"` or `"shp.ee"` passes, hostname
//! notwithstanding. Tightening it would reject inputs the tool accepts
//! today.

pub mod session;

use url::Url;
use url::form_urlencoded;

use crate::config::AffiliateConfig;
use crate::errors::{BeanlinkError, Result};

/// Canonical base for the universal-link (app deep-link) rewrite
pub const UNIVERSAL_LINK_BASE: &str = "https://shopee.vn/universal-link";
/// Path prefix stripped before rebuilding, so re-converting an already
/// converted link never double-prefixes
const UNIVERSAL_LINK_PREFIX: &str = "/universal-link";
/// `utm_source` prefix expected by the affiliate program
const SOURCE_PREFIX: &str = "an_";

// Product label placeholders, shown when no name can be recovered
const LABEL_SHORT_LINK: &str = "Sản phẩm Shopee (Link rút gọn)";
const LABEL_HOME_PAGE: &str = "Trang chủ Shopee";
const LABEL_GENERIC_PRODUCT: &str = "Sản phẩm Shopee";
const LABEL_UNPARSEABLE: &str = "Link Shopee";

/// One successful conversion. Immutable; a new conversion supersedes it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertedLink {
    pub original_url: String,
    pub affiliate_url: String,
    /// Conversion time in epoch milliseconds
    pub timestamp: i64,
    /// Best-effort label, never empty
    pub product_name: String,
}

/// Short links carry an opaque product identifier that cannot be recovered
/// locally, so they are tagged but never restructured.
pub fn is_short_link(input: &str) -> bool {
    input.contains("shp.ee") || input.contains("s.shopee.vn")
}

/// Convert a raw URL into an affiliate-tagged link.
///
/// Fails only for empty input or input that does not look like a Shopee
/// link at all. Once validation passes, some output is always produced:
/// unparseable input degrades to plain parameter appending.
pub fn convert(input: &str, config: &AffiliateConfig) -> Result<ConvertedLink> {
    let input = input.trim();

    if input.is_empty() {
        return Err(BeanlinkError::empty_input("no link provided"));
    }
    if !input.contains("shopee") && !input.contains("shp.ee") {
        return Err(BeanlinkError::not_recognized_domain(format!(
            "{} is not a Shopee link (expected shopee.vn, s.shopee.vn or shp.ee)",
            input
        )));
    }

    let tag_query = build_tag_query(config);

    let affiliate_url = if config.universal_link_enabled && !is_short_link(input) {
        match Url::parse(input) {
            Ok(url) => rebuild_universal(&url, &tag_query),
            Err(e) => {
                // Passed the substring check but is not a parseable URL;
                // degrade to plain appending rather than aborting.
                let err = BeanlinkError::url_parse(e.to_string());
                tracing::debug!("{}, falling back to query append for {:?}", err, input);
                append_query(input, &tag_query)
            }
        }
    } else {
        // Short links keep their path untouched; the flat strategy never
        // rewrites anything.
        append_query(input, &tag_query)
    };

    Ok(ConvertedLink {
        original_url: input.to_string(),
        affiliate_url,
        timestamp: chrono::Utc::now().timestamp_millis(),
        product_name: extract_product_name(input),
    })
}

/// Serialize the affiliate tracking parameters as a query string.
fn build_tag_query(config: &AffiliateConfig) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    serializer.append_pair("utm_source", &normalize_source(config));
    serializer.append_pair("utm_medium", "affiliates");
    serializer.append_pair("utm_campaign", "-");
    if let Some(sub_id) = config.sub_id.as_deref()
        && !sub_id.is_empty()
    {
        serializer.append_pair("utm_content", sub_id);
    }
    serializer.append_pair("deep_and_deferred", "1");
    serializer.finish()
}

/// Apply the `an_` prefix policy to the affiliate identifier.
fn normalize_source(config: &AffiliateConfig) -> String {
    if config.normalize_source_prefix && !config.affiliate_id.starts_with(SOURCE_PREFIX) {
        format!("{}{}", SOURCE_PREFIX, config.affiliate_id)
    } else {
        config.affiliate_id.clone()
    }
}

/// Append a query string with `?` or `&` depending on what is already there.
fn append_query(input: &str, query: &str) -> String {
    let separator = if input.contains('?') { '&' } else { '?' };
    format!("{}{}{}", input, separator, query)
}

/// Rebuild a canonical product URL rooted at the universal-link base.
///
/// Scheme, host and any existing query are discarded; only the path
/// survives, minus a `/universal-link` prefix if one is already present.
fn rebuild_universal(url: &Url, query: &str) -> String {
    let path = url.path();
    let path = path.strip_prefix(UNIVERSAL_LINK_PREFIX).unwrap_or(path);
    format!("{}{}?{}", UNIVERSAL_LINK_BASE, path, query)
}

/// Derive a display label from the URL. Best effort: this only ever
/// degrades to placeholders, it never fails.
pub fn extract_product_name(input: &str) -> String {
    let url = match Url::parse(input) {
        Ok(url) => url,
        Err(_) => return LABEL_UNPARSEABLE.to_string(),
    };

    if url
        .host_str()
        .is_some_and(|h| h.contains("shp.ee") || h.contains("s.shopee.vn"))
    {
        return LABEL_SHORT_LINK.to_string();
    }

    // Typical product path: /Ten-San-Pham-i.123.456
    let mut slug = url.path().replacen(UNIVERSAL_LINK_PREFIX, "", 1);
    if let Some(stripped) = slug.strip_prefix('/') {
        slug = stripped.to_string();
    }
    if slug.is_empty() {
        return LABEL_HOME_PAGE.to_string();
    }

    // `-i.` delimits the name from the shop/product ids; without it, take
    // the last path segment.
    let name_part = match slug.split_once("-i.") {
        Some((name, _)) => name,
        None => slug.rsplit('/').next().unwrap_or(&slug),
    };

    // Url::path() is percent-encoded; Vietnamese slugs need decoding
    // before they read as product names.
    let name_part = match urlencoding::decode(name_part) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => name_part.to_string(),
    };

    let formatted = name_part.replace('-', " ").trim().to_string();
    if formatted.is_empty() {
        return LABEL_GENERIC_PRODUCT.to_string();
    }
    capitalize_first(&formatted)
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AffiliateConfig {
        AffiliateConfig {
            affiliate_id: "17362210029".to_string(),
            sub_id: Some("Web Tool".to_string()),
            universal_link_enabled: true,
            normalize_source_prefix: true,
        }
    }

    #[test]
    fn test_empty_input_rejected() {
        let err = convert("", &config()).unwrap_err();
        assert!(matches!(err, BeanlinkError::EmptyInput(_)));
        let err = convert("   \t ", &config()).unwrap_err();
        assert!(matches!(err, BeanlinkError::EmptyInput(_)));
    }

    #[test]
    fn test_foreign_domain_rejected() {
        let err = convert("https://example.com/foo", &config()).unwrap_err();
        assert!(matches!(err, BeanlinkError::NotRecognizedDomain(_)));
        assert_eq!(err.code(), "E002");
    }

    #[test]
    fn test_loose_domain_policy_is_substring_based() {
        // Known-loose heuristic: a shopee substring anywhere passes.
        let result = convert("https://notshopee.example.com/shopee", &config());
        assert!(result.is_ok());
    }

    #[test]
    fn test_canonical_universal_rewrite() {
        let result = convert("https://shopee.vn/Ao-thun-nam-i.123.456", &config()).unwrap();
        assert!(
            result
                .affiliate_url
                .starts_with("https://shopee.vn/universal-link/Ao-thun-nam-i.123.456?")
        );
        assert!(result.affiliate_url.contains("utm_source=an_17362210029"));
        assert!(result.affiliate_url.contains("utm_medium=affiliates"));
        assert!(result.affiliate_url.contains("utm_campaign=-"));
        assert!(result.affiliate_url.contains("utm_content=Web+Tool"));
        assert!(result.affiliate_url.contains("deep_and_deferred=1"));
        assert_eq!(result.product_name, "Ao thun nam");
    }

    #[test]
    fn test_universal_rewrite_discards_original_query() {
        let result = convert(
            "http://shopee.vn/Ao-thun-nam-i.123.456?gclid=xyz",
            &config(),
        )
        .unwrap();
        assert!(
            result
                .affiliate_url
                .starts_with("https://shopee.vn/universal-link/Ao-thun-nam-i.123.456?")
        );
        assert!(!result.affiliate_url.contains("gclid"));
    }

    #[test]
    fn test_universal_rewrite_is_idempotent() {
        let first = convert("https://shopee.vn/Ao-thun-nam-i.123.456", &config()).unwrap();
        let second = convert(&first.affiliate_url, &config()).unwrap();
        assert!(
            second
                .affiliate_url
                .starts_with("https://shopee.vn/universal-link/Ao-thun-nam-i.123.456?")
        );
        assert!(!second.affiliate_url.contains("/universal-link/universal-link"));
    }

    #[test]
    fn test_short_link_path_untouched() {
        let result = convert("https://shp.ee/abc123", &config()).unwrap();
        assert!(result.affiliate_url.starts_with("https://shp.ee/abc123?"));
        assert!(result.affiliate_url.contains("utm_source=an_17362210029"));
        assert_eq!(result.product_name, LABEL_SHORT_LINK);
    }

    #[test]
    fn test_short_link_with_existing_query_appends_with_ampersand() {
        let result = convert("https://s.shopee.vn/abc?smtt=1", &config()).unwrap();
        assert!(result.affiliate_url.starts_with("https://s.shopee.vn/abc?smtt=1&"));
        assert!(result.affiliate_url.contains("utm_source="));
    }

    #[test]
    fn test_flat_strategy_appends_verbatim() {
        let mut config = config();
        config.universal_link_enabled = false;
        let result = convert("https://shopee.vn/Ao-thun-nam-i.123.456", &config).unwrap();
        assert!(
            result
                .affiliate_url
                .starts_with("https://shopee.vn/Ao-thun-nam-i.123.456?")
        );
        assert!(!result.affiliate_url.contains("universal-link"));
    }

    #[test]
    fn test_prefix_policy_off_keeps_raw_source() {
        let mut config = config();
        config.normalize_source_prefix = false;
        let result = convert("https://shopee.vn/Ao-thun-nam-i.123.456", &config).unwrap();
        assert!(result.affiliate_url.contains("utm_source=17362210029"));
        assert!(!result.affiliate_url.contains("utm_source=an_"));
    }

    #[test]
    fn test_prefix_policy_does_not_double_prefix() {
        let mut config = config();
        config.affiliate_id = "an_beanshop".to_string();
        let result = convert("https://shopee.vn/Ao-thun-nam-i.123.456", &config).unwrap();
        assert!(result.affiliate_url.contains("utm_source=an_beanshop"));
        assert!(!result.affiliate_url.contains("an_an_"));
    }

    #[test]
    fn test_no_sub_id_omits_utm_content() {
        let mut config = config();
        config.sub_id = None;
        let result = convert("https://shopee.vn/Ao-thun-nam-i.123.456", &config).unwrap();
        assert!(!result.affiliate_url.contains("utm_content"));
    }

    #[test]
    fn test_unparseable_input_falls_back_to_append() {
        // Passes the substring check, not a valid absolute URL.
        let result = convert("shopee.vn/Ao-thun-nam-i.123.456", &config()).unwrap();
        assert!(
            result
                .affiliate_url
                .starts_with("shopee.vn/Ao-thun-nam-i.123.456?")
        );
        assert!(result.affiliate_url.contains("utm_source="));
        assert_eq!(result.product_name, LABEL_UNPARSEABLE);
    }

    #[test]
    fn test_result_fields_never_empty() {
        for input in [
            "https://shopee.vn/Ao-thun-nam-i.123.456",
            "https://shp.ee/abc123",
            "https://shopee.vn/",
            "shopee garbage input",
        ] {
            let result = convert(input, &config()).unwrap();
            assert!(!result.affiliate_url.is_empty());
            assert!(!result.product_name.is_empty());
            assert!(result.timestamp > 0);
            assert_eq!(result.original_url, input.trim());
        }
    }

    #[test]
    fn test_extract_name_home_page() {
        assert_eq!(extract_product_name("https://shopee.vn/"), LABEL_HOME_PAGE);
        assert_eq!(extract_product_name("https://shopee.vn"), LABEL_HOME_PAGE);
    }

    #[test]
    fn test_extract_name_strips_universal_prefix() {
        assert_eq!(
            extract_product_name("https://shopee.vn/universal-link/Ao-thun-nam-i.123.456"),
            "Ao thun nam"
        );
    }

    #[test]
    fn test_extract_name_last_segment_without_delimiter() {
        assert_eq!(
            extract_product_name("https://shopee.vn/shop/fashion-sale"),
            "Fashion sale"
        );
    }

    #[test]
    fn test_extract_name_unicode_capitalization() {
        assert_eq!(
            extract_product_name("https://shopee.vn/áo-khoác-i.1.2"),
            "Áo khoác"
        );
    }

    #[test]
    fn test_is_short_link() {
        assert!(is_short_link("https://shp.ee/abc"));
        assert!(is_short_link("https://vn.shp.ee/abc"));
        assert!(is_short_link("https://s.shopee.vn/abc"));
        assert!(!is_short_link("https://shopee.vn/product-i.1.2"));
    }
}
