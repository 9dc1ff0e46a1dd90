//! Marketing copy generation adapter
//!
//! Sends a constructed Vietnamese marketing prompt for a product link to a
//! generative-language API and parses the structured caption + hashtags
//! response. Requires an API key; the key, a network error, or a malformed
//! response must never block the link-conversion flow — callers substitute
//! [`MarketingContent::fallback`] instead.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use url::Url;

use super::http_agent;
use crate::errors::{BeanlinkError, Result};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// Model used for copy generation
pub const GEMINI_MODEL: &str = "gemini-3-flash-preview";

/// Hint used when no product name can be read out of the URL slug
const DEFAULT_CONTEXT_HINT: &str = "Unknown Product";

/// Hashtags used by the static fallback copy
const FALLBACK_HASHTAGS: [&str; 4] = ["#Shopee", "#Sale", "#DealHot", "#MuaSamOnline"];

/// Target social-media platform for the generated copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Facebook,
    Tiktok,
    Instagram,
    Twitter,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Facebook,
        Platform::Tiktok,
        Platform::Instagram,
        Platform::Twitter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Facebook => "facebook",
            Platform::Tiktok => "tiktok",
            Platform::Instagram => "instagram",
            Platform::Twitter => "twitter",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "facebook" => Ok(Platform::Facebook),
            "tiktok" => Ok(Platform::Tiktok),
            "instagram" => Ok(Platform::Instagram),
            "twitter" => Ok(Platform::Twitter),
            _ => Err(format!(
                "Invalid platform: '{}'. Valid: facebook, tiktok, instagram, twitter",
                s
            )),
        }
    }
}

/// Generated (or fallback) social-media copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketingContent {
    pub caption: String,
    pub hashtags: Vec<String>,
}

impl MarketingContent {
    /// Static copy substituted when generation is unavailable.
    pub fn fallback(context_hint: &str) -> Self {
        Self {
            caption: format!(
                "🔥 Deal hot trên Shopee ngay lúc này! Mọi người nhanh tay check ngay \
                 sản phẩm \"{}\" này nhé. Giá siêu tốt, chất lượng tuyệt vời! 👇",
                context_hint
            ),
            hashtags: FALLBACK_HASHTAGS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Extract a product-name hint from the URL slug to anchor the prompt,
/// e.g. `shopee.vn/Ao-thun-nam-dep-i.123.456` → `"Ao thun nam dep"`.
pub fn context_hint(product_url: &str) -> String {
    let Ok(url) = Url::parse(product_url) else {
        return DEFAULT_CONTEXT_HINT.to_string();
    };
    let slug = url
        .path()
        .split('/')
        .find(|segment| segment.len() > 5 && segment.contains('-'));
    match slug {
        // Drop the id tail (everything from the first dot on)
        Some(slug) => {
            let name = slug.split('.').next().unwrap_or(slug).trim_end_matches("-i");
            let name = match urlencoding::decode(name) {
                Ok(decoded) => decoded.into_owned(),
                Err(_) => name.to_string(),
            };
            name.replace('-', " ")
        }
        None => DEFAULT_CONTEXT_HINT.to_string(),
    }
}

fn build_prompt(product_url: &str, context_hint: &str, platform: Platform) -> String {
    format!(
        "I have a Shopee product link: {product_url}.\n\
         Based on the URL structure, the product seems to be: \"{context_hint}\".\n\n\
         Please act as an expert social media marketer. Write a catchy, engaging, \
         and high-converting caption for this product for {platform}.\n\n\
         Requirements:\n\
         1. Language: Vietnamese.\n\
         2. Tone: Enthusiastic, urgency (FOMO), and friendly.\n\
         3. Include emojis relevant to the product.\n\
         4. Include 5-8 relevant hashtags.\n\
         5. The output must be JSON."
    )
}

fn response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "caption": {
                "type": "STRING",
                "description": "The main body of the social media post."
            },
            "hashtags": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "A list of hashtags without the hash symbol."
            }
        },
        "required": ["caption", "hashtags"]
    })
}

/// The model returns hashtags without the `#`; make them paste-ready.
fn normalize_hashtags(hashtags: Vec<String>) -> Vec<String> {
    hashtags
        .into_iter()
        .map(|tag| {
            if tag.starts_with('#') {
                tag
            } else {
                format!("#{}", tag)
            }
        })
        .collect()
}

/// Copy-generation endpoint client.
#[derive(Debug)]
pub struct CopyGenerator {
    api_key: String,
    model: String,
}

impl CopyGenerator {
    /// Create a generator with an explicit API key.
    pub fn new<T: Into<String>>(api_key: T) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(BeanlinkError::missing_credential("API key is empty"));
        }
        Ok(Self {
            api_key,
            model: GEMINI_MODEL.to_string(),
        })
    }

    /// Build from `GEMINI_API_KEY`. A missing key is a hard precondition
    /// failure for this path only, never for link conversion.
    pub fn from_env() -> Result<Self> {
        match std::env::var("GEMINI_API_KEY") {
            Ok(key) => Self::new(key),
            Err(_) => Err(BeanlinkError::missing_credential(
                "GEMINI_API_KEY is not set",
            )),
        }
    }

    /// Generate platform-specific marketing copy for a product link.
    pub fn generate(&self, product_url: &str, platform: Platform) -> Result<MarketingContent> {
        let hint = context_hint(product_url);
        let prompt = build_prompt(product_url, &hint, platform);
        debug!("Requesting marketing copy for {} ({})", product_url, platform);

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema(),
            }
        });

        let endpoint = format!("{}/{}:generateContent", API_BASE, self.model);
        let resp = http_agent()
            .post(&endpoint)
            .header("x-goog-api-key", &self.api_key)
            .send_json(&body)
            .map_err(|e| BeanlinkError::copy_generation_unavailable(e.to_string()))?;

        let value: serde_json::Value = resp
            .into_body()
            .read_json()
            .map_err(|e| BeanlinkError::copy_generation_unavailable(e.to_string()))?;

        let text = value["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                BeanlinkError::copy_generation_unavailable("no text candidate in response")
            })?;

        let content: MarketingContent = serde_json::from_str(text)
            .map_err(|e| BeanlinkError::copy_generation_unavailable(e.to_string()))?;

        Ok(MarketingContent {
            caption: content.caption,
            hashtags: normalize_hashtags(content.hashtags),
        })
    }
}
