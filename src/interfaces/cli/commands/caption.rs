//! Caption command

use colored::Colorize;
use tracing::warn;

use crate::interfaces::cli::CliError;
use crate::services::copygen::{self, CopyGenerator, MarketingContent, Platform};

pub fn generate_caption(url: String, platform: &str, json: bool) -> Result<(), CliError> {
    let platform: Platform = platform
        .parse()
        .map_err(CliError::ValidationError)?;

    // Generation failures never reach the user as errors; the static
    // fallback copy is substituted instead.
    let (content, generated) = match CopyGenerator::from_env() {
        Ok(generator) => match generator.generate(&url, platform) {
            Ok(content) => (content, true),
            Err(e) => {
                warn!("{}", e);
                (MarketingContent::fallback(&copygen::context_hint(&url)), false)
            }
        },
        Err(e) => {
            warn!("{}", e);
            (MarketingContent::fallback(&copygen::context_hint(&url)), false)
        }
    };

    if json {
        let payload = serde_json::json!({
            "platform": platform.as_str(),
            "caption": content.caption,
            "hashtags": content.hashtags,
            "generated": generated,
        });
        println!("{}", payload);
        return Ok(());
    }

    if !generated {
        println!(
            "{} Copy generation unavailable, using fallback copy",
            "ℹ".bold().blue()
        );
    }
    println!("{} Caption for {}:", "✓".bold().green(), platform.as_str().cyan());
    println!("{}", content.caption);
    println!("{}", content.hashtags.join(" ").magenta());

    Ok(())
}
