//! Convert command

use colored::Colorize;
use tracing::warn;

use crate::config::AffiliateConfig;
use crate::converter::session::{ConversionSession, SessionState};
use crate::interfaces::cli::CliError;
use crate::services::shortener::UrlShortener;

#[allow(clippy::too_many_arguments)]
pub fn convert_link(
    url: String,
    affiliate_id: Option<String>,
    sub_id: Option<String>,
    flat: bool,
    raw_source: bool,
    no_shorten: bool,
    json: bool,
) -> Result<(), CliError> {
    let mut config = AffiliateConfig::from_env();
    if let Some(id) = affiliate_id {
        config.affiliate_id = id;
    }
    if let Some(sub) = sub_id {
        config.sub_id = if sub.trim().is_empty() { None } else { Some(sub) };
    }
    if flat {
        config.universal_link_enabled = false;
    }
    if raw_source {
        config.normalize_source_prefix = false;
    }
    config.validate()?;

    let mut session = ConversionSession::new();
    let ticket = session.submit(&url, &config)?;

    if let Some(ticket) = ticket {
        let affiliate_url = match session.current_result() {
            Some(result) => result.affiliate_url.clone(),
            None => return Err(CliError::CommandError("conversion produced no result".into())),
        };
        let outcome = if no_shorten {
            None
        } else {
            match UrlShortener::from_env().shorten(&affiliate_url) {
                Ok(short_url) => Some(short_url),
                Err(e) => {
                    // Recovered by displaying the unshortened affiliate URL
                    warn!("{}", e);
                    None
                }
            }
        };
        session.resolve_shortening(ticket, outcome);
    }

    let SessionState::Ready {
        result,
        display_url,
    } = session.state()
    else {
        return Err(CliError::CommandError("conversion did not complete".into()));
    };

    if json {
        let payload = serde_json::json!({
            "originalUrl": result.original_url,
            "affiliateUrl": result.affiliate_url,
            "timestamp": result.timestamp,
            "productName": result.product_name,
            "displayUrl": display_url,
        });
        println!("{}", payload);
        return Ok(());
    }

    println!(
        "{} Product: {}",
        "✓".bold().green(),
        result.product_name.cyan()
    );
    println!(
        "{} Affiliate link: {}",
        "✓".bold().green(),
        result.affiliate_url.blue().underline()
    );
    if *display_url == result.affiliate_url {
        println!(
            "{} Display link: {} (not shortened)",
            "ℹ".bold().blue(),
            display_url.magenta()
        );
    } else {
        println!(
            "{} Short link: {}",
            "✓".bold().green(),
            display_url.magenta()
        );
    }

    Ok(())
}
