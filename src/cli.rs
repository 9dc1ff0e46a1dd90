//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for beanlink using clap's derive macros.

use clap::{Parser, Subcommand};

/// Beanlink - Shopee affiliate link converter
#[derive(Parser)]
#[command(name = "beanlink")]
#[command(version)]
#[command(about = "Convert Shopee links into affiliate-tagged short links", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Convert a Shopee link into an affiliate-tagged link and shorten it
    Convert {
        /// Shopee product link (shopee.vn, s.shopee.vn or shp.ee)
        url: String,

        /// Override the configured affiliate identifier
        #[arg(long)]
        affiliate_id: Option<String>,

        /// Override the campaign sub-identifier (empty string clears it)
        #[arg(long)]
        sub_id: Option<String>,

        /// Append tracking parameters without the universal-link rewrite
        #[arg(long)]
        flat: bool,

        /// Emit utm_source exactly as configured, without the an_ prefix
        #[arg(long)]
        raw_source: bool,

        /// Skip the shortening request and display the affiliate URL
        #[arg(long)]
        no_shorten: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Draft marketing copy for a product link
    Caption {
        /// Product link to write copy for
        url: String,

        /// Target platform: facebook, tiktok, instagram or twitter
        #[arg(long, default_value = "facebook")]
        platform: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_convert_command() {
        let cli = Cli::try_parse_from([
            "beanlink",
            "convert",
            "https://shopee.vn/x-i.1.2",
            "--no-shorten",
            "--sub-id",
            "tet-sale",
        ])
        .unwrap();
        let Commands::Convert {
            url,
            sub_id,
            no_shorten,
            flat,
            ..
        } = cli.command
        else {
            panic!("expected convert command");
        };
        assert_eq!(url, "https://shopee.vn/x-i.1.2");
        assert_eq!(sub_id.as_deref(), Some("tet-sale"));
        assert!(no_shorten);
        assert!(!flat);
    }

    #[test]
    fn test_parse_caption_defaults_to_facebook() {
        let cli =
            Cli::try_parse_from(["beanlink", "caption", "https://shopee.vn/x-i.1.2"]).unwrap();
        let Commands::Caption { platform, json, .. } = cli.command else {
            panic!("expected caption command");
        };
        assert_eq!(platform, "facebook");
        assert!(!json);
    }

    #[test]
    fn test_missing_subcommand_is_an_error() {
        assert!(Cli::try_parse_from(["beanlink"]).is_err());
    }
}
