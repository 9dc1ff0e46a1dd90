//! Conversion session
//!
//! Caller-owned state for "the current result": at most one converted link
//! is retained, and a new submission supersedes any in-flight shortening
//! for the previous one. Supersession is keyed on a monotonically
//! increasing ticket instead of an implicit liveness flag, so a stale,
//! slow-to-resolve shortener response can never overwrite the display
//! state of a newer input.

use crate::config::AffiliateConfig;
use crate::converter::{self, ConvertedLink};
use crate::errors::{BeanlinkError, Result};

/// Identity of one submission. Only the ticket handed out by the most
/// recent [`ConversionSession::submit`] may resolve the shortening step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionTicket(u64);

/// Observable session state.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    /// Validation rejected the input; no result was produced.
    Failed { error: BeanlinkError },
    /// Converted, waiting for the shortening outcome.
    Shortening { result: ConvertedLink },
    /// Converted and display-ready.
    Ready {
        result: ConvertedLink,
        /// Shortened alias, or the unshortened affiliate URL as fallback
        display_url: String,
    },
}

#[derive(Debug, Default)]
pub struct ConversionSession {
    seq: u64,
    state: SessionState,
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::Idle
    }
}

impl ConversionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The retained result, if the last submission converted successfully.
    pub fn current_result(&self) -> Option<&ConvertedLink> {
        match &self.state {
            SessionState::Shortening { result } | SessionState::Ready { result, .. } => {
                Some(result)
            }
            _ => None,
        }
    }

    /// Validate and convert one input, superseding any previous result.
    ///
    /// Returns `Ok(Some(ticket))` when the caller should run the shortening
    /// adapter and report back via [`resolve_shortening`]. Returns
    /// `Ok(None)` when shortening is bypassed: an affiliate URL that is
    /// itself a short link must not be shortened again, because double
    /// redirection breaks deep-link resolution on mobile clients.
    ///
    /// [`resolve_shortening`]: ConversionSession::resolve_shortening
    pub fn submit(
        &mut self,
        input: &str,
        config: &AffiliateConfig,
    ) -> Result<Option<ConversionTicket>> {
        self.seq += 1;
        match converter::convert(input, config) {
            Ok(result) => {
                if converter::is_short_link(&result.affiliate_url) {
                    let display_url = result.affiliate_url.clone();
                    self.state = SessionState::Ready {
                        result,
                        display_url,
                    };
                    Ok(None)
                } else {
                    self.state = SessionState::Shortening { result };
                    Ok(Some(ConversionTicket(self.seq)))
                }
            }
            Err(error) => {
                self.state = SessionState::Failed {
                    error: error.clone(),
                };
                Err(error)
            }
        }
    }

    /// Apply a shortening outcome. `None` means the adapter failed and the
    /// unshortened affiliate URL becomes the display URL.
    ///
    /// Returns `false` when the ticket no longer identifies the current
    /// submission; the outcome is dropped in that case.
    pub fn resolve_shortening(
        &mut self,
        ticket: ConversionTicket,
        short_url: Option<String>,
    ) -> bool {
        if ticket.0 != self.seq {
            tracing::debug!(
                "Dropping stale shortening outcome for superseded request {}",
                ticket.0
            );
            return false;
        }
        let SessionState::Shortening { result } = &self.state else {
            return false;
        };
        let display_url = short_url.unwrap_or_else(|| result.affiliate_url.clone());
        self.state = SessionState::Ready {
            result: result.clone(),
            display_url,
        };
        true
    }
}
