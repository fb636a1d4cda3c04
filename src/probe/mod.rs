//! Reachability checking
//!
//! Before anything is retrieved the target gets a status-only probe. The
//! status code decides whether the run continues, skips quietly, or aborts:
//!
//! | Status | Verdict |
//! |--------|---------|
//! | none obtainable | Fatal (unreachable) |
//! | 404 | Skip |
//! | 5xx | Fatal (server error) |
//! | anything else | Continue |

mod curl;
mod http;

pub use self::curl::CurlProber;
pub use self::http::{build_http_client, HttpProber};

use crate::url::classify_url;
use crate::ArchiverError;
use std::future::Future;

/// Source of a status code for a URL
pub trait Prober {
    /// Returns the HTTP status for `url`, or `None` when no status could be
    /// obtained at all
    fn status(&self, url: &str) -> impl Future<Output = Option<u16>> + Send;
}

/// Why a probe aborts the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatalReason {
    /// No status at all: DNS failure, refused connection, invalid URL
    Unreachable,
    /// The server answered with a 5xx status
    ServerError(u16),
}

/// Classified probe result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeVerdict {
    /// Target is there; go ahead and retrieve it
    Continue(u16),
    /// Target is gone (404); finish the run without recording anything
    Skip,
    /// Stop the run with a failure
    Fatal(FatalReason),
}

impl FatalReason {
    /// Builds the run error reported for `url`
    pub fn into_error(self, url: &str) -> ArchiverError {
        match self {
            Self::Unreachable => ArchiverError::Unreachable {
                url: url.to_string(),
            },
            Self::ServerError(status) => ArchiverError::ServerError {
                url: url.to_string(),
                status,
            },
        }
    }
}

impl ProbeVerdict {
    /// Converts a fatal verdict into the matching run error
    pub fn into_error(self, url: &str) -> Option<ArchiverError> {
        match self {
            Self::Fatal(reason) => Some(reason.into_error(url)),
            Self::Continue(_) | Self::Skip => None,
        }
    }
}

/// Classifies a probe status code
pub fn classify_status(status: Option<u16>) -> ProbeVerdict {
    match status {
        None | Some(0) => ProbeVerdict::Fatal(FatalReason::Unreachable),
        Some(404) => ProbeVerdict::Skip,
        Some(code @ 500..=599) => ProbeVerdict::Fatal(FatalReason::ServerError(code)),
        Some(code) => ProbeVerdict::Continue(code),
    }
}

/// Probes a raw input URL and classifies the result
///
/// The URL is reclassified first so wiki shorthand is probed at its
/// rewritten location.
pub async fn check_reachability<P: Prober>(prober: &P, raw_url: &str) -> ProbeVerdict {
    let target = classify_url(raw_url);
    let status = prober.status(&target.url).await;
    let verdict = classify_status(status);

    match verdict {
        ProbeVerdict::Continue(code) => {
            tracing::debug!("{} answered HTTP {}", target.url, code);
        }
        ProbeVerdict::Skip => {
            tracing::warn!("Skipping {} (404 Not Found)", raw_url);
        }
        ProbeVerdict::Fatal(FatalReason::Unreachable) => {
            tracing::error!(
                "Critical error: could not access {} (invalid URL or unreachable)",
                raw_url
            );
        }
        ProbeVerdict::Fatal(FatalReason::ServerError(code)) => {
            tracing::error!("Critical error: could not access {} (HTTP {})", raw_url, code);
        }
    }

    verdict
}
