// src/crawl/normalize.rs
// =============================================================================
// URL normalization: turns whatever was written in an href/src attribute into
// one canonical, absolute URL.
//
// Two references that point at the same resource must end up as the same
// value, otherwise the visited set cannot deduplicate them. The `url` crate
// already lowercases the scheme and host, resolves "." and ".." segments and
// percent-encodes what needs encoding. On top of that we drop the fragment,
// since "#section" never changes what the server returns.
// =============================================================================

use serde::Serialize;
use std::fmt;
use url::Url;

use crate::error::{CrawlError, Result};

/// A scheme-qualified URL with its fragment removed.
///
/// Built only through [`AbsoluteUrl::parse`] or [`normalize`], and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AbsoluteUrl(Url);

impl AbsoluteUrl {
    /// Parses an already-absolute URL (the base URL from the command line)
    pub fn parse(input: &str) -> Result<Self> {
        let url = Url::parse(input).map_err(|source| CrawlError::MalformedUrl {
            reference: input.to_string(),
            source,
        })?;
        Ok(Self::from_url(url))
    }

    fn from_url(mut url: Url) -> Self {
        url.set_fragment(None);
        Self(url)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn scheme(&self) -> &str {
        self.0.scheme()
    }

    /// Only http and https targets are ever requested
    pub fn is_http(&self) -> bool {
        matches!(self.scheme(), "http" | "https")
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for AbsoluteUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Resolves a link reference against the page it was found on
//
// Parameters:
//   reference: the raw attribute value (absolute, scheme-relative,
//              path-relative or query-only)
//   base: the URL of the page the reference came from
//
// Returns: the canonical AbsoluteUrl, or MalformedUrl if it cannot be parsed
//
// Examples (base = "https://example.com/docs/page"):
//   "intro"              -> "https://example.com/docs/intro"
//   "/about#team"        -> "https://example.com/about"
//   "//cdn.example.com/" -> "https://cdn.example.com/"
//   "?page=2"            -> "https://example.com/docs/page?page=2"
pub fn normalize(reference: &str, base: &AbsoluteUrl) -> Result<AbsoluteUrl> {
    // join() handles absolute references too: they simply replace the base
    let joined = base
        .as_url()
        .join(reference)
        .map_err(|source| CrawlError::MalformedUrl {
            reference: reference.to_string(),
            source,
        })?;

    Ok(AbsoluteUrl::from_url(joined))
}
