//! URL rewriting service for outgoing email bodies.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, LazyLock};

use crate::domain::entities::NewTrackedLink;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use regex::Regex;
use tracing::warn;

/// Matches http(s) URLs terminated by whitespace or HTML/quote delimiters.
static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s"'<>]+"#).unwrap());

/// One URL whose tracked-link record could not be persisted.
///
/// The URL stays unrewritten in the output body; rewriting is not
/// all-or-nothing across URLs.
#[derive(Debug)]
pub struct RewriteFailure {
    pub url: String,
    pub error: AppError,
}

/// Result of one rewrite pass over one body.
#[derive(Debug)]
pub struct RewrittenBody {
    pub body: String,
    pub links_created: usize,
    pub failures: Vec<RewriteFailure>,
}

impl RewrittenBody {
    fn unchanged(body: &str) -> Self {
        Self {
            body: body.to_string(),
            links_created: 0,
            failures: Vec::new(),
        }
    }
}

/// Substitutes URLs in message bodies with persisted tracking links.
///
/// Works in two phases: match spans are collected against the original,
/// immutable body first, then the output is assembled in a single pass from
/// those spans and a replacement table. Substituted text is never re-scanned,
/// so a tracking link can never itself be picked up and re-tracked.
pub struct LinkRewriter<L: LinkRepository> {
    link_repository: Arc<L>,
    public_base: String,
}

impl<L: LinkRepository> LinkRewriter<L> {
    /// Creates a new rewriter minting links under the given public base URL.
    pub fn new(link_repository: Arc<L>, public_base: impl Into<String>) -> Self {
        Self {
            link_repository,
            public_base: public_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Rewrites every URL in `body` to a tracking link.
    ///
    /// All occurrences of one distinct URL share a single tracked link; ids
    /// are minted in left-to-right first-occurrence order. URLs that already
    /// point under the public base are left untouched. A store failure for
    /// one URL leaves that URL as-is and is reported in
    /// [`RewrittenBody::failures`]; the remaining URLs are still rewritten.
    pub async fn rewrite(&self, body: &str) -> RewrittenBody {
        let matches: Vec<regex::Match<'_>> = URL_REGEX.find_iter(body).collect();
        if matches.is_empty() {
            return RewrittenBody::unchanged(body);
        }

        let mut seen = HashSet::new();
        let mut distinct: Vec<&str> = Vec::new();
        for m in &matches {
            if seen.insert(m.as_str()) {
                distinct.push(m.as_str());
            }
        }

        let mut replacements: HashMap<&str, String> = HashMap::new();
        let mut failures = Vec::new();

        for url in distinct {
            if self.is_tracking_link(url) {
                continue;
            }

            match self.link_repository.create(NewTrackedLink::for_url(url)).await {
                Ok(link) => {
                    replacements.insert(url, link.tracking_url(&self.public_base));
                }
                Err(error) => {
                    warn!(url, %error, "failed to persist tracked link, leaving URL unrewritten");
                    failures.push(RewriteFailure {
                        url: url.to_string(),
                        error,
                    });
                }
            }
        }

        let links_created = replacements.len();
        if links_created == 0 && failures.is_empty() {
            return RewrittenBody::unchanged(body);
        }

        let mut output = String::with_capacity(body.len());
        let mut cursor = 0;
        for m in &matches {
            output.push_str(&body[cursor..m.start()]);
            match replacements.get(m.as_str()) {
                Some(tracking_link) => output.push_str(tracking_link),
                None => output.push_str(m.as_str()),
            }
            cursor = m.end();
        }
        output.push_str(&body[cursor..]);

        RewrittenBody {
            body: output,
            links_created,
            failures,
        }
    }

    /// Returns true when `url` already points under the public tracking base.
    fn is_tracking_link(&self, url: &str) -> bool {
        url.strip_prefix(&self.public_base)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    }
}
