//! Paginated repository listing
//!
//! GitHub's REST API splits list responses into pages and points at the next
//! one through the `Link` response header. The listing is exposed as a
//! stream of repositories that follows `rel="next"` until there is none.

use futures::stream::{self, Stream, TryStreamExt};
use reqwest::header::{HeaderMap, LINK};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::github::{ensure_success, FetchError};

/// The subset of a repository record the stats card uses
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Repository {
    /// `owner/name`
    pub full_name: String,
    #[serde(default)]
    pub stargazers_count: u64,
}

/// Stream every page of a listing, starting from `first_page`
pub fn repository_pages(
    http: &Client,
    first_page: String,
) -> impl Stream<Item = Result<Vec<Repository>, FetchError>> + Send + '_ {
    stream::try_unfold(Some(first_page), move |next| async move {
        match next {
            Some(url) => fetch_page(http, &url).await.map(Some),
            None => Ok(None),
        }
    })
}

/// Fetch one page and the URL of the page after it
async fn fetch_page(
    http: &Client,
    url: &str,
) -> Result<(Vec<Repository>, Option<String>), FetchError> {
    let response = ensure_success(http.get(url).send().await?).await?;
    let next = next_link(response.headers());
    let page: Vec<Repository> = response.json().await?;

    debug!(
        "Fetched {} repositories from {} (more pages: {})",
        page.len(),
        url,
        next.is_some()
    );

    Ok((page, next))
}

/// Stream every repository of a listing, one at a time
pub fn repositories(
    http: &Client,
    first_page: String,
) -> impl Stream<Item = Result<Repository, FetchError>> + Send + '_ {
    repository_pages(http, first_page)
        .map_ok(|page| stream::iter(page.into_iter().map(Ok::<_, FetchError>)))
        .try_flatten()
}

fn next_link(headers: &HeaderMap) -> Option<String> {
    headers
        .get(LINK)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_next_link)
}

/// Extract the `rel="next"` target from a `Link` header value
///
/// ```text
/// <https://api.github.com/user/1/repos?page=2>; rel="next", <...?page=5>; rel="last"
/// ```
pub fn parse_next_link(header: &str) -> Option<String> {
    header.split(',').find_map(|link| {
        let mut parts = link.split(';');
        let target = parts.next()?.trim();
        let is_next = parts.any(|param| {
            let param = param.trim();
            param == r#"rel="next""# || param == "rel=next"
        });

        if !is_next {
            return None;
        }

        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(str::to_string)
    })
}
