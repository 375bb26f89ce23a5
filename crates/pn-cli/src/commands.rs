//! Subcommand implementations
//!
//! Each command returns the text to print so it can be exercised without a
//! process boundary.

use anyhow::{bail, Context};
use pn_notation::{
    notation_stats, parse_share_url, share_url_for_notation, try_decode, PlateGrid,
};
use pn_shortlink::{ShortLinkStore, ShortenRequest};

/// Encode a JSON plate grid
///
/// With `as_url` the notation is wrapped in a share URL under `base_url`.
/// Wells outside the plate's geometry are encoded as given but logged.
///
/// # Errors
///
/// Returns an error if `grid_json` is not a valid grid document.
pub fn encode(grid_json: &str, as_url: bool, base_url: Option<&str>) -> anyhow::Result<String> {
    let mut grid: PlateGrid =
        serde_json::from_str(grid_json).context("input is not a valid plate grid")?;
    grid.prune_empty();

    for id in grid.out_of_bounds() {
        tracing::warn!("Well {} is outside a {}-well plate", id, grid.plate_type);
    }
    for (id, record) in &grid.wells {
        for problem in record.validate() {
            tracing::warn!("Well {}: {}", id, problem);
        }
    }

    let notation = grid.to_notation();
    Ok(if as_url {
        share_url_for_notation(&notation, base_url)
    } else {
        notation
    })
}

/// Decode a notation into a pretty JSON grid
///
/// # Errors
///
/// Returns an error naming why the notation was rejected.
pub fn decode(notation: &str) -> anyhow::Result<String> {
    let decoded = try_decode(notation.trim()).context("invalid plate notation")?;
    Ok(serde_json::to_string_pretty(&decoded)?)
}

/// Size statistics as JSON
///
/// # Errors
///
/// Only fails if serialization fails.
pub fn stats(notation: &str) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&notation_stats(notation.trim()))?)
}

/// Decode the layout carried by a share URL
///
/// # Errors
///
/// Returns an error if the URL carries no valid notation.
pub fn parse_url(url: &str) -> anyhow::Result<String> {
    let Some(decoded) = parse_share_url(url.trim()) else {
        bail!("no valid plate notation found in URL");
    };
    Ok(serde_json::to_string_pretty(&decoded)?)
}

/// Shorten a notation or share URL
///
/// Prints the absolute short URL when an origin is known, else `/s/<id>`.
///
/// # Errors
///
/// Returns store errors with context.
pub async fn shorten(
    store: &ShortLinkStore,
    request: &ShortenRequest,
    origin: Option<&str>,
) -> anyhow::Result<String> {
    let response = store
        .shorten(request)
        .await
        .context("failed to create short link")?;

    Ok(match origin {
        Some(origin) => response.short_url(&origin_of(origin)),
        None => response.short_path,
    })
}

/// Resolve a short id
///
/// With `redirect` prints the redirect target (`/` for unknown ids) instead
/// of failing.
///
/// # Errors
///
/// Returns an error for an unknown id unless `redirect` is set.
pub async fn resolve(store: &ShortLinkStore, id: &str, redirect: bool) -> anyhow::Result<String> {
    let id = id.trim();
    if redirect {
        return Ok(store.redirect_target(id).await);
    }

    match store.notation_by_short_id(id).await {
        Some(notation) => Ok(notation),
        None => bail!("unknown short id: {id}"),
    }
}

/// List stored links as `id<TAB>notation` lines
pub async fn list(store: &ShortLinkStore) -> String {
    store
        .records()
        .await
        .into_iter()
        .map(|r| format!("{}\t{}", r.id, r.notation))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Scheme and authority of `base_url`, or the input unchanged if it has none
fn origin_of(base_url: &str) -> String {
    let Some((scheme, rest)) = base_url.split_once("://") else {
        return base_url.trim_end_matches('/').to_owned();
    };
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    format!("{scheme}://{authority}")
}
