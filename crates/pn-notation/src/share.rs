//! Share URLs
//!
//! A share URL carries the notation in its fragment, so opening it never
//! sends the layout to a server:
//!
//! ```text
//! https://plates.example/designer#pn=PN%3Av1%2F96%2FA1%3A-CompoundA-10-uM-1
//! ```
//!
//! The fragment is read as `key=value&...`; the first `pn` wins and other
//! keys are ignored.

use crate::codec::{decode, encode};
use crate::grid::DecodedNotation;
use crate::plate::{PlateType, WellId};
use crate::well::WellRecord;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Fragment key holding the notation
pub const FRAGMENT_KEY: &str = "pn";

/// Characters left unescaped, matching JavaScript's `encodeURIComponent`
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a notation for use in a URL fragment
#[must_use]
pub fn encode_component(notation: &str) -> String {
    utf8_percent_encode(notation, COMPONENT).to_string()
}

/// Build a share URL for a plate layout
///
/// Any fragment already on `base_url` is replaced. Without a base the result
/// is just the fragment (`#pn=...`), ready to append to the current page.
pub fn create_share_url<'a, I>(plate_type: PlateType, wells: I, base_url: Option<&str>) -> String
where
    I: IntoIterator<Item = (&'a WellId, &'a WellRecord)>,
{
    let notation = encode(plate_type, wells);
    share_url_for_notation(&notation, base_url)
}

/// Build a share URL for an already-encoded notation
#[must_use]
pub fn share_url_for_notation(notation: &str, base_url: Option<&str>) -> String {
    let base = base_url
        .map(|b| b.split_once('#').map_or(b, |(before, _)| before))
        .unwrap_or_default();
    format!("{base}#{FRAGMENT_KEY}={}", encode_component(notation))
}

/// Pull the percent-decoded notation out of a URL or bare fragment
///
/// Accepts a full URL, `#pn=...`, or `pn=...`. Returns `None` when there is
/// no `pn` parameter or its value is not valid percent-encoded UTF-8. The
/// result is not checked against the notation grammar.
#[must_use]
pub fn notation_from_fragment(url: &str) -> Option<String> {
    let fragment = url.split_once('#').map_or(url, |(_, fragment)| fragment);

    let value = fragment.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        (key == FRAGMENT_KEY).then_some(value)
    })?;

    percent_decode_str(value)
        .decode_utf8()
        .ok()
        .map(|decoded| decoded.into_owned())
}

/// Decode the plate layout carried by a share URL
///
/// Returns `None` if the URL has no `pn` fragment parameter or the notation
/// does not decode.
#[must_use]
pub fn parse_share_url(url: &str) -> Option<DecodedNotation> {
    let notation = notation_from_fragment(url)?;
    decode(&notation)
}
