//! Share URL handling for the store

use pn_notation::{decode, notation_from_fragment};
use url::Url;

/// Pull a valid notation out of an absolute share URL
///
/// The URL must parse as absolute and carry a `pn` parameter in its fragment
/// whose percent-decoded value decodes as a notation. Any failure yields
/// `None`.
#[must_use]
pub fn extract_notation_from_share_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let notation = notation_from_fragment(parsed.fragment()?)?;
    if notation.is_empty() {
        return None;
    }

    decode(&notation).map(|_| notation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_from_absolute_url() {
        let url = "https://plates.example/designer#pn=PN%3Av1%2F96%2FA1%3A-CompoundA-10-uM-1";
        assert_eq!(
            extract_notation_from_share_url(url).as_deref(),
            Some("PN:v1/96/A1:-CompoundA-10-uM-1")
        );
    }

    #[test]
    fn ignores_other_fragment_params() {
        let url = "https://x.test/?a=1#view=grid&pn=PN%3Av1%2F6%2F";
        assert_eq!(extract_notation_from_share_url(url).as_deref(), Some("PN:v1/6/"));
    }

    #[test]
    fn unescaped_fragment_still_works() {
        let url = "https://x.test/#pn=PN:v1/12/A1:HeLa";
        assert_eq!(
            extract_notation_from_share_url(url).as_deref(),
            Some("PN:v1/12/A1:HeLa")
        );
    }

    #[test]
    fn rejects_relative_and_invalid() {
        assert!(extract_notation_from_share_url("#pn=PN%3Av1%2F6%2F").is_none());
        assert!(extract_notation_from_share_url("/designer#pn=PN%3Av1%2F6%2F").is_none());
        assert!(extract_notation_from_share_url("https://x.test/").is_none());
        assert!(extract_notation_from_share_url("https://x.test/#pn=").is_none());
        assert!(extract_notation_from_share_url("https://x.test/#pn=garbage").is_none());
        assert!(extract_notation_from_share_url("not a url").is_none());
    }
}
