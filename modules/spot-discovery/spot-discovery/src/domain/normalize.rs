//! Text normalization shared by search and image-name resolution.

use crate::config::AssetConfig;

const HANGUL_SYLLABLES: std::ops::RangeInclusive<char> = '\u{AC00}'..='\u{D7A3}';

/// Lower-case and drop every whitespace character.
///
/// Used for case- and space-insensitive substring matching.
#[must_use]
pub fn normalize(s: Option<&str>) -> String {
    s.unwrap_or_default()
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Deterministic file stem for a display name.
///
/// Keeps ASCII word characters and Hangul syllables only, lower-cased.
#[must_use]
pub fn normalize_for_asset(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || HANGUL_SYLLABLES.contains(c))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Resolve a spot thumbnail: the local asset derived from the name when
/// preferred and derivable, otherwise the catalog URL.
#[must_use]
pub fn resolve_thumbnail(name: &str, raw_url: Option<&str>, assets: &AssetConfig) -> Option<String> {
    if assets.prefer_local {
        let stem = normalize_for_asset(name);
        if !stem.is_empty() {
            let base = assets.base_path.trim_end_matches('/');
            return Some(format!("{base}/{stem}.{}", assets.extension));
        }
    }

    raw_url
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(ToOwned::to_owned)
}

#[cfg(test)]
#[allow(clippy::non_ascii_literal)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_spaces_and_case() {
        assert_eq!(normalize(Some("  Jeju  Hotel\t")), "jejuhotel");
        assert_eq!(normalize(Some("제주 호 텔")), "제주호텔");
    }

    #[test]
    fn normalize_is_total() {
        assert_eq!(normalize(None), "");
        assert_eq!(normalize(Some("")), "");
        assert_eq!(normalize_for_asset(""), "");
    }

    #[test]
    fn asset_name_drops_punctuation() {
        assert_eq!(normalize_for_asset("성산 일출봉 (UNESCO)!"), "성산일출봉unesco");
        assert_eq!(normalize_for_asset("Cafe_Delmoondo-2"), "cafe_delmoondo2");
    }

    #[test]
    fn thumbnail_prefers_local_asset() {
        let assets = AssetConfig::default();
        assert_eq!(
            resolve_thumbnail("우도 등대", Some("https://cdn/x.png"), &assets).as_deref(),
            Some("/spotimage/우도등대.jpg")
        );
    }

    #[test]
    fn thumbnail_falls_back_to_catalog_url() {
        let assets = AssetConfig::default();
        assert_eq!(
            resolve_thumbnail("!!!", Some(" https://cdn/x.png "), &assets).as_deref(),
            Some("https://cdn/x.png")
        );
        assert_eq!(resolve_thumbnail("", None, &assets), None);

        let remote_only = AssetConfig {
            prefer_local: false,
            ..AssetConfig::default()
        };
        assert_eq!(resolve_thumbnail("Hamdeok", Some(""), &remote_only), None);
    }
}
