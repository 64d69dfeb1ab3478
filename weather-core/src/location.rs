//! Turning a free-text city/district into the site's query address.

use crate::model::LocationQuery;

/// District value the site treats as the provincial center.
pub const CENTER_DISTRICT: &str = "merkez";

const FORECAST_PATH: &str = "/tahmin/il-ve-ilceler.aspx";

/// Canonicalize a place name into a lowercase ASCII token.
///
/// Turkish letters are transliterated, anything outside `[a-z0-9\s-]` is
/// dropped. Never fails; blank input yields an empty token.
pub fn normalize(text: &str) -> String {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(transliterate)
        .filter(|&c| is_token_char(c))
        .collect();

    cleaned.trim().to_string()
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_ascii_whitespace() || c == '-'
}

fn transliterate(c: char) -> char {
    match c {
        'ş' => 's',
        'ç' => 'c',
        'ğ' => 'g',
        'ü' => 'u',
        'ö' => 'o',
        'ı' => 'i',
        other => other,
    }
}

/// Build the forecast page address for already-normalized tokens.
///
/// The provincial center has no district segment on the site.
pub fn build_url(base_url: &str, city_token: &str, district_token: &str) -> String {
    let base = base_url.trim_end_matches('/');

    if district_token == CENTER_DISTRICT {
        format!("{base}{FORECAST_PATH}?il={city_token}")
    } else {
        format!("{base}{FORECAST_PATH}?il={city_token}&ilce={district_token}")
    }
}

impl LocationQuery {
    /// Normalize both parts and build the page address for this query.
    pub fn target_url(&self, base_url: &str) -> String {
        build_url(base_url, &normalize(self.city()), &normalize(self.district()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.mgm.gov.tr";

    #[test]
    fn transliterates_turkish_letters() {
        assert_eq!(normalize("Şanlıurfa"), "sanliurfa");
        assert_eq!(normalize("Çanakkale"), "canakkale");
        assert_eq!(normalize("Muğla"), "mugla");
        assert_eq!(normalize("Gümüşhane"), "gumushane");
        assert_eq!(normalize("Gölbaşı"), "golbasi");
    }

    #[test]
    fn strips_everything_outside_allowed_set() {
        assert_eq!(normalize("  Afyon-Karahisar! "), "afyon-karahisar");
        assert_eq!(normalize("İstanbul"), "istanbul");
        assert_eq!(normalize("Kahramanmaraş (46)"), "kahramanmaras 46");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("?!"), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        let samples = [
            "Trabzon",
            " ! abc ",
            "Şile / İstanbul",
            "ÇĞİÖŞÜ çğıöşü",
            "a\tb\nc",
            "日本 Tokyo",
            "--x--",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "input: {sample:?}");
        }
    }

    #[test]
    fn output_stays_in_allowed_set() {
        let samples = ["Ağrı", "Iğdır", "Düzce§", "Ünye €5", "Çorum\u{00a0}x", "ß straße"];
        for sample in samples {
            let token = normalize(sample);
            assert!(token.chars().all(is_token_char), "input {sample:?} produced {token:?}");
        }
    }

    #[test]
    fn center_district_omits_qualifier() {
        let url = build_url(BASE, "trabzon", "merkez");
        assert_eq!(url, "https://www.mgm.gov.tr/tahmin/il-ve-ilceler.aspx?il=trabzon");
        assert!(!url.contains("ilce="));
    }

    #[test]
    fn other_districts_keep_both_qualifiers() {
        for district in ["akcaabat", "of", "merkezefendi", "yomra"] {
            let url = build_url(BASE, "trabzon", district);
            assert!(url.contains("il=trabzon"));
            assert!(url.ends_with(&format!("&ilce={district}")));
        }
    }

    #[test]
    fn query_normalizes_before_building() {
        let query = LocationQuery::new("Trabzon", "Merkez").unwrap();
        assert_eq!(
            query.target_url("https://www.mgm.gov.tr/"),
            "https://www.mgm.gov.tr/tahmin/il-ve-ilceler.aspx?il=trabzon"
        );

        let query = LocationQuery::new("Muğla", "Köyceğiz").unwrap();
        assert_eq!(
            query.target_url(BASE),
            "https://www.mgm.gov.tr/tahmin/il-ve-ilceler.aspx?il=mugla&ilce=koycegiz"
        );
    }
}
