use std::sync::LazyLock;

use regex::Regex;

use crate::models::ParsedAddress;

static POSTAL_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{5,6}\b").expect("valid postal code regex"));

static STREET_NUMBER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\s").expect("valid street number regex"));

/// Keyword lookup used to spot countries and cities inside address segments
///
/// Each entry maps a lowercase keyword to the canonical name it stands for.
/// Entries are checked in insertion order and the first hit wins, so more
/// specific keywords should be registered first.
#[derive(Debug, Clone, Default)]
pub struct KeywordTable {
    countries: Vec<(String, String)>,
    cities: Vec<(String, String)>,
}

impl KeywordTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Keywords for the regions the directory currently lists
    pub fn builtin() -> Self {
        let mut table = Self::empty();

        for keyword in ["UAE", "United Arab Emirates", "U.A.E"] {
            table.add_country(keyword, "United Arab Emirates");
        }

        table.add_city("Dubai", "Dubai");
        table.add_city("دبي", "Dubai");
        table.add_city("Abu Dhabi", "Abu Dhabi");
        table.add_city("Sharjah", "Sharjah");
        table.add_city("Ajman", "Ajman");
        table.add_city("Ras Al", "Ras Al Khaimah");
        table.add_city("Fujairah", "Fujairah");
        table.add_city("Umm Al", "Umm Al Quwain");

        table
    }

    pub fn add_country(&mut self, keyword: &str, canonical: &str) -> &mut Self {
        self.countries.push((keyword.to_lowercase(), canonical.to_string()));
        self
    }

    pub fn add_city(&mut self, keyword: &str, canonical: &str) -> &mut Self {
        self.cities.push((keyword.to_lowercase(), canonical.to_string()));
        self
    }

    pub fn country_keywords(&self) -> impl Iterator<Item = (&str, &str)> {
        self.countries.iter().map(|(k, c)| (k.as_str(), c.as_str()))
    }

    pub fn city_keywords(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cities.iter().map(|(k, c)| (k.as_str(), c.as_str()))
    }

    fn find_country(&self, segment_lower: &str) -> Option<&str> {
        find_keyword(&self.countries, segment_lower)
    }

    fn find_city(&self, segment_lower: &str) -> Option<&str> {
        find_keyword(&self.cities, segment_lower)
    }

    /// True when the segment carries a keyword of the given canonical country
    fn names_country(&self, segment_lower: &str, canonical: &str) -> bool {
        segment_lower == canonical.to_lowercase()
            || self
                .countries
                .iter()
                .any(|(k, c)| c == canonical && segment_lower.contains(k.as_str()))
    }

    /// True when the whole segment is the given city or one of its keywords
    fn names_city(&self, segment_lower: &str, canonical: &str) -> bool {
        segment_lower == canonical.to_lowercase()
            || self
                .cities
                .iter()
                .any(|(k, c)| c == canonical && segment_lower == k)
    }
}

fn find_keyword<'a>(entries: &'a [(String, String)], segment_lower: &str) -> Option<&'a str> {
    entries
        .iter()
        .find(|(keyword, _)| segment_lower.contains(keyword.as_str()))
        .map(|(_, canonical)| canonical.as_str())
}

/// Split a free-text address into country, city, area and postal code
///
/// Addresses are expected in the usual "street, area, city, country" shape
/// but no ordering is assumed. A segment that is exactly a city name or
/// keyword decides the city. Failing that, the last segment containing a
/// city keyword wins, so area names such as "Dubai Healthcare City" do not
/// shadow the city segment after them. Anything that cannot be recognized is
/// left as `None`; this never fails.
pub fn parse_address(address: Option<&str>, keywords: &KeywordTable) -> ParsedAddress {
    let address = match address.map(str::trim) {
        Some(a) if !a.is_empty() => a,
        _ => return ParsedAddress::default(),
    };

    let segments: Vec<&str> = address
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let postal_code = POSTAL_CODE.find(address).map(|m| m.as_str().to_string());

    let mut country: Option<String> = None;
    let mut city: Option<String> = None;
    // Set once a whole segment names the city; nothing overrides it after that
    let mut city_exact = false;

    for segment in &segments {
        let lower = segment.to_lowercase();
        if country.is_none() {
            country = keywords.find_country(&lower).map(str::to_string);
        }
        if !city_exact {
            if let Some(found) = keywords.find_city(&lower) {
                city_exact = keywords.names_city(&lower, found);
                city = Some(found.to_string());
            }
        }
        if country.is_some() && city_exact {
            break;
        }
    }

    let area = segments
        .iter()
        .filter(|segment| {
            let lower = segment.to_lowercase();
            if let Some(c) = &country {
                if keywords.names_country(&lower, c) {
                    return false;
                }
            }
            if let Some(c) = &city {
                if keywords.names_city(&lower, c) {
                    return false;
                }
            }
            if let Some(code) = &postal_code {
                if segment.contains(code.as_str()) {
                    return false;
                }
            }
            true
        })
        .find(|segment| !STREET_NUMBER_PREFIX.is_match(segment))
        .map(|segment| segment.to_string());

    let parsed = ParsedAddress {
        country,
        city,
        area,
        postal_code,
    };

    tracing::debug!(
        "Parsed address {:?} -> country: {:?}, city: {:?}, area: {:?}, postal code: {:?}",
        address,
        parsed.country,
        parsed.city,
        parsed.area,
        parsed.postal_code
    );

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(address: &str) -> ParsedAddress {
        parse_address(Some(address), &KeywordTable::builtin())
    }

    #[test]
    fn test_empty_address() {
        let keywords = KeywordTable::builtin();
        assert!(parse_address(None, &keywords).is_empty());
        assert!(parse_address(Some(""), &keywords).is_empty());
        assert!(parse_address(Some("   "), &keywords).is_empty());
    }

    #[test]
    fn test_full_dubai_address() {
        let parsed = parse("123 Sheikh Zayed Rd, Downtown, Dubai, United Arab Emirates, 12345");

        assert_eq!(parsed.country.as_deref(), Some("United Arab Emirates"));
        assert_eq!(parsed.city.as_deref(), Some("Dubai"));
        assert_eq!(parsed.area.as_deref(), Some("Downtown"));
        assert_eq!(parsed.postal_code.as_deref(), Some("12345"));
    }

    #[test]
    fn test_country_abbreviation() {
        let parsed = parse("4 Al Ittihad Rd, Al Nahda, Sharjah, UAE");

        assert_eq!(parsed.country.as_deref(), Some("United Arab Emirates"));
        assert_eq!(parsed.city.as_deref(), Some("Sharjah"));
        assert_eq!(parsed.area.as_deref(), Some("Al Nahda"));
        assert_eq!(parsed.postal_code, None);
    }

    #[test]
    fn test_exact_city_segment_beats_earlier_keyword() {
        let parsed = parse("Dubai Healthcare City, Abu Dhabi, UAE");
        assert_eq!(parsed.city.as_deref(), Some("Abu Dhabi"));
        // Not an exact city segment, so it is still an area candidate
        assert_eq!(parsed.area.as_deref(), Some("Dubai Healthcare City"));

        let parsed = parse("Ras Al Khor Industrial Area 2, Dubai, UAE");
        assert_eq!(parsed.city.as_deref(), Some("Dubai"));
        assert_eq!(parsed.area.as_deref(), Some("Ras Al Khor Industrial Area 2"));
    }

    #[test]
    fn test_later_keyword_hit_overrides_earlier_one() {
        let parsed = parse("Dubai Investments Park, Near Sharjah Border");
        assert_eq!(parsed.city.as_deref(), Some("Sharjah"));
    }

    #[test]
    fn test_exact_city_segment_is_not_overridden() {
        let parsed = parse("Al Quoz, Dubai, Sharjah Road");
        assert_eq!(parsed.city.as_deref(), Some("Dubai"));
    }

    #[test]
    fn test_arabic_city_keyword() {
        let parsed = parse("Al Karama, دبي");
        assert_eq!(parsed.city.as_deref(), Some("Dubai"));
        assert_eq!(parsed.area.as_deref(), Some("Al Karama"));
    }

    #[test]
    fn test_partial_emirate_keywords() {
        assert_eq!(parse("Al Nakheel, Ras Al Khaimah").city.as_deref(), Some("Ras Al Khaimah"));
        assert_eq!(parse("King Faisal St, Umm Al Quwain").city.as_deref(), Some("Umm Al Quwain"));
    }

    #[test]
    fn test_street_number_segments_skipped_for_area() {
        let parsed = parse("12 Al Wasl Rd, 45 Street 7, Jumeirah 1, Dubai");
        assert_eq!(parsed.area.as_deref(), Some("Jumeirah 1"));
    }

    #[test]
    fn test_six_digit_postal_code() {
        let parsed = parse("Flat 3, Baker Street, 110001");
        assert_eq!(parsed.postal_code.as_deref(), Some("110001"));
        assert_eq!(parsed.area.as_deref(), Some("Flat 3"));
    }

    #[test]
    fn test_unknown_region() {
        let parsed = parse("221B Baker Street, London, United Kingdom");
        assert_eq!(parsed.country, None);
        assert_eq!(parsed.city, None);
        assert_eq!(parsed.area.as_deref(), Some("221B Baker Street"));
    }

    #[test]
    fn test_extended_keyword_table() {
        let mut keywords = KeywordTable::builtin();
        keywords.add_country("Oman", "Oman").add_city("Muscat", "Muscat");

        let parsed = parse_address(Some("Al Khuwair, Muscat, Oman"), &keywords);
        assert_eq!(parsed.country.as_deref(), Some("Oman"));
        assert_eq!(parsed.city.as_deref(), Some("Muscat"));
        assert_eq!(parsed.area.as_deref(), Some("Al Khuwair"));
    }
}
