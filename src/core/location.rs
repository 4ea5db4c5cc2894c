use crate::core::address::{parse_address, KeywordTable};
use crate::core::similarity::string_similarity;
use crate::models::{Area, City, Country, LocationMatch, MatchConfidence, ParsedAddress};
use crate::services::directory::{DirectoryError, LocationDirectory};

/// Minimum similarity for a country name to be accepted
pub const COUNTRY_THRESHOLD: f64 = 0.8;
/// Minimum similarity for the best city candidate to be accepted
pub const CITY_THRESHOLD: f64 = 0.7;
/// Minimum similarity for the best area candidate to be accepted
pub const AREA_THRESHOLD: f64 = 0.6;

/// Parsed address plus the location it resolved to
#[derive(Debug, Clone, PartialEq)]
pub struct AddressResolution {
    pub parsed: ParsedAddress,
    pub location: LocationMatch,
}

/// Resolves free-text addresses to canonical country/city/area rows
///
/// # Pipeline Stages
/// 1. Keyword-based address parsing
/// 2. Country match (first acceptable candidate)
/// 3. City match (best candidate, scoped to the country)
/// 4. Area match (best candidate within the city)
/// 5. Confidence grading
#[derive(Debug, Clone)]
pub struct LocationMatcher<D> {
    directory: D,
    keywords: KeywordTable,
}

impl<D: LocationDirectory> LocationMatcher<D> {
    pub fn new(directory: D, keywords: KeywordTable) -> Self {
        Self { directory, keywords }
    }

    pub fn with_builtin_keywords(directory: D) -> Self {
        Self::new(directory, KeywordTable::builtin())
    }

    pub fn keywords(&self) -> &KeywordTable {
        &self.keywords
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Parse and resolve an address in one go
    pub async fn resolve(&self, address: Option<&str>) -> Result<AddressResolution, DirectoryError> {
        let parsed = parse_address(address, &self.keywords);
        let location = self.match_parsed(&parsed).await?;
        Ok(AddressResolution { parsed, location })
    }

    /// Match an address against the canonical location tables
    ///
    /// Malformed or unknown addresses resolve to [`MatchConfidence::None`];
    /// only directory read failures are returned as errors.
    pub async fn match_location(&self, address: Option<&str>) -> Result<LocationMatch, DirectoryError> {
        Ok(self.resolve(address).await?.location)
    }

    /// Match an already parsed address
    pub async fn match_parsed(&self, parsed: &ParsedAddress) -> Result<LocationMatch, DirectoryError> {
        let mut result = LocationMatch {
            postal_code: parsed.postal_code.clone(),
            ..LocationMatch::default()
        };

        let mut countries: Option<Vec<Country>> = None;

        if let Some(raw_country) = parsed.country.as_deref() {
            let rows = self.directory.active_countries().await?;
            if let Some(country) = find_country(raw_country, &rows) {
                result.country_id = Some(country.id);
                result.country_name = Some(country.name.clone());
            }
            countries = Some(rows);
        }

        if let Some(raw_city) = parsed.city.as_deref() {
            let cities = self.directory.active_cities(result.country_id).await?;
            if let Some(city) = find_city(raw_city, &cities) {
                result.city_id = Some(city.id);
                result.city_name = Some(city.name.clone());

                if result.country_id.is_none() {
                    if let Some(country_id) = city.country_id {
                        let rows = match countries.take() {
                            Some(rows) => rows,
                            None => self.directory.active_countries().await?,
                        };
                        result.country_id = Some(country_id);
                        result.country_name = rows
                            .iter()
                            .find(|c| c.id == country_id)
                            .map(|c| c.name.clone());
                    }
                }
            }
        }

        if let (Some(raw_area), Some(city_id)) = (parsed.area.as_deref(), result.city_id) {
            let areas = self.directory.active_areas(city_id).await?;
            if let Some(area) = find_area(raw_area, &areas) {
                result.area_id = Some(area.id);
                result.area_name = Some(area.name.clone());
            }
        }

        grade(&mut result);

        tracing::info!(
            "Location match: confidence={}, country={:?}, city={:?}, area={:?}, manual={}",
            result.match_confidence.as_str(),
            result.country_name,
            result.city_name,
            result.area_name,
            result.requires_manual_selection
        );

        Ok(result)
    }
}

/// First country whose name is similar enough to, or contained in, the raw string
pub fn find_country<'a>(raw: &str, countries: &'a [Country]) -> Option<&'a Country> {
    let raw_lower = raw.to_lowercase();
    countries.iter().find(|country| {
        string_similarity(raw, &country.name) >= COUNTRY_THRESHOLD
            || raw_lower.contains(&country.name.to_lowercase())
    })
}

/// Highest scoring city at or above [`CITY_THRESHOLD`]
pub fn find_city<'a>(raw: &str, cities: &'a [City]) -> Option<&'a City> {
    best_candidate(raw, cities, |c| &c.name, CITY_THRESHOLD)
}

/// Highest scoring area at or above [`AREA_THRESHOLD`]
pub fn find_area<'a>(raw: &str, areas: &'a [Area]) -> Option<&'a Area> {
    best_candidate(raw, areas, |a| &a.name, AREA_THRESHOLD)
}

// Ties keep the earliest candidate.
fn best_candidate<'a, T>(
    raw: &str,
    candidates: &'a [T],
    name: impl Fn(&T) -> &String,
    threshold: f64,
) -> Option<&'a T> {
    let mut best: Option<(&T, f64)> = None;

    for candidate in candidates {
        let score = string_similarity(raw, name(candidate));
        if score > best.map_or(0.0, |(_, s)| s) {
            best = Some((candidate, score));
        }
    }

    best.filter(|(_, score)| *score >= threshold).map(|(c, _)| c)
}

fn grade(result: &mut LocationMatch) {
    let (confidence, manual) = match (result.country_id, result.city_id, result.area_id) {
        (_, Some(_), Some(_)) => (MatchConfidence::High, false),
        (_, Some(_), None) => (MatchConfidence::Medium, true),
        (Some(_), None, _) => (MatchConfidence::Low, true),
        _ => (MatchConfidence::None, true),
    };
    result.match_confidence = confidence;
    result.requires_manual_selection = manual;
}
