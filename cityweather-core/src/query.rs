use std::fmt;

/// Cities the provider cannot tell apart from same-named places elsewhere,
/// paired with the ISO 3166-1 alpha-2 code that pins them down.
///
/// The order is the order in which the city list is presented.
pub const KNOWN_CITIES: &[(&str, &str)] = &[
    ("Lisbon", "PT"),
    ("Madrid", "ES"),
    ("Paris", "FR"),
    ("Berlin", "DE"),
    ("Copenhagen", "DK"),
    ("Rome", "IT"),
    ("London", "GB"),
    ("Dublin", "IE"),
    ("Prague", "CZ"),
    ("Vienna", "AT"),
];

/// Country code for one of the known cities. Matching is exact and case-sensitive.
pub fn country_code_for(city: &str) -> Option<&'static str> {
    KNOWN_CITIES
        .iter()
        .find(|(name, _)| *name == city)
        .map(|(_, code)| *code)
}

/// Turn a location name into the provider's `q` parameter.
///
/// Known cities get their country code appended (`"Lisbon"` -> `"Lisbon,PT"`);
/// anything else is returned as-is.
pub fn resolve_query_key(location_name: &str) -> String {
    match country_code_for(location_name) {
        Some(code) => format!("{location_name},{code}"),
        None => location_name.to_string(),
    }
}

/// Names of the known cities, in presentation order.
pub fn known_city_names() -> impl Iterator<Item = &'static str> {
    KNOWN_CITIES.iter().map(|(name, _)| *name)
}

/// A location to look up, optionally with an explicit country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationQuery {
    pub name: String,
    pub country: Option<String>,
}

impl LocationQuery {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country: None,
        }
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// The `q` value sent to the provider.
    ///
    /// An explicit country always wins over the built-in table.
    pub fn query_key(&self) -> String {
        match &self.country {
            Some(country) => format!("{},{}", self.name, country),
            None => resolve_query_key(&self.name),
        }
    }
}

impl From<&str> for LocationQuery {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for LocationQuery {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query_key())
    }
}
