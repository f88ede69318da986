use isocountry::CountryCode;

use super::prelude::*;

/// Resolves an ISO 3166-1 alpha-2 code, e.g. `FR`, to the
/// display name of the country.
pub fn country_name_from_code(code: &str) -> Result<&'static str> {
    let normalized = code.trim().to_ascii_uppercase();
    CountryCode::for_alpha2(&normalized)
        .map(|country| country.name())
        .map_err(|_| Error::CountryNotFound(code.to_owned()))
}
