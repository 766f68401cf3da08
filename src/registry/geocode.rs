//! Geocoder adapter (Nominatim).
//!
//! The only adapter whose failure is fatal to a research run: every other
//! lookup needs the coordinate it produces. A resolved coordinate outside
//! the serviceable bounding box is rejected as an error, not returned as a
//! degraded result.

use serde_json::Value;

use crate::types::Location;

use super::client::HttpRegistry;
use super::{SourceError, SourceResult};

impl HttpRegistry {
    pub(crate) async fn query_geocode(&self, address: &str) -> SourceResult<Location> {
        // Fixed locality qualifier keeps free-text input anchored to the metro.
        let qualified = format!("{address}, Durban, South Africa");
        let params = [
            ("format", "json"),
            ("q", qualified.as_str()),
            ("limit", "1"),
            ("addressdetails", "1"),
        ];

        let response = self
            .http
            .get(&self.config.endpoints.nominatim)
            .query(&params)
            .send()
            .await
            .map_err(SourceError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(SourceError::Status(response.status().as_u16()));
        }
        let body: Value = response.json().await.map_err(SourceError::from_reqwest)?;

        let hit = body
            .as_array()
            .and_then(|hits| hits.first())
            .ok_or_else(|| SourceError::NotFound("Address not found".to_string()))?;
        let location = parse_location(hit)
            .ok_or_else(|| SourceError::NotFound("Geocoder returned an unusable result".to_string()))?;

        if !self.config.bounds.contains(location.lat, location.lon) {
            return Err(SourceError::OutsideServiceArea);
        }
        Ok(location)
    }
}

/// Parse one Nominatim hit into a `Location`. Coordinates arrive as strings.
pub(crate) fn parse_location(hit: &Value) -> Option<Location> {
    let lat = coord(hit.get("lat")?)?;
    let lon = coord(hit.get("lon")?)?;
    let display_name = hit.get("display_name")?.as_str()?.to_string();

    let address = hit.get("address").and_then(Value::as_object);
    let field = |key: &str| -> Option<String> {
        address
            .and_then(|a| a.get(key))
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    Some(Location {
        display_name,
        lat,
        lon,
        suburb: field("suburb")
            .or_else(|| field("city_district"))
            .or_else(|| Some("Unknown".to_string())),
        city: field("city").unwrap_or_else(|| "Durban".to_string()),
        province: field("state").unwrap_or_else(|| "KwaZulu-Natal".to_string()),
        country: field("country").unwrap_or_else(|| "South Africa".to_string()),
    })
}

fn coord(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_a_nominatim_hit_with_string_coordinates() {
        let hit = json!({
            "lat": "-29.8579",
            "lon": "31.0292",
            "display_name": "45 Florida Road, Windermere, Durban",
            "address": {
                "suburb": "Windermere",
                "city": "Durban",
                "state": "KwaZulu-Natal",
                "country": "South Africa"
            }
        });
        let location = parse_location(&hit).unwrap();
        assert!((location.lat - -29.8579).abs() < 1e-9);
        assert!((location.lon - 31.0292).abs() < 1e-9);
        assert_eq!(location.suburb.as_deref(), Some("Windermere"));
        assert_eq!(location.city, "Durban");
    }

    #[test]
    fn missing_address_details_fall_back_to_metro_defaults() {
        let hit = json!({
            "lat": -29.9,
            "lon": 30.95,
            "display_name": "Somewhere in Durban"
        });
        let location = parse_location(&hit).unwrap();
        assert_eq!(location.suburb.as_deref(), Some("Unknown"));
        assert_eq!(location.city, "Durban");
        assert_eq!(location.province, "KwaZulu-Natal");
        assert_eq!(location.country, "South Africa");
    }

    #[test]
    fn unparseable_coordinates_are_rejected() {
        let hit = json!({"lat": "not-a-number", "lon": "31.0", "display_name": "x"});
        assert!(parse_location(&hit).is_none());
    }
}
