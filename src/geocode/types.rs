use serde::{Deserialize, Deserializer, Serialize};

/// One match as returned by the Nominatim search endpoint.
///
/// Fields are passed through untouched; only the shape is enforced. A field
/// that is missing or `null` upstream decodes to its empty value, so results
/// such as artificial postcode entries without an OSM object still decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationResult {
    #[serde(deserialize_with = "null_as_default")]
    pub place_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub licence: String,
    #[serde(deserialize_with = "null_as_default")]
    pub osm_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub osm_id: i64,
    /// South lat, north lat, west lon, east lon.
    #[serde(deserialize_with = "null_as_default")]
    pub boundingbox: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub lat: String,
    #[serde(deserialize_with = "null_as_default")]
    pub lon: String,
    #[serde(deserialize_with = "null_as_default")]
    pub display_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub class: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub importance: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub icon: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
pub(crate) fn paris() -> LocationResult {
    LocationResult {
        place_id: 12345,
        licence: "Data © OpenStreetMap contributors, ODbL 1.0. https://osm.org/copyright"
            .to_string(),
        osm_type: "relation".to_string(),
        osm_id: 7444,
        boundingbox: vec![
            "48.8155755".to_string(),
            "48.9021560".to_string(),
            "2.2241220".to_string(),
            "2.4697602".to_string(),
        ],
        lat: "48.8566".to_string(),
        lon: "2.3522".to_string(),
        display_name: "Paris, France".to_string(),
        class: "boundary".to_string(),
        kind: "administrative".to_string(),
        importance: 0.9,
        icon: "https://nominatim.openstreetmap.org/ui/mapicons/poi_boundary_administrative.p.20.png"
            .to_string(),
    }
}
