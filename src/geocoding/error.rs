use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeocodingError {
    #[error("Could not resolve city '{city}' to coordinates")]
    Unresolved { city: String },

    #[error("Invalid geocoding endpoint '{0}'")]
    Url(String, #[source] url::ParseError),

    #[error("Geocoding request failed for city '{city}'")]
    NetworkRequest {
        city: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Geocoding request for city '{city}' failed with status {status}")]
    HttpStatus {
        city: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse geocoding response for city '{city}'")]
    MalformedResponse {
        city: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Geocoder returned invalid coordinate '{value}' for city '{city}'")]
    InvalidCoordinate { city: String, value: String },
}
