use serde::Deserialize;

use crate::{
    error::{LookupFailure, ParseError},
    model::WeatherSnapshot,
    query::{LocationQuery, resolve_query_key},
    transport::{ReqwestTransport, Transport},
};

pub const DEFAULT_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Single-shot current-weather client.
///
/// Holds no per-request state: every call issues exactly one request and
/// nothing is cached or retried.
#[derive(Debug, Clone)]
pub struct WeatherLookupClient<T = ReqwestTransport> {
    transport: T,
    endpoint: String,
}

impl WeatherLookupClient<ReqwestTransport> {
    pub fn new() -> Self {
        Self::with_transport(ReqwestTransport::new())
    }
}

impl Default for WeatherLookupClient<ReqwestTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> WeatherLookupClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Point the client at a different endpoint URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn resolve_query_key(&self, location_name: &str) -> String {
        resolve_query_key(location_name)
    }

    /// Fetch current conditions for an already-resolved query key.
    pub async fn fetch_weather(
        &self,
        query_key: &str,
        api_key: &str,
    ) -> Result<WeatherSnapshot, LookupFailure> {
        tracing::debug!(query = %query_key, endpoint = %self.endpoint, "fetching current weather");

        let body = self
            .transport
            .get(&self.endpoint, &[("q", query_key), ("units", "metric"), ("appid", api_key)])
            .await
            .inspect_err(|e| {
                tracing::warn!(query = %query_key, error = %e, "weather request failed")
            })?;

        let snapshot = parse_snapshot(&body).inspect_err(|e| {
            tracing::warn!(query = %query_key, error = %e, "unexpected weather payload")
        })?;

        tracing::info!(
            city = %snapshot.city,
            temp = %snapshot.temperature_c,
            "weather snapshot fetched"
        );

        Ok(snapshot)
    }

    /// Resolve `location` to its query key and fetch it.
    pub async fn lookup(
        &self,
        location: &LocationQuery,
        api_key: &str,
    ) -> Result<WeatherSnapshot, LookupFailure> {
        self.fetch_weather(&location.query_key(), api_key).await
    }
}

/// Parse a current-weather payload. Every field read is required.
pub fn parse_snapshot(body: &str) -> Result<WeatherSnapshot, LookupFailure> {
    let parsed: OwCurrentResponse = serde_json::from_str(body).map_err(ParseError::from)?;

    let description = parsed
        .weather
        .into_iter()
        .next()
        .map(|w| w.description)
        .ok_or(ParseError::MissingCondition)?;

    Ok(WeatherSnapshot {
        city: parsed.name,
        country: parsed.sys.country,
        temperature_c: parsed.main.temp,
        temperature_min_c: parsed.main.temp_min,
        temperature_max_c: parsed.main.temp_max,
        humidity_pct: parsed.main.humidity,
        pressure_hpa: parsed.main.pressure,
        wind_speed_mps: parsed.wind.speed,
        description,
        sunrise: parsed.sys.sunrise,
        sunset: parsed.sys.sunset,
        observed_at: parsed.dt,
    })
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: f64,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    main: OwMain,
    sys: OwSys,
    wind: OwWind,
    weather: Vec<OwWeather>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Debug)]
    struct Recorded {
        url: String,
        query: Vec<(String, String)>,
    }

    #[derive(Debug)]
    enum Canned {
        Body(String),
        Status(u16),
        Refused,
    }

    #[derive(Debug)]
    struct FakeTransport {
        canned: Canned,
        calls: Mutex<Vec<Recorded>>,
    }

    impl FakeTransport {
        fn new(canned: Canned) -> Self {
            Self {
                canned,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String, TransportError> {
            self.calls.lock().unwrap().push(Recorded {
                url: url.to_string(),
                query: query.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            });

            match &self.canned {
                Canned::Body(body) => Ok(body.clone()),
                Canned::Status(status) => Err(TransportError::Status {
                    status: *status,
                    body: String::new(),
                }),
                Canned::Refused => Err(TransportError::Unreachable("connection refused".into())),
            }
        }
    }

    fn london_payload() -> serde_json::Value {
        json!({
            "coord": { "lon": -0.1257, "lat": 51.5085 },
            "weather": [
                { "id": 800, "main": "Clear", "description": "clear sky", "icon": "01d" }
            ],
            "main": {
                "temp": 15.2,
                "feels_like": 14.6,
                "temp_min": 13.9,
                "temp_max": 16.4,
                "pressure": 1019,
                "humidity": 60
            },
            "wind": { "speed": 3.4, "deg": 250 },
            "dt": 1_697_630_400,
            "sys": { "country": "GB", "sunrise": 1_697_610_540, "sunset": 1_697_648_280 },
            "name": "London",
            "cod": 200
        })
    }

    fn client_with(canned: Canned) -> WeatherLookupClient<FakeTransport> {
        WeatherLookupClient::with_transport(FakeTransport::new(canned))
    }

    #[tokio::test]
    async fn well_formed_payload_carries_values_through() {
        let client = client_with(Canned::Body(london_payload().to_string()));

        let snapshot = client.fetch_weather("London,GB", "KEY").await.unwrap();

        assert_eq!(snapshot.city, "London");
        assert_eq!(snapshot.country, "GB");
        assert_eq!(snapshot.temperature_c, 15.2);
        assert_eq!(snapshot.temperature_min_c, 13.9);
        assert_eq!(snapshot.temperature_max_c, 16.4);
        assert_eq!(snapshot.humidity_pct, 60.0);
        assert_eq!(snapshot.pressure_hpa, 1019.0);
        assert_eq!(snapshot.wind_speed_mps, 3.4);
        assert_eq!(snapshot.description, "clear sky");
        assert_eq!(snapshot.sunrise, 1_697_610_540);
        assert_eq!(snapshot.sunset, 1_697_648_280);
        assert_eq!(snapshot.observed_at, 1_697_630_400);
    }

    #[tokio::test]
    async fn request_carries_query_units_and_key() {
        let client = client_with(Canned::Body(london_payload().to_string()));

        client.fetch_weather("Vienna,AT", "SECRET").await.unwrap();

        let calls = client.transport.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].url, DEFAULT_ENDPOINT);
        assert_eq!(
            calls[0].query,
            vec![
                ("q".to_string(), "Vienna,AT".to_string()),
                ("units".to_string(), "metric".to_string()),
                ("appid".to_string(), "SECRET".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn lookup_resolves_known_city_first() {
        let client = client_with(Canned::Body(london_payload().to_string()))
            .with_endpoint("http://localhost:9/weather");

        client.lookup(&LocationQuery::from("Lisbon"), "KEY").await.unwrap();

        let calls = client.transport.calls.lock().unwrap();
        assert_eq!(calls[0].url, "http://localhost:9/weather");
        assert_eq!(calls[0].query[0], ("q".to_string(), "Lisbon,PT".to_string()));
    }

    #[tokio::test]
    async fn missing_main_is_a_parse_failure() {
        let mut payload = london_payload();
        payload.as_object_mut().unwrap().remove("main");
        let client = client_with(Canned::Body(payload.to_string()));

        let err = client.fetch_weather("London,GB", "KEY").await.unwrap_err();

        assert!(err.is_parse(), "expected parse failure, got {err:?}");
    }

    #[tokio::test]
    async fn wrongly_typed_field_is_a_parse_failure() {
        let mut payload = london_payload();
        payload["wind"]["speed"] = json!("fast");
        let client = client_with(Canned::Body(payload.to_string()));

        let err = client.fetch_weather("London,GB", "KEY").await.unwrap_err();

        assert!(err.is_parse());
    }

    #[tokio::test]
    async fn empty_weather_array_is_a_parse_failure() {
        let mut payload = london_payload();
        payload["weather"] = json!([]);
        let client = client_with(Canned::Body(payload.to_string()));

        let err = client.fetch_weather("London,GB", "KEY").await.unwrap_err();

        assert!(matches!(err, LookupFailure::Parse(ParseError::MissingCondition)));
    }

    #[tokio::test]
    async fn non_json_body_is_a_parse_failure() {
        let client = client_with(Canned::Body("<html>gateway</html>".into()));

        let err = client.fetch_weather("London,GB", "KEY").await.unwrap_err();

        assert!(err.is_parse());
    }

    #[tokio::test]
    async fn server_error_is_transport_failure_without_retry() {
        let client = client_with(Canned::Status(500));

        let err = client.fetch_weather("London,GB", "KEY").await.unwrap_err();

        assert!(err.is_transport());
        assert_eq!(client.transport.call_count(), 1);
    }

    #[tokio::test]
    async fn refused_connection_is_transport_failure_without_retry() {
        let client = client_with(Canned::Refused);

        let err = client.fetch_weather("London,GB", "KEY").await.unwrap_err();

        assert!(err.is_transport());
        assert_eq!(client.transport.call_count(), 1);
    }

    #[tokio::test]
    async fn repeated_fetches_are_independent() {
        let client = client_with(Canned::Body(london_payload().to_string()));

        let first = client.fetch_weather("London,GB", "KEY").await.unwrap();
        let second = client.fetch_weather("London,GB", "KEY").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(client.transport.call_count(), 2);
    }

    #[test]
    fn resolve_query_key_delegates_to_table() {
        let client = WeatherLookupClient::new();
        assert_eq!(client.resolve_query_key("Prague"), "Prague,CZ");
        assert_eq!(client.resolve_query_key("Tokyo"), "Tokyo");
        assert_eq!(client.endpoint(), DEFAULT_ENDPOINT);
    }
}
