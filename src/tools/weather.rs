//! Weather forecast lookup backed by the Open-Meteo API.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::Tool;

const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Look up the current forecast for a location.
pub struct GetWeatherForecast;

#[async_trait]
impl Tool for GetWeatherForecast {
    fn name(&self) -> &str {
        "get_weather_forecast"
    }

    fn description(&self) -> &str {
        "Get the current weather forecast for a location. Returns temperature in fahrenheit, wind speed in km/h, and wind direction."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "location": {
                    "type": "string",
                    "description": "The city name, e.g. 'Boston' or 'Paris, France'"
                }
            },
            "required": ["location"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let location = args["location"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'location' argument"))?;

        let client = reqwest::Client::builder()
            .user_agent("weather-agent/0.1")
            .timeout(std::time::Duration::from_secs(15))
            .build()?;

        let place = geocode(&client, location).await?;
        let forecast = fetch_forecast(&client, &place).await?;

        Ok(format_forecast(&place, &forecast))
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodedPlace>>,
}

#[derive(Debug, Deserialize)]
struct GeocodedPlace {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentWeather,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    time: String,
    temperature_2m: f64,
    wind_speed_10m: f64,
    wind_direction_10m: f64,
}

/// Resolve a location name to coordinates.
async fn geocode(client: &reqwest::Client, location: &str) -> anyhow::Result<GeocodedPlace> {
    let url = format!(
        "{}?name={}&count=1",
        GEOCODING_URL,
        urlencoding::encode(location)
    );

    let response: GeocodingResponse = client
        .get(&url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    response
        .results
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| anyhow::anyhow!("No matching location found for '{}'", location))
}

/// Fetch the current weather at the given coordinates.
async fn fetch_forecast(
    client: &reqwest::Client,
    place: &GeocodedPlace,
) -> anyhow::Result<CurrentWeather> {
    let response: ForecastResponse = client
        .get(FORECAST_URL)
        .query(&[
            ("latitude", place.latitude.to_string()),
            ("longitude", place.longitude.to_string()),
            (
                "current",
                "temperature_2m,wind_speed_10m,wind_direction_10m".to_string(),
            ),
            ("temperature_unit", "fahrenheit".to_string()),
            ("wind_speed_unit", "kmh".to_string()),
        ])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    Ok(response.current)
}

/// Render the forecast as a compact text summary for the model.
fn format_forecast(place: &GeocodedPlace, current: &CurrentWeather) -> String {
    let location = match &place.country {
        Some(country) => format!("{}, {}", place.name, country),
        None => place.name.clone(),
    };

    let observed = chrono::NaiveDateTime::parse_from_str(&current.time, "%Y-%m-%dT%H:%M")
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| current.time.clone());

    format!(
        "Current weather for {} (as of {}): temperature {:.1}F, wind {:.1} km/h from the {}.",
        location,
        observed,
        current.temperature_2m,
        current.wind_speed_10m,
        compass_point(current.wind_direction_10m)
    )
}

/// Convert wind direction in degrees to a 16-point compass abbreviation.
fn compass_point(degrees: f64) -> &'static str {
    const POINTS: [&str; 16] = [
        "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW",
        "NW", "NNW",
    ];
    let normalized = degrees.rem_euclid(360.0);
    let index = ((normalized / 22.5) + 0.5) as usize % 16;
    POINTS[index]
}
