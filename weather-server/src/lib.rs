//! The proxy's HTTP surface: two routes that fetch a forecast from
//! WeatherAPI.com, normalize it, and return the flat DTO as JSON.
//!
//! Failures never leak upstream detail to the client. The provider error
//! (status, body, network failure) goes to the log; the client gets a
//! fixed message and a 400.

use axum::Router;
use axum::extract::{Path, Query, Request, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use serde::{Deserialize, Serialize};

use weather_core::{WeatherApiClient, WeatherDto, normalize};

const CITY_NOT_FOUND: &str =
    "City not found. Try checking your spelling or using a nearby city.";
const COORDS_FAILED: &str = "Location not found or WeatherAPI request failed.";
const MISSING_PARAMS: &str = "Missing lat or lon query params.";

#[derive(Clone)]
pub struct AppState {
    pub client: WeatherApiClient,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

type ApiResult = Result<axum::Json<WeatherDto>, (StatusCode, axum::Json<ErrorBody>)>;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/weather/{place}", get(weather_by_place))
        .route("/api/weather", get(weather_by_coords))
        .layer(middleware::from_fn(cors_headers))
        .with_state(state)
}

/// `GET /api/weather/{place}` — free-text place query, forwarded verbatim.
async fn weather_by_place(State(state): State<AppState>, Path(place): Path<String>) -> ApiResult {
    fetch_and_assemble(&state, &place, CITY_NOT_FOUND).await
}

#[derive(Debug, Deserialize)]
struct CoordsQuery {
    lat: Option<String>,
    lon: Option<String>,
}

/// `GET /api/weather?lat=&lon=` — both parameters required; no upstream
/// call is attempted when either is missing.
async fn weather_by_coords(
    State(state): State<AppState>,
    Query(query): Query<CoordsQuery>,
) -> ApiResult {
    let (Some(lat), Some(lon)) = (query.lat, query.lon) else {
        return Err(bad_request(MISSING_PARAMS));
    };

    let q = format!("{lat},{lon}");
    fetch_and_assemble(&state, &q, COORDS_FAILED).await
}

async fn fetch_and_assemble(state: &AppState, query: &str, user_message: &str) -> ApiResult {
    let raw = state.client.fetch_forecast(query).await.map_err(|err| {
        tracing::error!(query, error = format!("{err:#}"), "Error fetching weather");
        bad_request(user_message)
    })?;

    let dto = normalize::assemble(&raw).map_err(|err| {
        tracing::error!(query, error = format!("{err:#}"), "Error assembling weather response");
        bad_request(user_message)
    })?;

    Ok(axum::Json(dto))
}

fn bad_request(message: &str) -> (StatusCode, axum::Json<ErrorBody>) {
    (StatusCode::BAD_REQUEST, axum::Json(ErrorBody { error: message.to_string() }))
}

/// Permissive CORS on every response, matching the original deployment:
/// any origin, the four basic methods, Content-Type.
async fn cors_headers(req: Request, next: Next) -> Response {
    let mut res = next.run(req).await;
    let headers = res.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, PUT, DELETE"),
    );
    headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static("Content-Type"));
    res
}
