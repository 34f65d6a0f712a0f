pub mod render;

use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{info, warn};

use crate::{
    aggregator::{CITY_NOT_FOUND_MESSAGE, ForecastError, UPSTREAM_UNAVAILABLE_MESSAGE},
    app::state::AppState,
    resilience::readiness::Readiness,
};

/// One-shot error banner shown on the search page after a redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    MissingCity,
    CityNotFound,
    ApiUnavailable,
}

impl Flash {
    pub fn code(self) -> &'static str {
        match self {
            Self::MissingCity => "cidade-em-falta",
            Self::CityNotFound => "cidade-desconhecida",
            Self::ApiUnavailable => "api-indisponivel",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        [Self::MissingCity, Self::CityNotFound, Self::ApiUnavailable]
            .into_iter()
            .find(|flash| flash.code() == code)
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::MissingCity => "Por favor, insira o nome de uma cidade.",
            Self::CityNotFound => CITY_NOT_FOUND_MESSAGE,
            Self::ApiUnavailable => UPSTREAM_UNAVAILABLE_MESSAGE,
        }
    }
}

impl From<&ForecastError> for Flash {
    fn from(err: &ForecastError) -> Self {
        match err {
            ForecastError::CityNotFound(_) => Self::CityNotFound,
            ForecastError::UpstreamUnavailable(_) => Self::ApiUnavailable,
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.settings.static_dir);
    Router::new()
        .route("/", get(index))
        .route("/resultado", get(resultado))
        .route("/healthz", get(healthz))
        .nest_service("/static", static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(state: AppState) -> Result<()> {
    let addr: SocketAddr = state
        .settings
        .listen
        .parse()
        .with_context(|| format!("invalid listen address {:?}", state.settings.listen))?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr} failed"))?;

    if !state.readiness().can_serve_forecasts() {
        warn!("no cities loaded; every search will report an unknown city");
    }
    info!("serving forecasts on http://{addr}");

    axum::serve(listener, router(Arc::new(state)).into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("web server failed")?;

    info!("server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for ctrl-c: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

#[derive(Debug, Deserialize)]
struct IndexQuery {
    erro: Option<String>,
}

async fn index(State(state): State<Arc<AppState>>, Query(query): Query<IndexQuery>) -> Html<String> {
    let flash = query.erro.as_deref().and_then(Flash::from_code);
    Html(render::index_page(&state.reference().cities.names(), flash))
}

#[derive(Debug, Deserialize)]
struct ResultQuery {
    cidade: Option<String>,
}

async fn resultado(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ResultQuery>,
) -> Response {
    let Some(city) = query.cidade.filter(|city| !city.trim().is_empty()) else {
        return redirect_with(Flash::MissingCity);
    };

    match state.aggregator.forecast_by_city(&city).await {
        Ok(days) => Html(render::forecast_page(&city, &days, &state.settings.icons_url)).into_response(),
        Err(err) => redirect_with(Flash::from(&err)),
    }
}

fn redirect_with(flash: Flash) -> Response {
    Redirect::to(&format!("/?erro={}", flash.code())).into_response()
}

#[derive(Debug, Serialize)]
struct Health {
    status: Readiness,
    cities: usize,
    weather_types: usize,
    loaded_at: DateTime<Utc>,
}

async fn healthz(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Health>) {
    let reference = state.reference();
    let status = reference.readiness();
    let code = if status.can_serve_forecasts() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (
        code,
        Json(Health {
            status,
            cities: reference.cities.len(),
            weather_types: reference.weather_types.len(),
            loaded_at: reference.loaded_at,
        }),
    )
}
