//! Standalone HTTP deployment of the recipe endpoint.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use log::info;
use std::sync::Arc;

use super::{dispatch, EndpointRequest, EndpointResponse, HttpAdapter, RecipeService};
use crate::config::ServerConfig;
use crate::error::Result;

pub const RECIPE_PATH: &str = "/recipe";

/// Adapter between axum requests/responses and the endpoint
pub struct AxumAdapter;

impl HttpAdapter for AxumAdapter {
    type Request = (Method, Bytes);
    type Response = Response;

    fn receive((method, body): Self::Request) -> EndpointRequest {
        EndpointRequest {
            method: method.as_str().to_string(),
            body: Some(String::from_utf8_lossy(&body).into_owned()),
        }
    }

    fn send(response: EndpointResponse) -> Self::Response {
        let status =
            StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut headers = HeaderMap::new();
        for (name, value) in response.headers {
            headers.insert(
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            );
        }

        (status, headers, response.body).into_response()
    }
}

/// Build the router serving the recipe endpoint for every method
pub fn router(service: Arc<RecipeService>) -> Router {
    Router::new()
        .route(RECIPE_PATH, any(recipe_handler))
        .with_state(service)
}

async fn recipe_handler(
    State(service): State<Arc<RecipeService>>,
    method: Method,
    body: Bytes,
) -> Response {
    dispatch::<AxumAdapter>(&service, (method, body)).await
}

/// Bind to the configured address and serve until the process stops
pub async fn serve(config: &ServerConfig, service: RecipeService) -> Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let app = router(Arc::new(service));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server is running on port {}", config.port);
    axum::serve(listener, app).await?;

    Ok(())
}
