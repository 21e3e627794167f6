use async_graphql::http::GraphiQLSource;
use async_graphql_axum::GraphQL;
use axum::{Router, response, routing::get};
use tokio::net::TcpListener;
use tracing::info;

use super::FieldSchema;
use crate::config::ServerSettings;

/// Serves `schema` on `settings.path`: POST runs queries, GET opens GraphiQL.
pub async fn run_server(schema: FieldSchema, settings: &ServerSettings) -> std::io::Result<()> {
    let graphiql = GraphiQLSource::build().endpoint(&settings.path).finish();

    let app = Router::new().route(
        &settings.path,
        get(move || async move { response::Html(graphiql.clone()) })
            .post_service(GraphQL::new(schema)),
    );

    let addr = format!("{}:{}", settings.host, settings.port);
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, path = %settings.path, "GraphQL server listening");
    axum::serve(listener, app).await
}
