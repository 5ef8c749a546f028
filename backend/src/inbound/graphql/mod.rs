//! GraphQL inbound adapter served from the actix-web app at `/graphql`.
//!
//! `POST /graphql` executes operations; `GET /graphql` serves the GraphiQL
//! playground. Resolvers call the same mutation guards as the REST handlers.

use std::sync::Arc;

use actix_web::{HttpResponse, web};
use async_graphql::http::GraphiQLSource;
use async_graphql::{EmptySubscription, Schema};
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};

use crate::domain::ports::CountryService;

pub mod error;
pub mod resolvers;
pub mod types;

pub use resolvers::{MutationRoot, QueryRoot};

/// Path the schema is mounted on.
pub const GRAPHQL_PATH: &str = "/graphql";

/// Executable country schema.
pub type CountrySchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Data shared with every resolver.
#[derive(Clone)]
pub struct GraphqlContext {
    /// Country port.
    pub countries: Arc<dyn CountryService>,
    /// Version stamped on error extensions.
    pub api_version: Arc<str>,
}

/// Build the schema around the country port.
pub fn build_schema(countries: Arc<dyn CountryService>, api_version: Arc<str>) -> CountrySchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(GraphqlContext {
            countries,
            api_version,
        })
        .finish()
}

async fn execute(schema: web::Data<CountrySchema>, request: GraphQLRequest) -> GraphQLResponse {
    schema.execute(request.into_inner()).await.into()
}

async fn playground() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

/// Register the GraphQL endpoint. Expects `web::Data<CountrySchema>` in app
/// data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(GRAPHQL_PATH)
            .route(web::post().to(execute))
            .route(web::get().to(playground)),
    );
}
