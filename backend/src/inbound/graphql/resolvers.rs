//! Query and mutation roots.

use async_graphql::{Context, Object, Result};

use crate::domain::country_commands::{
    create_country, delete_country, find_country_or_not_found, update_country,
};
use crate::domain::{CountryFilter, CountryId, CountryPageRequest};
use crate::inbound::graphql::GraphqlContext;
use crate::inbound::graphql::error::to_graphql_error;
use crate::inbound::graphql::types::{
    AddCountryInput, CountryObject, CountryPageObject, UpdateCountryInput,
};
use crate::inbound::validation::{validate_new_country, validate_patch};

/// Read operations.
#[derive(Debug, Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Country with the given id.
    async fn find_by_id(&self, ctx: &Context<'_>, id: i64) -> Result<CountryObject> {
        let data = ctx.data::<GraphqlContext>()?;
        find_country_or_not_found(data.countries.as_ref(), CountryId::new(id))
            .await
            .map(CountryObject::from)
            .map_err(|err| to_graphql_error(ctx, err))
    }

    /// Countries whose name and code contain the given fragments, ignoring
    /// case.
    async fn find_all(
        &self,
        ctx: &Context<'_>,
        name: Option<String>,
        code: Option<String>,
        #[graphql(default = 0)] page: u32,
        #[graphql(default = 10)] size: u32,
        #[graphql(default_with = "String::from(\"id\")")] sort: String,
    ) -> Result<CountryPageObject> {
        let data = ctx.data::<GraphqlContext>()?;
        let request = CountryPageRequest::from_parts(Some(page), Some(size), Some(sort.as_str()))
            .map_err(|err| to_graphql_error(ctx, err))?;
        data.countries
            .find_all(CountryFilter::new(name, code), request)
            .await
            .map(CountryPageObject::from)
            .map_err(|err| to_graphql_error(ctx, err))
    }
}

/// Write operations.
#[derive(Debug, Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create a country; fails when the name or code is taken.
    async fn add(&self, ctx: &Context<'_>, input: AddCountryInput) -> Result<CountryObject> {
        let data = ctx.data::<GraphqlContext>()?;
        let candidate = validate_new_country(Some(input.name.as_str()), Some(input.code.as_str()))
            .map_err(|err| to_graphql_error(ctx, err))?;
        create_country(data.countries.as_ref(), candidate)
            .await
            .map(CountryObject::from)
            .map_err(|err| to_graphql_error(ctx, err))
    }

    /// Partially update a country.
    async fn update(
        &self,
        ctx: &Context<'_>,
        id: i64,
        input: UpdateCountryInput,
    ) -> Result<CountryObject> {
        let data = ctx.data::<GraphqlContext>()?;
        let patch =
            validate_patch(input.name, input.code).map_err(|err| to_graphql_error(ctx, err))?;
        update_country(data.countries.as_ref(), CountryId::new(id), patch)
            .await
            .map(CountryObject::from)
            .map_err(|err| to_graphql_error(ctx, err))
    }

    /// Delete a country; returns `true` once removed.
    async fn delete(&self, ctx: &Context<'_>, id: i64) -> Result<bool> {
        let data = ctx.data::<GraphqlContext>()?;
        delete_country(data.countries.as_ref(), CountryId::new(id))
            .await
            .map(|()| true)
            .map_err(|err| to_graphql_error(ctx, err))
    }
}
