//! Query inputs for listing countries: filter, sort order and page window.

use pagination::{DEFAULT_PAGE_SIZE, PageRequest, PageRequestError};

use crate::domain::{Error, Violation};

/// Optional partial-text criteria; absent fields do not restrict results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountryFilter {
    /// Name fragment.
    pub name: Option<String>,
    /// Code fragment.
    pub code: Option<String>,
}

impl CountryFilter {
    /// Build a filter from optional name and code fragments.
    pub fn new(name: Option<String>, code: Option<String>) -> Self {
        Self { name, code }
    }
}

/// Sortable country columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CountrySortField {
    #[default]
    Id,
    Name,
    Code,
    DateCreated,
    DateUpdated,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Ordering applied before pagination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountrySort {
    /// Column to order by.
    pub field: CountrySortField,
    /// Ascending unless `desc` was requested.
    pub direction: SortDirection,
}

impl CountrySort {
    /// Parse `field` or `field,asc|desc`.
    ///
    /// Field names accept both `snake_case` and `camelCase` spellings.
    ///
    /// # Examples
    /// ```
    /// use country_service::domain::{CountrySort, CountrySortField, SortDirection};
    ///
    /// let sort = CountrySort::parse("name,desc").expect("valid sort");
    /// assert_eq!(sort.field, CountrySortField::Name);
    /// assert_eq!(sort.direction, SortDirection::Descending);
    /// ```
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let mut parts = raw.split(',').map(str::trim);
        let field = match parts.next().unwrap_or_default() {
            "" | "id" => CountrySortField::Id,
            "name" => CountrySortField::Name,
            "code" => CountrySortField::Code,
            "date_created" | "dateCreated" => CountrySortField::DateCreated,
            "date_updated" | "dateUpdated" => CountrySortField::DateUpdated,
            other => return Err(invalid_sort(format!("unknown sort property: {other}"))),
        };
        let direction = match parts.next() {
            None => SortDirection::Ascending,
            Some(dir) if dir.eq_ignore_ascii_case("asc") => SortDirection::Ascending,
            Some(dir) if dir.eq_ignore_ascii_case("desc") => SortDirection::Descending,
            Some(other) => return Err(invalid_sort(format!("unknown sort direction: {other}"))),
        };
        if parts.next().is_some() {
            return Err(invalid_sort(format!("malformed sort expression: {raw}")));
        }
        Ok(Self { field, direction })
    }
}

fn invalid_sort(message: String) -> Error {
    Error::validation(vec![Violation::new("Sort", message)])
}

/// Page window plus ordering for a list query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountryPageRequest {
    /// Offset window.
    pub page: PageRequest,
    /// Ordering applied before windowing.
    pub sort: CountrySort,
}

impl CountryPageRequest {
    /// Build a request from raw transport values.
    ///
    /// Missing values default to page `0`, size `10` and sort `id`.
    pub fn from_parts(
        page: Option<u32>,
        size: Option<u32>,
        sort: Option<&str>,
    ) -> Result<Self, Error> {
        let page = PageRequest::new(page.unwrap_or(0), size.unwrap_or(DEFAULT_PAGE_SIZE))
            .map_err(map_page_request_error)?;
        let sort = sort.map(CountrySort::parse).transpose()?.unwrap_or_default();
        Ok(Self { page, sort })
    }
}

fn map_page_request_error(error: PageRequestError) -> Error {
    Error::validation(vec![Violation::new("PageSize", error.to_string())])
}
