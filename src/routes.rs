use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::data::model::Dataset;
use crate::error::QueryError;

/// Everything except RFC 3986 unreserved characters is escaped, so a `/`
/// inside an institution name cannot split the path.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const UNIVERSITY_PREFIX: &str = "/university/";

pub fn encode_institution(name: &str) -> String {
    utf8_percent_encode(name, SEGMENT).to_string()
}

/// Inverse of [`encode_institution`]. `None` when the bytes are not UTF-8.
pub fn decode_institution(segment: &str) -> Option<String> {
    percent_decode_str(segment)
        .decode_utf8()
        .ok()
        .map(|s| s.into_owned())
}

/// Path of the overview page for `name`.
pub fn institution_path(name: &str) -> String {
    format!("{UNIVERSITY_PREFIX}{}", encode_institution(name))
}

/// Pages of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    MapView,
    RankingTable,
    Comparison,
    /// Overview of one institution, holding its decoded display name.
    University(String),
    /// Unknown path or unknown institution, holding the requested path.
    NotFound(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::MapView => "/map_view".to_string(),
            Route::RankingTable => "/ranking_table".to_string(),
            Route::Comparison => "/comparison".to_string(),
            Route::University(name) => institution_path(name),
            Route::NotFound(path) => path.clone(),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Route::Home => "Homepage",
            Route::MapView => "Map View",
            Route::RankingTable => "Ranking Table",
            Route::Comparison => "HEI Comparison",
            Route::University(name) => name,
            Route::NotFound(_) => "404 - Not Found",
        }
    }
}

/// Map a request path to a page. University pages only resolve for names
/// present in the reference table.
pub fn resolve(path: &str, dataset: &Dataset) -> Result<Route, QueryError> {
    let route = match path {
        "/" | "" => Route::Home,
        "/map_view" => Route::MapView,
        "/ranking_table" => Route::RankingTable,
        "/comparison" => Route::Comparison,
        other => match other.strip_prefix(UNIVERSITY_PREFIX) {
            Some(segment) if !segment.contains('/') => match decode_institution(segment) {
                Some(name) if dataset.has_institution(&name)? => Route::University(name),
                _ => Route::NotFound(path.to_string()),
            },
            _ => Route::NotFound(path.to_string()),
        },
    };
    Ok(route)
}
