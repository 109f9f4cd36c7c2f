/// Data layer: tables, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  hei_data.csv + entry_data.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  DataSource → Dataset (raw string cells)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  store    │  snapshot held for the session, explicit reload
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  column → allowed values, AND-composed
///   └──────────┘
///        │
///        ▼
///   ┌────────────────────┐
///   │  taxonomy / pivot  │  dropdown options, ranking table
///   └────────────────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod pivot;
pub mod store;
pub mod taxonomy;

#[cfg(test)]
pub(crate) mod fixtures;
