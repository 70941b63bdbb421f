/// Data layer: trip model, loading, filtering and raw-row paging.
///
/// Architecture:
/// ```text
///  <city>.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → TripTable (+ Schema, derived fields)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  month / day predicates → new TripTable
///   └──────────┘
///        │
///        ├──────────────► stats::*   (aggregations)
///        ▼
///   ┌──────────┐
///   │  pager    │  cyclic window over raw cells
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod pager;
