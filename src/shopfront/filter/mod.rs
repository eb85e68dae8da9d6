//! Faceted catalog filtering.
//!
//! The listing page is driven by a single [`FilterState`]. Everything else in
//! this module is a pure function of that state and the catalog:
//!
//! - [`predicate`]: compiles the state into one boolean test per product
//! - [`facets`]: per-facet value counts, each ignoring its own selection
//! - [`sort`]: stable orderings for each [`SortKey`]
//! - [`query`]: the state as a shareable query string and back
//! - [`chips`]: the active selections as individually removable filters
//!
//! Nothing here caches. Callers recompute the whole view on every state
//! change; catalogs are small enough that a few linear scans are cheaper than
//! keeping derived data in sync.

pub mod chips;
pub mod facets;
pub mod predicate;
pub mod query;
pub mod sort;
pub mod state;

pub use chips::AppliedFilter;
pub use facets::{FacetCount, Facets, PriceRange};
pub use predicate::Predicate;
pub use state::{Facet, FilterState, Selection, SortKey};
