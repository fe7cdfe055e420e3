//! sc-filter: facet options, filter predicate, and URL state codec.

pub mod facets;
pub mod predicate;
pub mod state;
pub mod url_codec;

pub use facets::{
    FacetOption, FacetOptions, UNKNOWN_MACHINE, build_facets, build_facets_for,
    collation_key, compare_case_insensitive, machine_options,
};
pub use predicate::{filter_records, matches};
pub use state::{FilterChip, FilterState, FilterValue};
pub use url_codec::{Navigation, SyncStep, UrlSync, decode, decode_merge, encode};
