//! Route-configuration derivation for OpenAPI client code generation.
//!
//! Each parsed API operation ([`route::ParsedRoute`]) is turned into the names,
//! signatures and validation-schema expressions of its request function
//! ([`route::build_route_config`]) and the keys, hook names, invalidations and
//! cache timings of its data-fetching hooks ([`query::build_query_config`]).
//! [`config::output::resolve_output_config`] decides where generated files go
//! and [`alias::resolve_import_path`] how they import each other.

pub mod alias;
pub mod casing;
pub mod cli;
pub mod config;
pub mod errors;
pub mod output;
pub mod parse;
pub mod query;
pub mod route;
