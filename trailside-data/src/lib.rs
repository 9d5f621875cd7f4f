//! Data access for the Trailside engine: JSON loaders for trails, rules,
//! activity histories and requests, plus an HTTP forecast provider.
#![forbid(unsafe_code)]

pub mod forecast;
pub mod fs;
mod loaders;

pub use loaders::{
    DataError, RecommendationRequest, load_activities, load_request, load_rules, load_trails,
};
