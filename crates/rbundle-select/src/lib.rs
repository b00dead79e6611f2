//! Research document selection for rbundle.
//!
//! The pipeline is linear: walk the research directory in sorted order,
//! admit files by extension, exclude glob and age window, count query hits,
//! score, drop zero-hit files when a query is present, rank, truncate.

pub mod model;
pub mod naming;
pub mod query;
pub mod scan;
pub mod score;

pub use model::{Candidate, ScanStats, Selection};
pub use naming::flat_name;
pub use query::QueryMatcher;
pub use scan::{CandidateSelector, rank};
