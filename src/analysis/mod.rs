//! Post-scan analysis: canonical keys and triple aggregation

pub mod canonical;
pub mod triples;

#[allow(unused_imports)]
pub use canonical::{CanonicalKey, Term};
#[allow(unused_imports)]
pub use triples::{Triple, TripleAggregator, TripleAnalysis, TripleMap};
