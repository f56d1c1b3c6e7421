pub mod consolidator;
pub mod contradiction;
pub mod extractor;
pub mod lexicon;
pub mod normalizer;
pub mod rules;
pub mod types;

pub use consolidator::TruthConsolidator;
pub use contradiction::ContradictionDetector;
pub use extractor::ClaimExtractor;
pub use normalizer::normalize;
pub use types::{ClaimSet, Contradiction, LieType, TruthProfile};
