pub mod aggregate;
pub mod drift_ensemble;
pub mod member;
pub mod order_selection;
pub mod pruning;
pub mod reweight;
pub mod scoring;
pub mod windowed_selector;

// Re-exports for convenience
pub use drift_ensemble::{DriftEnsemble, RoundSummary};
pub use member::EnsembleMember;
pub use order_selection::Selection;
pub use scoring::{ScoredEntry, Stamped};
pub use windowed_selector::{Phase, WindowedSelector};
