//! Kernel module - infrastructure traits, their implementations and the
//! message pipeline that ties them together.

pub mod llm_extraction;
pub mod mishwari_backend;
pub mod probe_kernel;
pub mod test_dependencies;
pub mod traits;

pub use llm_extraction::{LlmExtractionService, DEFAULT_MODEL};
pub use mishwari_backend::MishwariAdapter;
pub use probe_kernel::{MessageOutcome, ProbeKernel};
pub use test_dependencies::{MockExtractionService, MockTripBackend, TestDependencies};
pub use traits::*;
