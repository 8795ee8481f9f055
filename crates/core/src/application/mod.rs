// Application Layer - Use Cases and Business Logic

pub mod constants;
pub mod envelope;
pub mod extract;
pub mod lock;
pub mod mapper;
pub mod memory;
pub mod operation;
pub mod pipeline;

// Re-exports
pub use envelope::{Envelope, Outcome};
pub use lock::{ResourceLocks, ResourcePermit};
pub use memory::MemoryService;
pub use operation::OperationService;
pub use pipeline::{Analysis, Evolution, Pipeline, Validation};
