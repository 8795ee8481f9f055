// Domain Layer - Pure business logic and entities

pub mod action;
pub mod error;
pub mod memory;
pub mod operation;
pub mod report;

// Re-exports
pub use action::{AnalysisAction, EvolutionAction, ValidationAction};
pub use error::DomainError;
pub use memory::{MemoryEntry, MemoryKind, NewMemoryEntry};
pub use operation::{CommandSpec, OperationRequest, Parameters, PipelineKind};
pub use report::{
    AnalysisReport, EvolutionReport, RunStatus, ValidationReport, ValidationStatus,
    UNKNOWN_TEST_TYPE,
};
