pub mod analysis;
pub mod filters;
pub mod profiles;

pub use analysis::{analyze_content, authoring_notes, role_stats, ContentAnalysis};
pub use filters::{
    by_role, coordinator_sections, executor_sections, foreign_role_sections, shared_sections,
    unassigned_sections, COORDINATOR_ROLE, EXECUTOR_ROLE,
};
pub use profiles::{RoleProfile, ValidationError};
