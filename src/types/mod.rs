// src/types/mod.rs
pub mod job;
pub mod requirements;
pub mod response;
pub mod user;

pub use job::JobPosting;
pub use requirements::{Requirement, RequirementStatus, ValidationResult};
pub use response::DiscTestsResponse;
pub use user::{Subscription, User, UserId, UserType};
