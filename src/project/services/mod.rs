//! Application services for project management.

mod manager;

pub use manager::{
    CreateProjectRequest, ProjectManager, ProjectManagerError, ProjectManagerResult,
    UpdateProjectRequest,
};
