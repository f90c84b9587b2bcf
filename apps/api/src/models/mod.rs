pub mod feedback;
pub mod project;
pub mod section;
