pub mod generator;
pub mod handlers;
pub mod improve;
pub mod prompts;
pub mod sanitize;
pub mod template;
