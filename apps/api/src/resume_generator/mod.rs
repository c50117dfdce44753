//! Resume generator feature: validates a candidate profile, renders it into a
//! prompt and asks the Markdown-strategy agent for a finished resume.

pub mod handlers;
pub mod models;
pub mod prompts;
