pub mod color;
mod client;
mod dev_backend;
pub mod domain;
mod dto;
mod endpoints;

pub use client::*;
pub use dev_backend::DevBackend;
pub use dto::CreateTagRequest;
pub use endpoints::*;
