pub mod client;
pub mod publish;

pub use client::WikiClient;
pub use publish::{publish_pages, PublishReport};
