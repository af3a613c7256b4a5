pub mod config;
pub mod content;
pub mod content_store;
pub mod error;
pub mod feed;
pub mod logger;
pub mod publish;
pub mod server;
pub mod social;
pub mod view;
#[cfg(test)]
mod test_data;
