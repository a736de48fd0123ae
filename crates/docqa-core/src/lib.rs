//! docqa-core
//!
//! Domain types, collaborator traits, configuration and the local chunk
//! stores shared by the retrieval, segmentation and assistant crates.

#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod config;
pub mod error;
pub mod ingest;
pub mod loader;
pub mod logging;
pub mod store;
pub mod traits;
pub mod types;
