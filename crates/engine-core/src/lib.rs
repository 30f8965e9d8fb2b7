pub mod assembler;
pub mod cache;
pub mod error;
pub mod metrics;
pub mod provisioner;
pub mod retry;
pub mod service;
pub mod settings;
