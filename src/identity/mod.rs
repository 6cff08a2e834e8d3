// src/identity/mod.rs
mod build;
mod process;

pub use build::{BuildInfo, ServiceIdentity, Versioner};
pub use process::{ProcessInfo, SystemProcessInfo};
