//! Native CLI support for the enumgen binary.
//!
//! `enumgen` reads the Vulkan registry, builds per-enum value tables and
//! rewrites the generated region of the `to_string` header and source files.

pub mod args;
pub mod config;
pub mod driver;
pub mod fetch;
pub mod reporter;
pub mod tracing_config;

#[cfg(test)]
#[path = "../tests/args_tests.rs"]
mod args_tests;
#[cfg(test)]
#[path = "../tests/config_tests.rs"]
mod config_tests;
#[cfg(test)]
#[path = "../tests/driver_tests.rs"]
mod driver_tests;
#[cfg(test)]
#[path = "../tests/fetch_tests.rs"]
mod fetch_tests;
#[cfg(test)]
#[path = "../tests/reporter_tests.rs"]
mod reporter_tests;
#[cfg(test)]
#[path = "../tests/tracing_config_tests.rs"]
mod tracing_config_tests;
