//! Code emission for enumgen.
//!
//! - `sink` - the emission protocol (`EnumSink`) and the drivers that walk an `EnumTable`
//! - `cpp` - the C++ `to_string` sink
//! - `patcher` - replacement of the generated region between `#BEGIN#`/`#END#` markers
//! - `writer` - indentation-aware string builder

pub mod writer;
pub use writer::SourceWriter;

pub mod sink;
pub use sink::{EnumSink, emit_enum, emit_table};

pub mod cpp;
pub use cpp::{CppEmitter, CppSink, EmitOptions, EmittedEnum, Fragments};

pub mod patcher;
pub use patcher::{MarkerError, MarkerPatcher, MarkerRegions};

#[cfg(test)]
#[path = "../tests/sink_tests.rs"]
mod sink_tests;
#[cfg(test)]
#[path = "../tests/cpp_tests.rs"]
mod cpp_tests;
#[cfg(test)]
#[path = "../tests/patcher_tests.rs"]
mod patcher_tests;
