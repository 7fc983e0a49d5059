//! Emission protocol.
//!
//! For every base enum the driver calls, in this order:
//!
//! ```text
//! begin_enum
//!   enum_value_case*                       (native values)
//!   ( begin_extension_specific_block
//!       enum_value_case*                   (values of that extension)
//!     end_extension_specific_block )*
//! end_enum
//! ```
//!
//! Sinks assume the table came from `EnumTable::build` and do no validation.

use enumgen_registry::{BaseEnum, EnumTable, Enumerant};

pub trait EnumSink {
    /// Open the declaration and the lookup for `enum_name`, including its fallback branch.
    fn begin_enum(&mut self, enum_name: &str);

    /// Map `value` to `value_name`; `comment` is a trailing annotation when present.
    fn enum_value_case(&mut self, value_name: &str, value: i64, comment: Option<&str>);

    /// Everything until the matching `end_extension_specific_block` must only
    /// compile when `extension_name` is available in the consuming build.
    fn begin_extension_specific_block(&mut self, enum_name: &str, extension_name: &str);

    fn end_extension_specific_block(&mut self, enum_name: &str, extension_name: &str);

    fn end_enum(&mut self, enum_name: &str);
}

/// Drive `sink` through one base enum.
pub fn emit_enum<S: EnumSink + ?Sized>(base: &BaseEnum, sink: &mut S) {
    sink.begin_enum(&base.name);
    for group in base.groups() {
        match group.extension {
            None => emit_cases(group.values, sink),
            Some(extension) => {
                sink.begin_extension_specific_block(&base.name, extension);
                emit_cases(group.values, sink);
                sink.end_extension_specific_block(&base.name, extension);
            }
        }
    }
    sink.end_enum(&base.name);
}

/// Drive `sink` through every enum of `table`, in table order.
pub fn emit_table<S: EnumSink + ?Sized>(table: &EnumTable, sink: &mut S) {
    for base in table.iter() {
        emit_enum(base, sink);
    }
}

fn emit_cases<S: EnumSink + ?Sized>(values: &[Enumerant], sink: &mut S) {
    for value in values {
        sink.enum_value_case(&value.name, value.value, value.comment.as_deref());
    }
}
