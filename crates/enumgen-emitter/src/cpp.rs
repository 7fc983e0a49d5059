//! C++ `to_string` emission.
//!
//! Each enum produces one declaration line for the header:
//!
//! ```cpp
//! extern JAWS_API std::string to_string(VkResult);
//! ```
//!
//! and one lookup for the implementation file:
//!
//! ```cpp
//! std::string to_string(VkResult v)
//! {
//!     switch (v) {
//!     default: return "unknown_value_for_VkResult(" + std::to_string(static_cast<long long>(v)) + ")";
//!     case 0: return "VK_SUCCESS"; // Command completed successfully
//! #if defined(VK_KHR_surface)
//!     case -1000000000: return "VK_ERROR_SURFACE_LOST_KHR";
//! #endif // VK_KHR_surface
//!     }
//! }
//! ```
//!
//! Extension blocks are keyed on the extension's name macro, which the Vulkan
//! headers define for every extension they know about.

use enumgen_registry::{BaseEnum, EnumTable};

use crate::sink::{EnumSink, emit_enum};
use crate::writer::SourceWriter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Visibility macro placed after `extern` in declarations; empty for none.
    pub export_macro: String,
    pub indent: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            export_macro: "JAWS_API".to_string(),
            indent: "    ".to_string(),
        }
    }
}

/// Declaration and definition text for one enum.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmittedEnum {
    pub declaration: String,
    pub definition: String,
}

/// Concatenated output for a whole table, one fragment per target file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fragments {
    pub declarations: String,
    pub definitions: String,
}

#[derive(Debug, Clone, Default)]
pub struct CppEmitter {
    options: EmitOptions,
}

impl CppEmitter {
    pub fn new(options: EmitOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EmitOptions {
        &self.options
    }

    pub fn emit_enum(&self, base: &BaseEnum) -> EmittedEnum {
        let mut sink = CppSink::new(&self.options);
        emit_enum(base, &mut sink);
        sink.finish()
    }

    pub fn emit_table(&self, table: &EnumTable) -> Fragments {
        let mut fragments = Fragments::default();
        for base in table.iter() {
            let emitted = self.emit_enum(base);
            fragments.declarations.push_str(&emitted.declaration);
            fragments.definitions.push_str(&emitted.definition);
        }
        fragments
    }
}

/// Sink for a single enum; build a fresh one per enum.
pub struct CppSink<'a> {
    options: &'a EmitOptions,
    declaration: SourceWriter,
    definition: SourceWriter,
}

impl<'a> CppSink<'a> {
    pub fn new(options: &'a EmitOptions) -> Self {
        Self {
            options,
            declaration: SourceWriter::new(options.indent.clone()),
            definition: SourceWriter::new(options.indent.clone()),
        }
    }

    pub fn finish(self) -> EmittedEnum {
        EmittedEnum {
            declaration: self.declaration.finish(),
            definition: self.definition.finish(),
        }
    }

    fn write_comment(&mut self, comment: &str) {
        let folded: String = comment
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if folded.is_empty() {
            return;
        }
        self.definition.write(" // ");
        self.definition.write(&folded);
    }
}

impl EnumSink for CppSink<'_> {
    fn begin_enum(&mut self, enum_name: &str) {
        let decl = &mut self.declaration;
        decl.write("extern ");
        if !self.options.export_macro.is_empty() {
            decl.write(&self.options.export_macro);
            decl.write(" ");
        }
        decl.write("std::string to_string(");
        decl.write(enum_name);
        decl.write(");");
        decl.write_line();

        let def = &mut self.definition;
        def.write("std::string to_string(");
        def.write(enum_name);
        def.write(" v)");
        def.write_line();
        def.write("{");
        def.write_line();
        def.increase_indent();
        def.write_indent();
        def.write("switch (v) {");
        def.write_line();
        def.write_indent();
        def.write("default: return \"unknown_value_for_");
        def.write_escaped(enum_name);
        def.write("(\" + std::to_string(static_cast<long long>(v)) + \")\";");
        def.write_line();
    }

    fn enum_value_case(&mut self, value_name: &str, value: i64, comment: Option<&str>) {
        self.definition.write_indent();
        self.definition.write("case ");
        self.definition.write_i64(value);
        self.definition.write(": return \"");
        self.definition.write_escaped(value_name);
        self.definition.write("\";");
        if let Some(comment) = comment {
            self.write_comment(comment);
        }
        self.definition.write_line();
    }

    fn begin_extension_specific_block(&mut self, _enum_name: &str, extension_name: &str) {
        self.definition.write("#if defined(");
        self.definition.write(extension_name);
        self.definition.write(")");
        self.definition.write_line();
    }

    fn end_extension_specific_block(&mut self, _enum_name: &str, extension_name: &str) {
        self.definition.write("#endif // ");
        self.definition.write(extension_name);
        self.definition.write_line();
    }

    fn end_enum(&mut self, _enum_name: &str) {
        let def = &mut self.definition;
        def.write_indent();
        def.write("}");
        def.write_line();
        def.decrease_indent();
        def.write("}");
        def.write_line();
        def.write_line();
    }
}
