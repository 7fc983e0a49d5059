use super::*;
use enumgen_registry::{EnumTable, parse_registry};

const REGISTRY: &str = r#"<registry>
    <enums name="VkResult" type="enum">
        <enum value="0" name="VK_SUCCESS" comment="Command completed successfully"/>
        <enum value="-1" name="VK_ERROR_OUT_OF_HOST_MEMORY" comment=""/>
    </enums>
    <enums name="VkFilter" type="enum">
        <enum value="0" name="VK_FILTER_NEAREST"/>
    </enums>
    <extensions>
        <extension name="VK_KHR_surface" number="1">
            <require>
                <enum offset="0" extends="VkResult" dir="-" name="VK_ERROR_SURFACE_LOST_KHR" comment="Surface went away&#10;  mid-frame"/>
            </require>
        </extension>
    </extensions>
</registry>"#;

fn table() -> EnumTable {
    EnumTable::build(&parse_registry(REGISTRY).expect("registry parses"))
}

#[test]
fn emits_declaration_and_definition() {
    let table = table();
    let emitted = CppEmitter::default().emit_enum(table.get("VkResult").expect("VkResult"));

    assert_eq!(
        emitted.declaration,
        "extern JAWS_API std::string to_string(VkResult);\n"
    );
    assert_eq!(
        emitted.definition,
        concat!(
            "std::string to_string(VkResult v)\n",
            "{\n",
            "    switch (v) {\n",
            "    default: return \"unknown_value_for_VkResult(\" + std::to_string(static_cast<long long>(v)) + \")\";\n",
            "    case 0: return \"VK_SUCCESS\"; // Command completed successfully\n",
            "    case -1: return \"VK_ERROR_OUT_OF_HOST_MEMORY\";\n",
            "#if defined(VK_KHR_surface)\n",
            "    case -1000000000: return \"VK_ERROR_SURFACE_LOST_KHR\"; // Surface went away mid-frame\n",
            "#endif // VK_KHR_surface\n",
            "    }\n",
            "}\n",
            "\n",
        )
    );
}

#[test]
fn fallback_is_present_and_distinct_from_cases() {
    let table = table();
    let emitter = CppEmitter::default();

    for base in table.iter() {
        let definition = emitter.emit_enum(base).definition;
        let defaults: Vec<&str> = definition
            .lines()
            .filter(|l| l.trim_start().starts_with("default:"))
            .collect();
        assert_eq!(defaults.len(), 1, "{definition}");
        assert!(defaults[0].contains(&format!("unknown_value_for_{}", base.name)));
        assert!(defaults[0].contains("std::to_string"));
        assert!(
            base.iter()
                .all(|(_, v)| !defaults[0].contains(&format!("\"{}\"", v.name)))
        );
    }
}

#[test]
fn empty_export_macro_is_omitted() {
    let table = table();
    let emitter = CppEmitter::new(EmitOptions {
        export_macro: String::new(),
        indent: "\t".to_string(),
    });
    let emitted = emitter.emit_enum(table.get("VkFilter").expect("VkFilter"));

    assert_eq!(emitted.declaration, "extern std::string to_string(VkFilter);\n");
    assert!(emitted.definition.contains("\n\tcase 0: return \"VK_FILTER_NEAREST\";\n"));
}

#[test]
fn table_fragments_concatenate_in_order() {
    let table = table();
    let fragments = CppEmitter::default().emit_table(&table);

    assert_eq!(
        fragments.declarations,
        concat!(
            "extern JAWS_API std::string to_string(VkResult);\n",
            "extern JAWS_API std::string to_string(VkFilter);\n",
        )
    );
    let result_at = fragments.definitions.find("to_string(VkResult v)");
    let filter_at = fragments.definitions.find("to_string(VkFilter v)");
    assert!(result_at.is_some() && filter_at.is_some());
    assert!(result_at < filter_at);
}

#[test]
fn value_names_are_escaped() {
    let options = EmitOptions::default();
    let mut sink = CppSink::new(&options);
    sink.begin_enum("VkOdd");
    sink.enum_value_case("VK_\"QUOTED\"", 7, None);
    sink.end_enum("VkOdd");

    let emitted = sink.finish();
    assert!(emitted.definition.contains(r#"case 7: return "VK_\"QUOTED\"";"#));
}

#[test]
fn writer_indentation_never_goes_negative() {
    let mut writer = SourceWriter::new("  ");
    writer.decrease_indent();
    writer.write_indent();
    writer.increase_indent();
    writer.increase_indent();
    writer.write_indent();
    writer.write("x");
    assert_eq!(writer.finish(), "    x");
}

#[test]
fn writer_escapes_control_characters_as_octal() {
    let mut writer = SourceWriter::new("");
    writer.write_escaped("a\u{1}b\\");
    assert_eq!(writer.finish(), "a\\001b\\\\");
}
