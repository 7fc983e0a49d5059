use super::*;
use enumgen_registry::{EnumTable, parse_registry};

const REGISTRY: &str = r#"<registry>
    <enums name="VkResult" type="enum">
        <enum value="0" name="VK_SUCCESS" comment="Command completed successfully"/>
        <enum value="-1" name="VK_ERROR_OUT_OF_HOST_MEMORY"/>
    </enums>
    <enums name="VkPresentModeKHR" type="enum"/>
    <extensions>
        <extension name="VK_KHR_surface" number="1">
            <require>
                <enum offset="0" extends="VkResult" dir="-" name="VK_ERROR_SURFACE_LOST_KHR"/>
            </require>
        </extension>
        <extension name="VK_KHR_swapchain" number="2">
            <require>
                <enum offset="4" extends="VkResult" dir="-" name="VK_ERROR_OUT_OF_DATE_KHR"/>
                <enum offset="3" extends="VkResult" name="VK_SUBOPTIMAL_KHR"/>
            </require>
        </extension>
    </extensions>
</registry>"#;

#[derive(Default)]
struct RecordingSink {
    calls: Vec<String>,
}

impl EnumSink for RecordingSink {
    fn begin_enum(&mut self, enum_name: &str) {
        self.calls.push(format!("begin {enum_name}"));
    }

    fn enum_value_case(&mut self, value_name: &str, value: i64, comment: Option<&str>) {
        self.calls
            .push(format!("case {value_name}={value} {}", comment.unwrap_or("-")));
    }

    fn begin_extension_specific_block(&mut self, enum_name: &str, extension_name: &str) {
        self.calls.push(format!("if {enum_name}/{extension_name}"));
    }

    fn end_extension_specific_block(&mut self, enum_name: &str, extension_name: &str) {
        self.calls.push(format!("endif {enum_name}/{extension_name}"));
    }

    fn end_enum(&mut self, enum_name: &str) {
        self.calls.push(format!("end {enum_name}"));
    }
}

fn table() -> EnumTable {
    EnumTable::build(&parse_registry(REGISTRY).expect("registry parses"))
}

#[test]
fn protocol_nesting_order() {
    let table = table();
    let mut sink = RecordingSink::default();
    emit_enum(table.get("VkResult").expect("VkResult"), &mut sink);

    assert_eq!(
        sink.calls,
        vec![
            "begin VkResult",
            "case VK_SUCCESS=0 Command completed successfully",
            "case VK_ERROR_OUT_OF_HOST_MEMORY=-1 -",
            "if VkResult/VK_KHR_surface",
            "case VK_ERROR_SURFACE_LOST_KHR=-1000000000 -",
            "endif VkResult/VK_KHR_surface",
            "if VkResult/VK_KHR_swapchain",
            "case VK_ERROR_OUT_OF_DATE_KHR=-1000001004 -",
            "case VK_SUBOPTIMAL_KHR=1000001003 -",
            "endif VkResult/VK_KHR_swapchain",
            "end VkResult",
        ]
    );
}

#[test]
fn empty_enum_still_opens_and_closes() {
    let table = table();
    let mut sink = RecordingSink::default();
    emit_enum(table.get("VkPresentModeKHR").expect("present mode"), &mut sink);

    assert_eq!(sink.calls, vec!["begin VkPresentModeKHR", "end VkPresentModeKHR"]);
}

#[test]
fn table_emission_visits_enums_in_order() {
    let table = table();
    let mut sink = RecordingSink::default();
    emit_table(&table, &mut sink);

    let begins: Vec<&str> = sink
        .calls
        .iter()
        .filter(|c| c.starts_with("begin "))
        .map(String::as_str)
        .collect();
    assert_eq!(begins, vec!["begin VkResult", "begin VkPresentModeKHR"]);
}

#[test]
fn sink_works_through_trait_object() {
    let table = table();
    let mut recording = RecordingSink::default();
    let sink: &mut dyn EnumSink = &mut recording;
    emit_table(&table, sink);
    assert_eq!(recording.calls.first().map(String::as_str), Some("begin VkResult"));
}
