//! End-to-end runs of the `enumgen` binary against a local registry.

use std::path::Path;
use std::process::{Command, Output};

const REGISTRY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<registry>
    <enums name="VkResult" type="enum">
        <enum value="0" name="VK_SUCCESS" comment="Command completed successfully"/>
        <enum value="-1" name="VK_ERROR_OUT_OF_HOST_MEMORY"/>
    </enums>
    <enums name="VkCullModeFlagBits" type="bitmask">
        <enum bitpos="0" name="VK_CULL_MODE_FRONT_BIT"/>
    </enums>
    <extensions>
        <extension name="VK_KHR_surface" number="1" supported="vulkan">
            <require>
                <enum offset="0" extends="VkResult" dir="-" name="VK_ERROR_SURFACE_LOST_KHR"/>
            </require>
        </extension>
        <extension name="VK_KHR_swapchain" number="2" supported="vulkan">
            <require>
                <enum offset="4" extends="VkResult" dir="-" name="VK_ERROR_OUT_OF_DATE_KHR"/>
                <enum offset="3" extends="VkResult" name="VK_SUBOPTIMAL_KHR"/>
            </require>
        </extension>
        <extension name="VK_KHR_portability_subset" number="164" provisional="true">
            <require>
                <enum offset="0" extends="VkResult" name="VK_PORTABILITY_VALUE_KHR"/>
            </require>
        </extension>
    </extensions>
</registry>
"#;

const HEADER: &str = "\
#pragma once
#include <string>
#include <vulkan/vulkan.h>

namespace jaws::vulkan {
// #BEGIN#
// #END#
}
";

const SOURCE: &str = "\
#include \"to_string.hpp\"

namespace jaws::vulkan {
// #BEGIN#
// #END#
}
";

const EXPECTED_DEFINITION: &str = "\
std::string to_string(VkResult v)
{
    switch (v) {
    default: return \"unknown_value_for_VkResult(\" + std::to_string(static_cast<long long>(v)) + \")\";
    case 0: return \"VK_SUCCESS\"; // Command completed successfully
    case -1: return \"VK_ERROR_OUT_OF_HOST_MEMORY\";
#if defined(VK_KHR_surface)
    case -1000000000: return \"VK_ERROR_SURFACE_LOST_KHR\";
#endif // VK_KHR_surface
#if defined(VK_KHR_swapchain)
    case -1000001004: return \"VK_ERROR_OUT_OF_DATE_KHR\";
    case 1000001003: return \"VK_SUBOPTIMAL_KHR\";
#endif // VK_KHR_swapchain
    }
}
";

fn setup(dir: &Path) {
    std::fs::write(dir.join("vk.xml"), REGISTRY).expect("failed to write registry");
    std::fs::write(dir.join("to_string.hpp"), HEADER).expect("failed to write header");
    std::fs::write(dir.join("to_string.cpp"), SOURCE).expect("failed to write source");
    std::fs::write(
        dir.join("enumgen.json"),
        r#"{
            "spec": "vk.xml",
            "declarationFile": "to_string.hpp",
            "definitionFile": "to_string.cpp"
        }"#,
    )
    .expect("failed to write config");
}

fn enumgen(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_enumgen"))
        .args(args)
        .current_dir(dir)
        .env_remove("ENUMGEN_LOG")
        .env_remove("RUST_LOG")
        .env_remove("ENUMGEN_LOG_FORMAT")
        .output()
        .expect("failed to run enumgen")
}

fn read(dir: &Path, name: &str) -> String {
    std::fs::read_to_string(dir.join(name)).expect("failed to read target")
}

#[test]
fn regenerates_both_targets_from_local_registry() {
    let dir = tempfile::tempdir().expect("tempdir");
    setup(dir.path());

    let output = enumgen(dir.path(), &["--no-color"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(0), "{stdout}");
    assert!(stdout.contains("Processed"), "{stdout}");
    assert!(stdout.contains("to_string.hpp."), "{stdout}");
    assert!(stdout.contains("Ignored 1 provisional extension(s)"), "{stdout}");

    assert_eq!(
        read(dir.path(), "to_string.hpp"),
        "\
#pragma once
#include <string>
#include <vulkan/vulkan.h>

namespace jaws::vulkan {
// #BEGIN#
extern JAWS_API std::string to_string(VkResult);
// #END#
}
"
    );

    let source = read(dir.path(), "to_string.cpp");
    assert!(source.contains(EXPECTED_DEFINITION), "{source}");
    assert!(!source.contains("VkCullModeFlagBits"));
    assert!(!source.contains("VK_PORTABILITY_VALUE_KHR"));
}

#[test]
fn check_exits_one_when_stale_and_zero_after_regeneration() {
    let dir = tempfile::tempdir().expect("tempdir");
    setup(dir.path());

    let stale = enumgen(dir.path(), &["--check", "--no-color"]);
    assert_eq!(stale.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&stale.stdout).contains("Stale"));
    assert_eq!(read(dir.path(), "to_string.hpp"), HEADER);
    assert_eq!(read(dir.path(), "to_string.cpp"), SOURCE);

    assert_eq!(enumgen(dir.path(), &["--no-color"]).status.code(), Some(0));

    let clean = enumgen(dir.path(), &["--check", "--no-color"]);
    assert_eq!(clean.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&clean.stdout).contains("Up to date"));
}

#[test]
fn verbose_lists_skipped_provisional_extensions() {
    let dir = tempfile::tempdir().expect("tempdir");
    setup(dir.path());

    let output = enumgen(dir.path(), &["-v", "--no-color"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Ignoring provisional extension VK_KHR_portability_subset"),
        "{stdout}"
    );
}

#[test]
fn missing_markers_exit_two_and_write_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    setup(dir.path());
    let broken = "#include \"to_string.hpp\"\n";
    std::fs::write(dir.path().join("to_string.cpp"), broken).expect("failed to write source");

    let output = enumgen(dir.path(), &["--no-color"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.starts_with("error: "), "{stderr}");
    assert!(stderr.contains("to_string.cpp"), "{stderr}");
    assert_eq!(read(dir.path(), "to_string.hpp"), HEADER);
    assert_eq!(read(dir.path(), "to_string.cpp"), broken);
}

#[test]
fn cli_targets_override_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    setup(dir.path());
    std::fs::write(dir.path().join("other.hpp"), HEADER).expect("failed to write header");

    let output = enumgen(dir.path(), &["--no-color", "--declarations", "other.hpp"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(read(dir.path(), "to_string.hpp"), HEADER);
    assert!(read(dir.path(), "other.hpp").contains("to_string(VkResult);"));
}

#[test]
fn missing_registry_exits_two() {
    let dir = tempfile::tempdir().expect("tempdir");
    setup(dir.path());

    let output = enumgen(dir.path(), &["--spec", "nowhere.xml"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.contains("nowhere.xml"), "{stderr}");
}
