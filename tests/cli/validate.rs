use anyhow::Result;

use crate::{CLEAN_BLOCK, CliTest, run};

#[test]
fn test_clean_scan_exits_zero() -> Result<()> {
    let test = CliTest::with_file("src/init.c", CLEAN_BLOCK)?;

    let (code, stdout, _) = run(&mut test.validate_command());
    assert_eq!(code, 0);
    assert!(stdout.contains("no issues found"), "stdout: {stdout}");

    Ok(())
}

#[test]
fn test_missing_required_tag_exits_one() -> Result<()> {
    let test = CliTest::with_file(
        "src/a.c",
        "\
// AI_PHASE: PARSING
// AI_COMPLEXITY: LOW
// AI_NOTE: n
// AI_DEPENDENCIES:
// AI_COMMIT: a1b2c3d
int parse(void);
",
    )?;

    let (code, stdout, _) = run(&mut test.validate_command());
    assert_eq!(code, 1);
    assert!(stdout.contains("Missing required tag: AI_STATUS"));
    assert!(stdout.contains("error:"));

    Ok(())
}

#[test]
fn test_warnings_only_exit_zero() -> Result<()> {
    // Required tags present, recommended tags absent: warnings, exit 0.
    let test = CliTest::with_file(
        "src/a.c",
        "// AI_PHASE: A\n// AI_STATUS: IMPLEMENTED\nint a(void);\n",
    )?;

    let (code, stdout, _) = run(&mut test.validate_command());
    assert_eq!(code, 0);
    assert!(stdout.contains("warning:"));
    assert!(stdout.contains("Missing recommended tag:"));

    Ok(())
}

#[test]
fn test_invalid_status_value() -> Result<()> {
    let test = CliTest::with_file(
        "src/a.c",
        "// AI_PHASE: A\n// AI_STATUS: DONE\nint a(void);\n",
    )?;

    let (code, stdout, _) = run(&mut test.validate_command());
    assert_eq!(code, 1);
    assert!(stdout.contains("Invalid AI_STATUS value: DONE"));

    Ok(())
}

#[test]
fn test_commit_in_history_is_error() -> Result<()> {
    let test = CliTest::with_file(
        "src/a.c",
        "\
// AI_PHASE: A
// AI_STATUS: IMPLEMENTED
// AI_COMPLEXITY: LOW
// AI_NOTE: n
// AI_DEPENDENCIES:
// AI_COMMIT: a1b2c3d
// AI_COMMIT_HISTORY: deadbeef, a1b2c3d
int a(void);
",
    )?;

    let (code, stdout, _) = run(&mut test.validate_command());
    assert_eq!(code, 1);
    assert!(stdout.contains("Current commit duplicated in history"));

    Ok(())
}

#[test]
fn test_placeholder_commit_warns_but_passes() -> Result<()> {
    let test = CliTest::with_file(
        "src/a.c",
        "\
// AI_PHASE: A
// AI_STATUS: IMPLEMENTED
// AI_COMPLEXITY: LOW
// AI_NOTE: n
// AI_DEPENDENCIES:
// AI_COMMIT: initial
int a(void);
",
    )?;

    let (code, stdout, _) = run(&mut test.validate_command());
    assert_eq!(code, 0);
    assert!(stdout.contains("does not look like a commit hash"));

    Ok(())
}

#[test]
fn test_dangling_dependency_single_warning() -> Result<()> {
    let test = CliTest::new()?;
    for (name, phase) in [("a.c", "A"), ("b.c", "B")] {
        test.write_file(
            &format!("src/{name}"),
            &format!(
                "// AI_PHASE: {phase}\n// AI_STATUS: IMPLEMENTED\n// AI_COMPLEXITY: LOW\n// AI_NOTE: n\n// AI_DEPENDENCIES: MISSING\n// AI_COMMIT: a1b2c3d\nint f(void);\n"
            ),
        )?;
    }

    let (code, stdout, _) = run(&mut test.validate_command());
    assert_eq!(code, 0);
    assert_eq!(
        stdout.matches("never declared as a phase").count(),
        1,
        "one warning regardless of reference count: {stdout}"
    );

    Ok(())
}

#[test]
fn test_dependency_cycle_exits_one() -> Result<()> {
    let test = CliTest::with_file(
        "src/a.c",
        "\
// AI_PHASE: A
// AI_STATUS: IMPLEMENTED
// AI_COMPLEXITY: LOW
// AI_NOTE: n
// AI_DEPENDENCIES: B
// AI_COMMIT: a1b2c3d
int a(void);

// AI_PHASE: B
// AI_STATUS: IMPLEMENTED
// AI_COMPLEXITY: LOW
// AI_NOTE: n
// AI_DEPENDENCIES: A
// AI_COMMIT: a1b2c3d
int b(void);
",
    )?;

    let (code, stdout, _) = run(&mut test.validate_command());
    assert_eq!(code, 1);
    assert_eq!(stdout.matches("Dependency cycle detected").count(), 1);
    assert!(stdout.contains("A -> B -> A"));

    Ok(())
}

#[test]
fn test_block_without_declaration() -> Result<()> {
    let test = CliTest::with_file(
        "src/a.c",
        "int before(void);\n// AI_PHASE: TRAILING\n// AI_STATUS: IMPLEMENTED\n",
    )?;

    let (code, stdout, _) = run(&mut test.validate_command());
    assert_eq!(code, 1);
    assert!(stdout.contains("Metadata block with no attached declaration"));

    Ok(())
}

#[test]
fn test_nonexistent_path_exits_two() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("validate").arg("definitely/not/here");
    let (code, _, stderr) = run(&mut cmd);
    assert_eq!(code, 2);
    assert!(stderr.contains("Path does not exist"));

    Ok(())
}

#[test]
fn test_unknown_flag_exits_two() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("validate").arg(".").arg("--no-such-flag");
    let (code, _, _) = run(&mut cmd);
    assert_eq!(code, 2);

    Ok(())
}

#[test]
fn test_version_exits_zero_without_scanning() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("--version");
    let (code, stdout, _) = run(&mut cmd);
    assert_eq!(code, 0);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));

    Ok(())
}

#[test]
fn test_export_writes_json_envelope() -> Result<()> {
    let test = CliTest::with_file("src/init.c", CLEAN_BLOCK)?;

    let mut cmd = test.command();
    cmd.arg("validate")
        .arg(".")
        .arg("--export")
        .arg("report.json")
        .arg("--repository")
        .arg("org/repo");
    let (code, stdout, _) = run(&mut cmd);
    assert_eq!(code, 0);
    assert!(stdout.contains("Exported JSON to: report.json"));

    let content = test.read_file("report.json")?;
    let value: serde_json::Value = serde_json::from_str(&content)?;

    assert_eq!(value["metadata"]["acd_schema_version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(value["metadata"]["files_processed"], 1);
    assert_eq!(value["metadata"]["acd_metadata_found"], 1);
    assert_eq!(value["metadata"]["errors"], 0);
    assert_eq!(value["metadata"]["warnings"], 0);
    assert_eq!(value["acd_metadata"][0]["AI_PHASE"], "INIT");
    assert_eq!(value["acd_metadata"][0]["repository"], "org/repo");
    // Empty AI_DEPENDENCIES is an array, not a string
    assert!(value["acd_metadata"][0]["AI_DEPENDENCIES"].is_array());

    Ok(())
}

#[test]
fn test_export_idempotent_except_timestamps() -> Result<()> {
    let test = CliTest::with_file("src/init.c", CLEAN_BLOCK)?;
    test.write_file("src/other.c", "// AI_PHASE: A\n// AI_STATUS: PARTIAL\nint o(void);\n")?;

    let mut first_cmd = test.command();
    first_cmd.arg("validate").arg(".").arg("--export").arg("first.json");
    run(&mut first_cmd);

    let mut second_cmd = test.command();
    second_cmd.arg("validate").arg(".").arg("--export").arg("second.json");
    run(&mut second_cmd);

    let mut first: serde_json::Value = serde_json::from_str(&test.read_file("first.json")?)?;
    let mut second: serde_json::Value = serde_json::from_str(&test.read_file("second.json")?)?;
    scrub_timestamps(&mut first);
    scrub_timestamps(&mut second);

    assert_eq!(first, second);
    Ok(())
}

fn scrub_timestamps(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            map.remove("timestamp_utc");
            for nested in map.values_mut() {
                scrub_timestamps(nested);
            }
        }
        serde_json::Value::Array(items) => {
            for item in items {
                scrub_timestamps(item);
            }
        }
        _ => {}
    }
}

#[test]
fn test_same_phase_across_two_files() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "file1.c",
        "// AI_PHASE: INIT\n// AI_STATUS: IMPLEMENTED\n// AI_COMPLEXITY: LOW\n// AI_NOTE: n\n// AI_DEPENDENCIES:\n// AI_COMMIT: a1b2c3d\nint a(void);\n",
    )?;
    test.write_file(
        "file2.c",
        "// AI_PHASE: INIT\n// AI_STATUS: PARTIAL\n// AI_COMPLEXITY: LOW\n// AI_NOTE: n\n// AI_DEPENDENCIES:\n// AI_COMMIT: a1b2c3d\nint b(void);\n",
    )?;

    let mut cmd = test.command();
    cmd.arg("validate").arg(".").arg("--export").arg("out.json");
    let (code, _, _) = run(&mut cmd);
    assert_eq!(code, 0);

    let value: serde_json::Value = serde_json::from_str(&test.read_file("out.json")?)?;
    assert_eq!(value["metadata"]["files_processed"], 2);
    assert_eq!(value["metadata"]["acd_metadata_found"], 2);
    assert_eq!(value["metadata"]["errors"], 0);
    assert_eq!(value["metadata"]["phase_distribution"]["INIT"], 2);
    assert_eq!(value["metadata"]["status_distribution"]["IMPLEMENTED"], 1);
    assert_eq!(value["metadata"]["status_distribution"]["PARTIAL"], 1);

    Ok(())
}

#[test]
fn test_config_ignores() -> Result<()> {
    let test = CliTest::new()?;

    test.write_file(".acdrc.json", r#"{ "ignores": ["**/generated/**"] }"#)?;
    test.write_file("src/a.c", "// AI_PHASE: A\n// AI_STATUS: BROKEN\nint a(void);\n")?;
    test.write_file(
        "generated/b.c",
        "// AI_PHASE: B\n// AI_STATUS: ALSO_BROKEN\nint b(void);\n",
    )?;

    let (_, stdout, _) = run(&mut test.validate_command());
    assert!(stdout.contains("Invalid AI_STATUS value: BROKEN"));
    assert!(!stdout.contains("ALSO_BROKEN"));

    Ok(())
}

#[test]
fn test_config_declared_phases_suppress_dangling() -> Result<()> {
    let test = CliTest::new()?;

    test.write_file(".acdrc.json", r#"{ "declaredPhases": ["PLANNED"] }"#)?;
    test.write_file(
        "src/a.c",
        "// AI_PHASE: A\n// AI_STATUS: IMPLEMENTED\n// AI_COMPLEXITY: LOW\n// AI_NOTE: n\n// AI_DEPENDENCIES: PLANNED\n// AI_COMMIT: a1b2c3d\nint a(void);\n",
    )?;

    let (code, stdout, _) = run(&mut test.validate_command());
    assert_eq!(code, 0);
    assert!(!stdout.contains("never declared as a phase"));

    Ok(())
}

#[test]
fn test_python_hash_comments() -> Result<()> {
    let test = CliTest::with_file(
        "tools/gen.py",
        "\
# AI_PHASE: CODEGEN
# AI_STATUS: IMPLEMENTED
# AI_COMPLEXITY: LOW
# AI_NOTE: n
# AI_DEPENDENCIES:
# AI_COMMIT: a1b2c3d
def generate():
    pass
",
    )?;

    let (code, stdout, _) = run(&mut test.validate_command());
    assert_eq!(code, 0, "stdout: {stdout}");
    assert!(stdout.contains("no issues found"));

    Ok(())
}
