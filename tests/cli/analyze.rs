use anyhow::Result;

use crate::{CliTest, run};

#[test]
fn test_analysis_sections() -> Result<()> {
    let test = CliTest::with_file(
        "src/hot.c",
        "\
/*
 * AI_PHASE: HOT_PATH
 * AI_STATUS: PARTIAL
 * AI_COMPLEXITY: CRITICAL
 * AI_NOTE: Lock-free queue port
 * AI_DEPENDENCIES: SCHEDULER
 * AI_COMMIT: a1b2c3d
 */
void hot(void);

/*
 * AI_PHASE: LEGACY
 * AI_STATUS: DEPRECATED
 * AI_COMPLEXITY: LOW
 * AI_NOTE: Old interface
 * AI_DEPENDENCIES:
 * AI_COMMIT: deadbeef
 */
void old_api(void);
",
    )?;

    let mut cmd = test.command();
    cmd.arg("analyze").arg(".");
    let (_, stdout, _) = run(&mut cmd);

    assert!(stdout.contains("Implementation Status Analysis"));
    assert!(stdout.contains("Status Distribution"));
    assert!(stdout.contains("PARTIAL: 1"));
    assert!(stdout.contains("Complexity Distribution"));
    assert!(stdout.contains("High-Risk Incomplete Implementations:"));
    assert!(stdout.contains("HOT_PATH"));
    assert!(stdout.contains("Deprecated Phases:"));
    assert!(stdout.contains("LEGACY"));
    assert!(stdout.contains("Missing Dependencies:"));
    assert!(stdout.contains("HOT_PATH requires: SCHEDULER"));

    Ok(())
}

#[test]
fn test_analyze_clean_tree() -> Result<()> {
    let test = CliTest::with_file("src/a.c", crate::CLEAN_BLOCK)?;

    let mut cmd = test.command();
    cmd.arg("analyze").arg(".");
    let (code, stdout, _) = run(&mut cmd);

    assert_eq!(code, 0);
    assert!(stdout.contains("IMPLEMENTED: 1"));
    assert!(!stdout.contains("High-Risk"));

    Ok(())
}
