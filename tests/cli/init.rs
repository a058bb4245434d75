use anyhow::Result;

use crate::{CliTest, run};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("init");
    let (code, stdout, _) = run(&mut cmd);

    assert_eq!(code, 0);
    assert!(stdout.contains("Created .acdrc.json"));

    let config = test.read_file(".acdrc.json")?;
    let value: serde_json::Value = serde_json::from_str(&config)?;
    assert!(value["requiredTags"].is_array());
    assert!(value["statusValues"].is_array());

    Ok(())
}

#[test]
fn test_init_refuses_to_overwrite() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".acdrc.json", "{}")?;

    let mut cmd = test.command();
    cmd.arg("init");
    let (code, _, stderr) = run(&mut cmd);

    assert_eq!(code, 2);
    assert!(stderr.contains("already exists"));

    Ok(())
}
