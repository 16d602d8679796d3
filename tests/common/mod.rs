use assert_cmd::Command;
use std::path::Path;

pub fn sobriety_cmd(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("sobriety").unwrap();
    cmd.env_remove("SOBRIETY_HOME");
    cmd.env_remove("RUST_LOG");
    cmd.arg("--data-dir").arg(data_dir);
    cmd
}
