use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn hostsnap() -> Command {
    Command::new(env!("CARGO_BIN_EXE_hostsnap"))
}

/// A fake host: home directory, settings file and a PATH holding only mock binaries.
struct TestEnv {
    _tmp: TempDir,
    home_dir: PathBuf,
    xdg_config_home: PathBuf,
    mock_bin_dir: PathBuf,
    out_dir: PathBuf,
}

impl TestEnv {
    fn new() -> Self {
        let tmp = tempfile::tempdir().expect("tempdir");
        let root = tmp.path().to_path_buf();

        let home_dir = root.join("home");
        let xdg_config_home = root.join("config");
        let mock_bin_dir = root.join("bin");
        let out_dir = root.join("out");

        fs::create_dir_all(home_dir.join(".config/firefox")).expect("mkdir firefox");
        fs::write(home_dir.join(".config/firefox/prefs.js"), "user_pref();").expect("prefs");
        fs::create_dir_all(home_dir.join(".vim")).expect("mkdir .vim");
        fs::write(home_dir.join(".vim/vimrc"), "set nu").expect("vimrc");
        fs::create_dir_all(xdg_config_home.join("hostsnap")).expect("mkdir settings dir");
        fs::create_dir_all(&mock_bin_dir).expect("mkdir bin dir");

        // Only search inside the fake home
        let settings = r#"
locations "~/.config"
walk-roots
fallback-roots
"#;
        fs::write(xdg_config_home.join("hostsnap/hostsnap.kdl"), settings)
            .expect("write hostsnap.kdl");

        let env = Self {
            _tmp: tmp,
            home_dir,
            xdg_config_home,
            mock_bin_dir,
            out_dir,
        };

        env.mock_binary("apt", "#!/bin/sh\nexit 0\n");
        env.mock_binary(
            "apt-mark",
            r#"#!/bin/sh
case "$1" in
  showmanual)
    echo "firefox"
    echo "vim-git"
    echo "unknown-pkg-xyz"
    ;;
  *)
    exit 1
    ;;
esac
"#,
        );

        env
    }

    fn mock_binary(&self, name: &str, script: &str) {
        let path = self.mock_bin_dir.join(name);
        fs::write(&path, script).expect("write mock binary");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&path).expect("metadata").permissions();
            perms.set_mode(0o755);
            fs::set_permissions(&path, perms).expect("chmod");
        }
    }

    fn command(&self) -> Command {
        let mut cmd = hostsnap();
        cmd.env("HOME", &self.home_dir)
            .env("XDG_CONFIG_HOME", &self.xdg_config_home)
            .env("PATH", &self.mock_bin_dir)
            .env_remove("HOSTSNAP_CONFIG")
            .arg("--home")
            .arg(&self.home_dir);
        cmd
    }

    fn read_json(&self, name: &str) -> serde_json::Value {
        let content = fs::read_to_string(self.out_dir.join(name)).expect("artifact exists");
        serde_json::from_str(&content).expect("artifact is JSON")
    }
}

fn exists(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

#[test]
fn e2e_backup_copies_resolved_configs() {
    let env = TestEnv::new();

    env.command()
        .arg("backup")
        .arg("--output")
        .arg(&env.out_dir)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(env.out_dir.join("firefox/firefox/prefs.js")).unwrap(),
        "user_pref();"
    );
    assert_eq!(
        fs::read_to_string(env.out_dir.join("vim/.vim/vimrc")).unwrap(),
        "set nu"
    );
    assert!(!exists(&env.out_dir.join("unknown-pkg-xyz")));

    let system = env.read_json("system.json");
    assert_eq!(system["pkgManager"], "apt");
    assert_eq!(
        system["packages"],
        serde_json::json!(["firefox", "vim-git", "unknown-pkg-xyz"])
    );
    assert_eq!(
        system["configs"]["vim-git"][0],
        env.home_dir.join(".vim").display().to_string()
    );
    assert_eq!(system["configs"]["unknown-pkg-xyz"], serde_json::json!(["-"]));
    assert_eq!(system["snaps"], serde_json::json!({}));

    let backup = env.read_json("backup.json");
    assert_eq!(backup["copied"].as_array().map(Vec::len), Some(2));
    assert_eq!(backup["failed"], serde_json::json!([]));

    for artifact in ["packages.json", "configs.json", "snaps.json", "flatpaks.json"] {
        assert!(env.out_dir.join(artifact).is_file(), "{artifact} missing");
    }
}

#[test]
fn e2e_report_json_copies_nothing() {
    let env = TestEnv::new();

    let output = env
        .command()
        .args(["report", "--format", "json", "--output"])
        .arg(&env.out_dir)
        .output()
        .expect("run hostsnap");

    assert!(output.status.success());
    let inventory: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is a single JSON document");
    assert_eq!(inventory["pkgManager"], "apt");
    assert_eq!(
        inventory["configs"]["firefox"][0],
        env.home_dir.join(".config/firefox").display().to_string()
    );
    assert!(!exists(&env.out_dir));
}

#[test]
fn e2e_report_write_emits_artifacts_only() {
    let env = TestEnv::new();

    env.command()
        .args(["report", "--write", "--output"])
        .arg(&env.out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("firefox"));

    assert!(env.out_dir.join("system.json").is_file());
    assert!(!env.out_dir.join("backup.json").exists());
    assert!(!exists(&env.out_dir.join("firefox")));
}

#[test]
fn e2e_failing_listing_exits_with_soft_failure() {
    let env = TestEnv::new();
    env.mock_binary("apt-mark", "#!/bin/sh\necho 'database locked' >&2\nexit 100\n");

    env.command()
        .args(["report", "--format", "json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("enumerate"))
        .stdout(predicate::str::contains("\"packages\": []"));
}

#[test]
fn e2e_manager_override_skips_detection() {
    let env = TestEnv::new();
    env.mock_binary("qlist", "#!/bin/sh\necho 'app-editors/vim'\n");

    let output = env
        .command()
        .args(["report", "--format", "json", "--manager", "portage"])
        .output()
        .expect("run hostsnap");

    assert!(output.status.success());
    let inventory: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(inventory["pkgManager"], "portage");
    assert_eq!(inventory["packages"], serde_json::json!(["vim"]));
}

#[test]
fn e2e_flatpak_apps_are_listed() {
    let env = TestEnv::new();
    env.mock_binary(
        "flatpak",
        "#!/bin/sh\necho 'Application'\necho 'org.gimp.GIMP'\n",
    );

    let output = env
        .command()
        .args(["report", "--format", "json"])
        .output()
        .expect("run hostsnap");

    assert!(output.status.success());
    let inventory: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        inventory["flatpaks"],
        serde_json::json!({ "org.gimp.GIMP": "installed" })
    );
}
