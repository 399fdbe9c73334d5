use hostsnap::core::resolver::{ConfigResolver, ResolveMode, SearchPlan, SubstringMatch};
use hostsnap::core::types::{ConfigResolution, ManagerId, SystemInventory};
use hostsnap::report::{self, Artifact};
use hostsnap::utils::cancel::CancelToken;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

struct Host {
    _root: TempDir,
    home: PathBuf,
    system: PathBuf,
}

impl Host {
    fn new() -> Self {
        let root = tempfile::tempdir().expect("tempdir");
        let home = root.path().join("home");
        let system = root.path().join("etc");
        fs::create_dir_all(home.join(".config")).unwrap();
        fs::create_dir_all(&system).unwrap();
        Self {
            _root: root,
            home,
            system,
        }
    }

    fn plan(&self) -> SearchPlan {
        SearchPlan {
            home: self.home.clone(),
            locations: vec![self.home.join(".config"), self.system.clone()],
            walk_roots: vec![self.system.clone()],
            fallback_roots: vec![self.system.clone()],
            max_depth: 3,
            substring_match: SubstringMatch::Token,
            mode: ResolveMode::First,
        }
    }

    fn mkdir(&self, relative: &str) -> PathBuf {
        let path = self.home.join(relative);
        fs::create_dir_all(&path).unwrap();
        path
    }
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn resolve(plan: &SearchPlan, packages: &[String]) -> BTreeMap<String, ConfigResolution> {
    ConfigResolver::new(plan, CancelToken::new())
        .resolve(packages, |_| {})
        .expect("resolution succeeds")
}

#[test]
fn firefox_vim_and_unknown_scenario() {
    let host = Host::new();
    let firefox = host.mkdir(".config/firefox");
    let vim = host.mkdir(".vim");

    let configs = resolve(
        &host.plan(),
        &names(&["firefox", "vim-git", "unknown-pkg-xyz"]),
    );

    assert_eq!(configs["firefox"], ConfigResolution::Found(vec![firefox]));
    assert_eq!(configs["vim-git"], ConfigResolution::Found(vec![vim]));
    assert_eq!(configs["unknown-pkg-xyz"], ConfigResolution::NotFound);
}

#[test]
fn every_package_gets_exactly_one_entry() {
    let host = Host::new();
    host.mkdir(".config/git");
    let packages = names(&["git", "Git-Bin", "zsh", "git", "", "../etc"]);

    let configs = resolve(&host.plan(), &packages);

    let mut distinct = packages.clone();
    distinct.sort();
    distinct.dedup();
    assert_eq!(configs.keys().cloned().collect::<Vec<_>>(), distinct);
}

#[test]
fn exact_location_match_beats_substring_search() {
    let host = Host::new();
    let exact = host.mkdir(".config/git");
    fs::create_dir_all(host.system.join("deep/git-hooks")).unwrap();

    let configs = resolve(&host.plan(), &names(&["git"]));

    assert_eq!(configs["git"], ConfigResolution::Found(vec![exact]));
}

#[test]
fn substring_search_respects_token_boundaries() {
    let host = Host::new();
    fs::create_dir_all(host.system.join("apps/digit-recognizer")).unwrap();

    let configs = resolve(&host.plan(), &names(&["git"]));
    assert_eq!(configs["git"], ConfigResolution::NotFound);

    let mut contains = host.plan();
    contains.substring_match = SubstringMatch::Contains;
    let configs = resolve(&contains, &names(&["git"]));
    assert_eq!(
        configs["git"],
        ConfigResolution::Found(vec![host.system.join("apps/digit-recognizer")])
    );
}

#[test]
fn inventory_survives_json_round_trip() {
    let host = Host::new();
    let firefox = host.mkdir(".config/firefox");
    let configs = resolve(&host.plan(), &names(&["firefox", "nothing-here"]));

    let inventory = SystemInventory {
        os: "debian".to_string(),
        hostname: Some("laptop".to_string()),
        pkg_manager: ManagerId::Apt,
        packages: names(&["firefox", "nothing-here"]),
        configs,
        snaps: BTreeMap::new(),
        flatpaks: BTreeMap::new(),
        generated_at: chrono::Utc::now(),
    };

    let out = tempfile::tempdir().unwrap();
    let path = report::write_artifact(out.path(), Artifact::System, &inventory).unwrap();
    let restored = report::read_inventory(&path).unwrap();

    assert_eq!(restored, inventory);
    assert_eq!(
        restored.configs["firefox"],
        ConfigResolution::Found(vec![firefox])
    );
    assert_eq!(restored.configs["nothing-here"], ConfigResolution::NotFound);
}

#[test]
fn backup_skips_unresolved_packages() {
    let host = Host::new();
    let nvim = host.mkdir(".config/nvim");
    fs::write(nvim.join("init.lua"), "-- hi").unwrap();

    let configs = resolve(&host.plan(), &names(&["neovim-nightly", "nvim", "ghost"]));
    let out = tempfile::tempdir().unwrap();

    let backup = report::backup_configs(&configs, out.path(), &CancelToken::new()).unwrap();

    assert!(backup.is_clean());
    assert_eq!(backup.copied.len(), 1);
    assert!(out.path().join("nvim/nvim/init.lua").is_file());
    assert!(!out.path().join("ghost").exists());
    assert!(!out.path().join("neovim").exists());
}
