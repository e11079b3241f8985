use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CATALOG: &str = r#"
[[terms]]
taxonomy = "category"
name = "Guides"

[[terms]]
taxonomy = "keyword"
name = "setup"

[[articles]]
id = 3
title = "Installing"
permalink = "https://kb.example/installing"
categories = ["Guides"]
keywords = ["setup"]

[[articles]]
id = 5
title = "Upgrading"
permalink = "https://kb.example/upgrading"
categories = ["Guides"]

[[articles]]
id = 7
title = "Retired"
permalink = "https://kb.example/retired"
status = "archived"
categories = ["Guides"]
"#;

fn workspace() -> TempDir {
    let dir = TempDir::new().expect("tmp dir");
    fs::write(dir.path().join("catalog.toml"), CATALOG).expect("write catalog");
    dir
}

fn wpkb(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("wpkb"));
    cmd.current_dir(dir)
        .env_remove("WPKB_CONFIG_FILE")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn render_prints_category_list() {
    let dir = workspace();
    let assert = wpkb(dir.path())
        .args(["render", "--category", "Guides", "--exclude", "5"])
        .assert()
        .success();

    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert_eq!(
        output,
        "<div class=\"wpkb-list wpkb-list-category-guides\"><h3 class=\"wpkb-list-title\">Guides</h3><div class=\"wpkb-list-content\"><ul><li class=\"wpkb-article-3 wpkb-even wpkb-last\"><a href=\"https://kb.example/installing\">Installing</a></li></ul></div></div>\n"
    );
}

#[test]
fn render_uses_configured_empty_message() {
    let dir = workspace();
    fs::write(
        dir.path().join("wpkb.toml"),
        "[list]\nempty_message = \"Nothing here yet.\"\n",
    )
    .expect("write config");

    wpkb(dir.path())
        .args(["render", "--keyword", "missing"])
        .assert()
        .success()
        .stdout(contains("<p>Nothing here yet.</p>"))
        .stdout(contains("wpkb-list-keyword-missing"));
}

#[test]
fn environment_overrides_config_file() {
    let dir = workspace();
    wpkb(dir.path())
        .env("WPKB__LIST__EMPTY_MESSAGE", "From env.")
        .args(["render", "--category", "Nope"])
        .assert()
        .success()
        .stdout(contains("<p>From env.</p>"));
}

#[test]
fn expand_replaces_shortcodes_in_document() {
    let dir = workspace();
    fs::write(
        dir.path().join("page.html"),
        "<h1>Docs</h1>\n[wpkb_list keyword=\"setup\" title=\"Setup\" /]\n[[wpkb_list]]\n",
    )
    .expect("write page");

    let assert = wpkb(dir.path())
        .args(["expand", "page.html"])
        .assert()
        .success();

    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(output.starts_with("<h1>Docs</h1>\n<div class=\"wpkb-list wpkb-list-keyword-setup\">"));
    assert!(output.contains("<h3 class=\"wpkb-list-title\">Setup</h3>"));
    assert!(output.contains("wpkb-article-3 wpkb-even wpkb-last"));
    assert!(output.ends_with("</div></div>\n[wpkb_list]\n"));
}

#[test]
fn expand_reads_standard_input() {
    let dir = workspace();
    wpkb(dir.path())
        .args(["expand", "-"])
        .write_stdin("before [wpkb_list category=Guides] after")
        .assert()
        .success()
        .stdout(contains("before <div class=\"wpkb-list wpkb-list-category-guides\">"))
        .stdout(contains("</div></div> after"));
}

#[test]
fn missing_catalog_fails_fast() {
    let dir = TempDir::new().expect("tmp dir");
    wpkb(dir.path())
        .args(["render", "--catalog", "absent.toml"])
        .assert()
        .failure()
        .stderr(contains("failed to read catalog"));
}

#[test]
fn invalid_log_level_is_rejected() {
    let dir = workspace();
    wpkb(dir.path())
        .args(["render", "--log-level", "chatty"])
        .assert()
        .failure()
        .stderr(contains("logging.level"));
}
