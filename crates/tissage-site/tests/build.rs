use camino::{Utf8Path, Utf8PathBuf};
use tissage_site::{ResolvedConfig, SiteError, build, init};

fn project(config: &str) -> (tempfile::TempDir, Utf8PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
    fs_err::create_dir_all(root.join(".config")).unwrap();
    fs_err::write(root.join(".config/tissage.yaml"), config).unwrap();
    fs_err::create_dir_all(root.join("scripts")).unwrap();
    fs_err::write(root.join("scripts/app.js"), "// app").unwrap();
    (dir, root)
}

fn read(path: impl AsRef<Utf8Path>) -> String {
    fs_err::read_to_string(path.as_ref()).unwrap()
}

#[test_log::test]
fn build_default_pages() {
    let (_dir, root) = project("title: Lab Notes\n");
    let config = ResolvedConfig::discover_from(&root).unwrap().unwrap();

    let generated = build(&config).unwrap();

    let out = root.join("output");
    assert_eq!(
        generated,
        [
            format!(
                "Generated {} (entry: home, title: Home - Lab Notes)",
                out.join("index.html")
            ),
            format!(
                "Generated {} (entry: about, title: About - Lab Notes)",
                out.join("about.html")
            ),
        ]
    );
    assert_eq!(read(out.join("scripts/app.js")), "// app");

    let index = read(out.join("index.html"));
    assert!(index.contains("<title>Home - Lab Notes</title>"));
    assert!(index.contains("Welcome to tissage"));
    assert!(!index.contains("type=\"module\""));

    let about = read(out.join("about.html"));
    assert!(about.contains("Our Mission"));
}

#[test_log::test]
fn build_configured_pages_with_bundle() {
    let (_dir, root) = project(
        r#"
output: public
assets:
  - pkg
wasm_bundle: pkg/tissage_applets.js
pages:
  - filename: index.html
    entry: home
  - filename: tools/editor.html
    entry: text-editor
    title: Editor
"#,
    );
    fs_err::create_dir_all(root.join("pkg")).unwrap();
    fs_err::write(root.join("pkg/tissage_applets.js"), "export default () => {}").unwrap();
    let config = ResolvedConfig::discover_from(&root).unwrap().unwrap();

    build(&config).unwrap();

    let out = root.join("public");
    assert!(out.join("pkg/tissage_applets.js").exists());

    let index = read(out.join("index.html"));
    assert!(index.contains("from \"./pkg/tissage_applets.js\""));
    assert!(index.contains("start_app(\"home\")"));

    let editor = read(out.join("tools/editor.html"));
    assert!(editor.contains("<title>Editor</title>"));
    assert!(editor.contains("from \"../pkg/tissage_applets.js\""));
    assert!(editor.contains("data-applet=\"text-editor\""));
}

#[test_log::test]
fn rebuild_replaces_stale_assets() {
    let (_dir, root) = project("title: Rebuild\n");
    let config = ResolvedConfig::discover_from(&root).unwrap().unwrap();

    init(&config).unwrap();
    fs_err::write(root.join("output/scripts/stale.js"), "old").unwrap();
    fs_err::remove_file(root.join("scripts/app.js")).unwrap();
    fs_err::write(root.join("scripts/fresh.js"), "new").unwrap();

    init(&config).unwrap();
    assert!(!root.join("output/scripts/stale.js").exists());
    assert!(!root.join("output/scripts/app.js").exists());
    assert_eq!(read(root.join("output/scripts/fresh.js")), "new");
}

#[test]
fn unknown_entry_is_reported() {
    let (_dir, root) = project("pages:\n  - filename: blog.html\n    entry: blog\n");
    let config = ResolvedConfig::discover_from(&root).unwrap().unwrap();
    let err = build(&config).unwrap_err();
    assert!(matches!(err, SiteError::UnknownEntry(ref e) if e == "blog"));
}
