use std::fs;
use std::path::Path;
use std::sync::Arc;

use etl_config::{ConfigurationRegistry, MemoryFs, RegistrySettings, SourceFs, TraversalPolicy};
use etl_primitives::StatusCode;
use tempfile::TempDir;

fn path_str(path: &Path) -> String {
    path.to_str().expect("temp paths are utf-8").to_owned()
}

fn write(dir: &Path, name: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, "{}").unwrap();
    path_str(&path)
}

fn fixture() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.json");
    write(dir.path(), "b.json");
    fs::create_dir(dir.path().join("nested")).unwrap();
    write(&dir.path().join("nested"), "c.json");
    dir
}

#[test]
fn missing_path_is_an_error_at_any_depth() {
    let dir = tempfile::tempdir().unwrap();
    let missing = path_str(&dir.path().join("absent.json"));
    let mut registry = ConfigurationRegistry::new("reader");

    for depth in [-1, 0, 1, 10] {
        assert!(registry.register_with_depth(&missing, depth).is_error());
    }
    assert_eq!(registry.count(), 0);
    assert!(!registry.is_configured());
}

#[test]
fn file_is_added_once() {
    let dir = fixture();
    let file = path_str(&dir.path().join("a.json"));
    let mut registry = ConfigurationRegistry::new("reader");

    assert_eq!(registry.register(&file), StatusCode::SUCCESS);
    assert_eq!(registry.count(), 1);
    assert_eq!(registry.register_with_depth(&file, 3), StatusCode::ALREADY_REGISTERED);
    assert_eq!(registry.count(), 1);
}

#[test]
fn directory_adds_every_fresh_file_with_suppression() {
    let dir = fixture();
    let mut registry = ConfigurationRegistry::new("reader")
        .with_policy(TraversalPolicy::new().with_suppress_warnings_on_add(true));

    let status = registry.register_with_depth(&path_str(dir.path()), 1);
    assert!(status.is_ok());
    assert_eq!(registry.count(), 3);
    assert_eq!(
        registry.sources(),
        [
            path_str(&dir.path().join("a.json")),
            path_str(&dir.path().join("b.json")),
            path_str(&dir.path().join("nested").join("c.json")),
        ]
    );
}

#[test]
fn duplicate_second_child_stops_traversal() {
    let dir = tempfile::tempdir().unwrap();
    let first = write(dir.path(), "1-first.json");
    let second = write(dir.path(), "2-second.json");
    let third = write(dir.path(), "3-third.json");

    let mut registry = ConfigurationRegistry::new("reader");
    registry.register(&second);

    let status = registry.register_with_depth(&path_str(dir.path()), 1);
    assert_eq!(status, StatusCode::ALREADY_REGISTERED);
    assert_eq!(registry.sources(), [second, first]);
    assert!(!registry.sources().contains(&third));
}

#[test]
fn third_child_is_never_classified_after_a_duplicate() {
    let fs = Arc::new(
        MemoryFs::new()
            .with_dir("conf", ["conf/1", "conf/2", "conf/3"])
            .with_file("conf/1")
            .with_file("conf/2")
            .with_file("conf/3"),
    );
    let mut registry =
        ConfigurationRegistry::new("reader").with_fs(Arc::clone(&fs) as Arc<dyn SourceFs>);
    registry.register("conf/2");

    assert_eq!(registry.register("conf"), StatusCode::ALREADY_REGISTERED);
    assert_eq!(registry.sources(), ["conf/2", "conf/1"]);
    assert!(!fs.visited().contains(&"conf/3".to_owned()));
}

#[test]
fn negative_depth_never_mutates() {
    let dir = fixture();
    let mut registry = ConfigurationRegistry::new("reader");

    assert_eq!(registry.register_with_depth(&path_str(dir.path()), -1), StatusCode::SUCCESS);
    assert_eq!(registry.count(), 0);
    assert!(registry.is_configured());
}

#[test]
fn depth_zero_skips_subdirectories() {
    let dir = fixture();
    let mut registry = ConfigurationRegistry::new("reader");

    assert_eq!(registry.register_with_depth(&path_str(dir.path()), 0), StatusCode::SUCCESS);
    assert_eq!(registry.count(), 2);
}

#[test]
fn configured_flag_is_sticky() {
    let dir = fixture();
    let mut registry = ConfigurationRegistry::new("reader");
    registry.register(&path_str(&dir.path().join("a.json")));
    assert!(registry.is_configured());

    registry.register(&path_str(&dir.path().join("missing")));
    registry.register(&path_str(&dir.path().join("a.json")));
    assert!(registry.is_configured());
}

#[test]
fn settings_file_drives_registry() {
    let dir = fixture();
    let settings_path = dir.path().join("settings.conf");
    fs::write(
        &settings_path,
        r#"{ "default_max_depth": 0, "report_depth_exceeded": true }"#,
    )
    .unwrap();

    let mut registry = RegistrySettings::load(&settings_path)
        .unwrap()
        .build_registry("reader")
        .unwrap();

    // Children are visited by name: a.json, b.json, nested, settings.conf.
    // `nested` sits beyond the bound and its warning stops the walk.
    let status = registry.register(&path_str(dir.path()));
    assert_eq!(status, StatusCode::DEPTH_EXCEEDED);
    assert_eq!(registry.count(), 2);
}

#[cfg(unix)]
#[test]
fn symlink_cycles_are_bounded_by_depth() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "app.json");
    std::os::unix::fs::symlink(dir.path(), dir.path().join("loop")).unwrap();

    let mut registry = ConfigurationRegistry::new("reader");
    let status = registry.register_with_depth(&path_str(dir.path()), 3);

    assert_eq!(status, StatusCode::SUCCESS);
    // app.json is reached once per level through the link: depths 3, 2, 1, 0.
    assert_eq!(registry.count(), 4);
}
