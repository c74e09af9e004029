use std::fs;
use std::path::Path;
use tododev_core::{
    resolve_database_url, resolve_sqlite_path, DatabaseLocation, DbError, ProjectLayout,
    DEFAULT_DATABASE_URL,
};

#[test]
fn missing_config_file_yields_default_url() {
    let dir = tempfile::tempdir().unwrap();
    let layout = ProjectLayout::new(dir.path());

    assert_eq!(resolve_database_url(&layout), DEFAULT_DATABASE_URL);
}

#[test]
fn structured_config_value_wins() {
    let dir = tempfile::tempdir().unwrap();
    write_config(
        dir.path(),
        r#"
[default]
port = 8000

[default.databases.sqlite_db]
url = "sqlite:./var/app.db"
"#,
    );

    let layout = ProjectLayout::new(dir.path());
    assert_eq!(resolve_database_url(&layout), "sqlite:./var/app.db");
}

#[test]
fn malformed_config_falls_back_to_line_scan() {
    let dir = tempfile::tempdir().unwrap();
    write_config(
        dir.path(),
        "[default.databases.sqlite_db\n  url = \"sqlite:./scanned.db\"\n",
    );

    let layout = ProjectLayout::new(dir.path());
    assert_eq!(resolve_database_url(&layout), "sqlite:./scanned.db");
}

#[test]
fn malformed_and_unmatched_configs_yield_default() {
    let cases: [&[u8]; 4] = [
        b"",
        b"[[[ not toml at all",
        b"[default]\ndatabase = \"sqlite:./nope.db\"\n",
        &[0xc3, 0x28, 0xff, 0x00],
    ];

    for raw in cases {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Rocket.toml"), raw).unwrap();

        let url = resolve_database_url(&ProjectLayout::new(dir.path()));
        assert!(!url.is_empty());
        assert!(url.starts_with("sqlite:"), "unexpected url {url}");
    }
}

#[test]
fn config_file_override_is_honored() {
    let dir = tempfile::tempdir().unwrap();
    let custom = dir.path().join("conf").join("app.toml");
    fs::create_dir_all(custom.parent().unwrap()).unwrap();
    fs::write(
        &custom,
        "[default.databases.sqlite_db]\nurl = \"sqlite:custom.db\"\n",
    )
    .unwrap();

    let layout = ProjectLayout::new(dir.path()).with_config_file(&custom);
    assert_eq!(resolve_database_url(&layout), "sqlite:custom.db");
}

#[test]
fn default_url_resolves_under_project_root() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();

    let path = resolve_sqlite_path(&root, "sqlite:./database/todos.db").unwrap();

    assert!(path.is_absolute());
    assert!(path.ends_with("database/todos.db"));
    assert_eq!(path, root.join("database").join("todos.db"));
}

#[test]
fn parent_segments_are_collapsed() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    fs::create_dir(root.join("app")).unwrap();

    let path = resolve_sqlite_path(&root.join("app"), "sqlite:../shared/./todos.db").unwrap();

    assert_eq!(path, root.join("shared").join("todos.db"));
}

#[cfg(unix)]
#[test]
fn parent_segment_after_symlink_steps_out_of_link_target() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    fs::create_dir_all(root.join("real").join("sub")).unwrap();
    std::os::unix::fs::symlink(root.join("real").join("sub"), root.join("link")).unwrap();

    let path = resolve_sqlite_path(&root, "sqlite:./link/../todos.db").unwrap();

    assert_eq!(path, root.join("real").join("todos.db"));
}

#[test]
fn absolute_paths_ignore_project_root() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().canonicalize().unwrap().join("abs.db");
    let url = format!("sqlite:{}", target.display());

    let path = resolve_sqlite_path(Path::new("/somewhere/else"), &url).unwrap();

    assert_eq!(path, target);
}

#[test]
fn non_sqlite_scheme_is_a_configuration_error() {
    let err = resolve_sqlite_path(Path::new("/tmp"), "postgres://localhost/todos").unwrap_err();
    assert!(matches!(err, DbError::Configuration(_)));
    assert!(err.to_string().contains("postgres://localhost/todos"));
}

#[test]
fn configured_non_sqlite_url_fails_location_resolution() {
    let dir = tempfile::tempdir().unwrap();
    write_config(
        dir.path(),
        "[default.databases.sqlite_db]\nurl = \"mysql://db/todos\"\n",
    );

    let err = DatabaseLocation::resolve(&ProjectLayout::new(dir.path())).unwrap_err();
    assert!(matches!(err, DbError::Configuration(_)));
}

#[test]
fn sidecar_paths_append_to_full_file_name() {
    let dir = tempfile::tempdir().unwrap();
    let location = DatabaseLocation::resolve(&ProjectLayout::new(dir.path())).unwrap();

    assert_eq!(location.url(), DEFAULT_DATABASE_URL);
    assert_eq!(
        location.wal().file_name().unwrap().to_str().unwrap(),
        "todos.db-wal"
    );
    assert_eq!(
        location.shm().file_name().unwrap().to_str().unwrap(),
        "todos.db-shm"
    );
    assert_eq!(location.wal().parent(), location.primary().parent());
}

fn write_config(root: &Path, content: &str) {
    fs::write(root.join("Rocket.toml"), content).unwrap();
}
