#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn sg() -> Command {
    cargo_bin_cmd!("sessiongen")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_sessiongen.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Path of the schema file shipped with the crate
pub fn schema_path() -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("schema.sql")
        .to_string_lossy()
        .to_string()
}

/// Write `content` to a temp file and return its path
pub fn temp_file(name: &str, ext: &str, content: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_sessiongen.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::write(&p, content).expect("write temp file");
    p
}

/// Run `init` followed by a seeded `generate` through the CLI
pub fn init_and_generate(db_path: &str, extra: &[&str]) {
    let schema = schema_path();

    sg().args(["--db", db_path, "--schema", &schema, "init"])
        .assert()
        .success();

    let mut args = vec!["--db", db_path, "--schema", schema.as_str(), "generate", "--no-init"];
    args.extend_from_slice(extra);
    sg().args(&args).assert().success();
}

pub fn open(db_path: &str) -> rusqlite::Connection {
    rusqlite::Connection::open(db_path).expect("open db")
}

pub fn count_rows(db_path: &str) -> i64 {
    open(db_path)
        .query_row("SELECT COUNT(*) FROM activitysessions", [], |r| r.get(0))
        .expect("count rows")
}
