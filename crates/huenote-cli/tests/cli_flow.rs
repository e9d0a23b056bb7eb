use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const PASSPHRASE: &str = "correct horse battery staple";
const COLORS: &str = "red,lime,blue";

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_huenote"))
}

/// Isolated XDG dirs so no test touches a real config or store.
struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("temp dir"),
        }
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(bin());
        cmd.env("HOME", self.root())
            .env("XDG_CONFIG_HOME", self.root().join("config"))
            .env("XDG_DATA_HOME", self.root().join("data"))
            .env("HUENOTE_PASSPHRASE", PASSPHRASE)
            .env("NO_COLOR", "1")
            .env_remove("HUENOTE_STORE")
            .env_remove("HUENOTE_CONFIG")
            .env_remove("HUENOTE_COLORS")
            .env_remove("HUENOTE_LOG");
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.command().args(args).output().expect("run huenote")
    }

    fn init(&self) {
        let output = self.run(&["init"]);
        assert_success(&output);
    }

    fn write(&self, title: &str, body: &str, algorithm: &str) -> String {
        let output = self.run(&[
            "-q",
            "write",
            title,
            "--body",
            body,
            "--algorithm",
            algorithm,
            "--colors",
            COLORS,
        ]);
        assert_success(&output);
        stdout(&output).trim().to_string()
    }

    fn show_json(&self, id: &str, colors: &str) -> Output {
        self.run(&["show", id, "--colors", colors, "--json"])
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "command failed: {:?}\nstdout: {}\nstderr: {}",
        output.status.code(),
        stdout(output),
        stderr(output)
    );
}

fn body_of(output: &Output) -> String {
    assert_success(output);
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    value["body"].as_str().expect("body").to_string()
}

#[test]
fn test_init_write_list_show() {
    let env = TestEnv::new();
    env.init();
    assert!(env.root().join("config").join("huenote").join("config.toml").exists());
    assert!(env.root().join("data").join("huenote").join("notes.db").exists());

    let id = env.write("Groceries", "milk, eggs", "aes-gcm");

    let list = env.run(&["list", "--json"]);
    assert_success(&list);
    let notes: serde_json::Value = serde_json::from_slice(&list.stdout).expect("json");
    let notes = notes.as_array().expect("array");
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["id"], id.as_str());
    assert_eq!(notes[0]["title"], "Groceries");
    assert_eq!(notes[0]["algorithm"], "AES-GCM");
    assert!(notes[0].get("data").is_none());

    assert_eq!(body_of(&env.show_json(&id, COLORS)), "milk, eggs");
}

#[test]
fn test_color_names_and_hex_are_interchangeable() {
    let env = TestEnv::new();
    env.init();
    let id = env.write("Hex", "same key", "aes");
    assert_eq!(
        body_of(&env.show_json(&id, "#FF0000, #00ff00, #0000FF")),
        "same key"
    );
}

#[test]
fn test_wrong_color_order_fails_auth() {
    let env = TestEnv::new();
    env.init();
    let id = env.write("Secret", "launch codes", "aes-gcm");

    let output = env.show_json(&id, "blue,lime,red");
    assert_eq!(output.status.code(), Some(5));
    assert!(stderr(&output).contains("Decryption failed."));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_wrong_passphrase_fails_auth() {
    let env = TestEnv::new();
    env.init();
    let id = env.write("Secret", "launch codes", "ecc");

    let output = env
        .command()
        .env("HUENOTE_PASSPHRASE", "wrong")
        .args(["show", &id, "--colors", COLORS])
        .output()
        .expect("run huenote");
    assert_eq!(output.status.code(), Some(5));
}

#[test]
fn test_asymmetric_notes_roundtrip() {
    let env = TestEnv::new();
    env.init();
    let rsa = env.write("Short", "fits in one OAEP block", "rsa-oaep");
    let ecc = env.write("Long", &"ecc body ".repeat(100), "ecc");

    assert_eq!(body_of(&env.show_json(&rsa, COLORS)), "fits in one OAEP block");
    assert_eq!(body_of(&env.show_json(&ecc, COLORS)), "ecc body ".repeat(100));

    let check = env.run(&["check"]);
    assert_success(&check);
    assert!(stdout(&check).contains("- wrapped keys: 2"));
}

#[test]
fn test_rsa_oversized_body_is_invalid_input() {
    let env = TestEnv::new();
    env.init();
    let body = "x".repeat(191);
    let output = env.run(&[
        "write", "Too long", "--body", &body, "-a", "rsa", "--colors", COLORS,
    ]);
    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("RSA-OAEP"));

    let list = env.run(&["list", "--json"]);
    assert_eq!(stdout(&list).trim(), "[]");
}

#[test]
fn test_invalid_inputs() {
    let env = TestEnv::new();
    env.init();

    let empty_title = env.run(&["write", "  ", "--body", "x", "--colors", COLORS]);
    assert_eq!(empty_title.status.code(), Some(4));
    assert!(stderr(&empty_title).contains("Title cannot be empty"));

    let two_colors = env.run(&["write", "T", "--body", "x", "--colors", "red,lime"]);
    assert_eq!(two_colors.status.code(), Some(4));

    let unknown = env.run(&["write", "T", "--body", "x", "--colors", "red,lime,mauve"]);
    assert_eq!(unknown.status.code(), Some(4));

    let bad_algorithm = env.run(&["write", "T", "--body", "x", "-a", "des", "--colors", COLORS]);
    assert_eq!(bad_algorithm.status.code(), Some(4));

    let no_passphrase = env
        .command()
        .env_remove("HUENOTE_PASSPHRASE")
        .args(["write", "T", "--body", "x", "--colors", COLORS, "--no-input"])
        .output()
        .expect("run huenote");
    assert_eq!(no_passphrase.status.code(), Some(4));
    assert!(stderr(&no_passphrase).contains("Passphrase required"));
}

#[test]
fn test_colors_from_env() {
    let env = TestEnv::new();
    env.init();
    let id = env.write("Env", "from env", "aes-gcm");

    let output = env
        .command()
        .env("HUENOTE_COLORS", COLORS)
        .args(["show", &id, "--json"])
        .output()
        .expect("run huenote");
    assert_eq!(body_of(&output), "from env");
}

#[test]
fn test_missing_note_and_missing_config() {
    let env = TestEnv::new();

    let no_config = env.run(&["list"]);
    assert_eq!(no_config.status.code(), Some(3));
    assert!(stderr(&no_config).contains("huenote init"));

    env.init();
    let missing = env.show_json("no-such-note", COLORS);
    assert_eq!(missing.status.code(), Some(3));
}

#[test]
fn test_init_refuses_to_overwrite_config() {
    let env = TestEnv::new();
    env.init();
    let again = env.run(&["init"]);
    assert_eq!(again.status.code(), Some(4));

    let forced = env.run(&["init", "--force", "--algorithm", "ecc"]);
    assert_success(&forced);

    // The new default applies when --algorithm is omitted.
    let output = env.run(&["-q", "write", "Default", "--body", "x", "--colors", COLORS]);
    assert_success(&output);
    let list = env.run(&["list", "--json"]);
    let notes: serde_json::Value = serde_json::from_slice(&list.stdout).expect("json");
    assert_eq!(notes[0]["algorithm"], "ECC");
}

#[test]
fn test_edit_then_delete() {
    let env = TestEnv::new();
    env.init();
    let id = env.write("Draft", "first", "ecc");

    let wrong = env.run(&["edit", &id, "--body", "hijack", "--colors", "lime,red,blue"]);
    assert_eq!(wrong.status.code(), Some(5));
    assert_eq!(body_of(&env.show_json(&id, COLORS)), "first");

    let edit = env.run(&["edit", &id, "--body", "second", "--colors", COLORS]);
    assert_success(&edit);
    assert_eq!(body_of(&env.show_json(&id, COLORS)), "second");

    let delete = env.run(&["delete", &id, "--yes"]);
    assert_success(&delete);
    assert_eq!(env.show_json(&id, COLORS).status.code(), Some(3));

    let check = env.run(&["check"]);
    assert_success(&check);
    assert!(stdout(&check).contains("- wrapped keys: 0"));
}

#[test]
fn test_list_search_and_filter() {
    let env = TestEnv::new();
    env.init();
    env.write("Work todo", "a", "aes-gcm");
    env.write("Home todo", "b", "ecc");
    env.write("Recipes", "c", "aes-gcm");

    let search = env.run(&["list", "--search", "TODO", "--json"]);
    let notes: serde_json::Value = serde_json::from_slice(&search.stdout).expect("json");
    assert_eq!(notes.as_array().expect("array").len(), 2);

    let filtered = env.run(&["list", "--algorithm", "ecc", "--json"]);
    let notes: serde_json::Value = serde_json::from_slice(&filtered.stdout).expect("json");
    let notes = notes.as_array().expect("array");
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["title"], "Home todo");

    let limited = env.run(&["list", "--limit", "1", "--json"]);
    let notes: serde_json::Value = serde_json::from_slice(&limited.stdout).expect("json");
    assert_eq!(notes.as_array().expect("array").len(), 1);

    let table = env.run(&["list"]);
    assert_success(&table);
    assert!(stdout(&table).contains("Recipes"));
}

#[test]
fn test_export_import_into_fresh_store() {
    let source = TestEnv::new();
    source.init();
    let aes = source.write("Plain", "aes body", "aes-gcm");
    let ecc = source.write("Curve", "ecc body", "ecc");

    let archive = source.root().join("backup.json");
    let export = source.run(&["export", archive.to_str().expect("utf8 path")]);
    assert_success(&export);
    let contents = std::fs::read_to_string(&archive).expect("read archive");
    assert!(contents.contains("\"encryptedNotes\""));
    assert!(!contents.contains("aes body"));

    let target = TestEnv::new();
    target.init();
    let import = target.run(&["import", archive.to_str().expect("utf8 path")]);
    assert_success(&import);
    assert!(stdout(&import).contains("Imported 2 notes (0 skipped)"));

    assert_eq!(body_of(&target.show_json(&aes, COLORS)), "aes body");
    assert_eq!(body_of(&target.show_json(&ecc, COLORS)), "ecc body");

    let again = target.run(&["import", archive.to_str().expect("utf8 path")]);
    assert!(stdout(&again).contains("Imported 0 notes (2 skipped)"));
}

#[test]
fn test_palette_and_completions() {
    let env = TestEnv::new();
    let palette = env.run(&["palette"]);
    assert_success(&palette);
    let text = stdout(&palette);
    assert_eq!(text.lines().count(), 15);
    assert!(text.contains("royal-blue"));
    assert!(text.contains("#FF0000"));

    let completions = env.run(&["completions", "bash"]);
    assert_success(&completions);
    assert!(stdout(&completions).contains("huenote"));
}
