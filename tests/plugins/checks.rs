use quality_gate::core::check::{Check, CheckOptions};
use quality_gate::core::config::GateConfig;
use quality_gate::core::workspace::SourceTree;
use quality_gate::plugins::{
    ConflictMarkersCheck, FinalNewlineCheck, FixmeMarkersCheck, LongLinesCheck,
    TrailingWhitespaceCheck,
};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn tree(root: &Path) -> SourceTree {
    SourceTree::new(root, &GateConfig::default())
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("mkdir");
    }
    fs::write(path, content).expect("write fixture");
}

#[test]
fn empty_tree_scores_full_marks_everywhere() {
    let tmp = tempdir().expect("tempdir");
    let t = tree(tmp.path());
    let checks: Vec<Box<dyn Check>> = vec![
        Box::new(ConflictMarkersCheck::new(t.clone())),
        Box::new(TrailingWhitespaceCheck::new(t.clone())),
        Box::new(FinalNewlineCheck::new(t.clone())),
        Box::new(LongLinesCheck::new(t.clone(), 120)),
        Box::new(FixmeMarkersCheck::new(t)),
    ];
    for check in checks {
        let result = check.run(CheckOptions::VERIFY).expect("run");
        assert_eq!(result.score, 100.0, "{} on empty tree", check.id());
        assert!(result.errors.is_empty());
    }
}

#[test]
fn conflict_markers_flag_one_error_per_file() {
    let tmp = tempdir().expect("tempdir");
    let marker = "<".repeat(7);
    write(tmp.path(), "src/a.rs", &format!("fn a() {{}}\n{} HEAD\n", marker));
    write(tmp.path(), "src/b.rs", "fn b() {}\n");
    write(tmp.path(), "README.md", "Title\n=======\n");

    let result = ConflictMarkersCheck::new(tree(tmp.path()))
        .run(CheckOptions::VERIFY)
        .expect("run");
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].starts_with("src/a.rs:2:"), "{:?}", result.errors);
    assert!((result.score - 200.0 / 3.0).abs() < 1e-9);
    assert_eq!(result.stats["files_scanned"], 3);
}

#[test]
fn excluded_and_ignored_paths_are_not_scanned() {
    let tmp = tempdir().expect("tempdir");
    write(tmp.path(), "target/debug/gen.rs", "x  \n");
    write(tmp.path(), "vendor/lib.rs", "y  \n");
    write(tmp.path(), ".gitignore", "vendor/\n");
    write(tmp.path(), ".hidden/z.rs", "z  \n");
    write(tmp.path(), "src/main.rs", "fn main() {}\n");

    let result = TrailingWhitespaceCheck::new(tree(tmp.path()))
        .run(CheckOptions::VERIFY)
        .expect("run");
    assert_eq!(result.score, 100.0);
    assert_eq!(result.stats["files_scanned"], 1);
}

#[test]
fn trailing_whitespace_fix_rewrites_then_verifies_clean() {
    let tmp = tempdir().expect("tempdir");
    write(tmp.path(), "a.rs", "let x = 1;  \r\nlet y = 2;\t\n");
    write(tmp.path(), "notes.md", "hard break  \nnext\n");
    let check = TrailingWhitespaceCheck::new(tree(tmp.path()));

    let before = check.run(CheckOptions::VERIFY).expect("verify");
    assert_eq!(before.score, 0.0);
    assert!(before.errors[0].contains("2 line(s)"));

    let fixed = check.run(CheckOptions::FIX).expect("fix");
    assert_eq!(fixed.stats["files_fixed"], 1);

    let after = check.run(CheckOptions::VERIFY).expect("verify");
    assert_eq!(after.score, 100.0);
    assert_eq!(
        fs::read_to_string(tmp.path().join("a.rs")).unwrap(),
        "let x = 1;\r\nlet y = 2;\n"
    );
    // Markdown is left alone.
    assert_eq!(
        fs::read_to_string(tmp.path().join("notes.md")).unwrap(),
        "hard break  \nnext\n"
    );
}

#[test]
fn final_newline_fix_is_idempotent() {
    let tmp = tempdir().expect("tempdir");
    write(tmp.path(), "a.toml", "key = 1");
    write(tmp.path(), "b.toml", "key = 2\n");
    let check = FinalNewlineCheck::new(tree(tmp.path()));

    assert_eq!(check.run(CheckOptions::VERIFY).unwrap().score, 50.0);
    check.run(CheckOptions::FIX).unwrap();
    check.run(CheckOptions::FIX).unwrap();

    assert_eq!(fs::read_to_string(tmp.path().join("a.toml")).unwrap(), "key = 1\n");
    assert_eq!(check.run(CheckOptions::VERIFY).unwrap().score, 100.0);
}

#[test]
fn verify_pass_never_touches_files() {
    let tmp = tempdir().expect("tempdir");
    write(tmp.path(), "a.rs", "dirty  ");
    TrailingWhitespaceCheck::new(tree(tmp.path()))
        .run(CheckOptions::VERIFY)
        .unwrap();
    FinalNewlineCheck::new(tree(tmp.path()))
        .run(CheckOptions::VERIFY)
        .unwrap();
    assert_eq!(fs::read_to_string(tmp.path().join("a.rs")).unwrap(), "dirty  ");
}

#[test]
fn long_lines_respect_configured_limit_and_skip_prose() {
    let tmp = tempdir().expect("tempdir");
    write(tmp.path(), "a.rs", &format!("{}\nok\n", "x".repeat(30)));
    write(tmp.path(), "b.md", &format!("{}\n", "y".repeat(300)));

    let strict = LongLinesCheck::new(tree(tmp.path()), 20).run(CheckOptions::VERIFY).unwrap();
    assert_eq!(strict.score, 0.0);
    assert!(strict.errors[0].contains("longest 30"));
    assert_eq!(strict.stats["files_scanned"], 1);

    let loose = LongLinesCheck::new(tree(tmp.path()), 40).run(CheckOptions::VERIFY).unwrap();
    assert_eq!(loose.score, 100.0);
}

#[test]
fn todo_markers_warn_without_costing_score() {
    let tmp = tempdir().expect("tempdir");
    let todo = ["TO", "DO"].concat();
    let fixme = ["FIX", "ME"].concat();
    write(tmp.path(), "a.rs", &format!("// {}: later\n", todo));
    write(tmp.path(), "b.rs", &format!("fn b() {{}}\n// {}: now\n", fixme));

    let result = FixmeMarkersCheck::new(tree(tmp.path())).run(CheckOptions::VERIFY).unwrap();
    assert_eq!(result.score, 50.0);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].starts_with("b.rs:2:"));
    assert_eq!(result.warnings.len(), 1);
    assert!(!result.stats.contains_key("files_fixed"));
}
