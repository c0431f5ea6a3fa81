use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

/// A project directory whose `astgen.toml` stops the config search.
fn project(config: &str, grammar: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("astgen.toml"), config).unwrap();
    fs::write(dir.path().join("ast.grammar"), grammar).unwrap();
    dir
}

fn astgen(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_astgen"))
        .args(args)
        .current_dir(dir)
        .env_remove("ASTGEN_LOG")
        .output()
        .unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_generate_writes_output_file() {
    let dir = project("package = \"lang\"\n", "Expr<Ast=Lit:int v;");
    let output = astgen(dir.path(), &["generate", "ast.grammar", "-o", "Ast.java"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(output.stdout.is_empty());

    let java = fs::read_to_string(dir.path().join("Ast.java")).unwrap();
    assert!(java.starts_with("package lang;\n"));
    assert!(java.contains("public static record Lit(int v) implements Expr {"));
}

#[test]
fn test_generate_malformed_grammar_writes_nothing() {
    let dir = project("", "Broken;");
    let output = astgen(dir.path(), &["generate", "ast.grammar", "-o", "Ast.java"]);
    assert!(!output.status.success());
    assert!(!dir.path().join("Ast.java").exists());
    assert!(output.stdout.is_empty());

    let stderr = stderr(&output);
    assert!(stderr.contains("missing `<`"));
    assert!(stderr.contains("ast.grammar"));
}

#[test]
fn test_generate_renders_warnings_and_continues() {
    let dir = project("", "Expr<Node=Lit:int v;");
    let output = astgen(dir.path(), &["generate", "ast.grammar", "-o", "Ast.java"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(dir.path().join("Ast.java").exists());

    let stderr = stderr(&output);
    assert!(stderr.contains("warning"));
    assert!(stderr.contains("undeclared capability `Node`"));
}

#[test]
fn test_generate_deny_flag_fails() {
    let dir = project("", "Expr<Node=Lit:int v;");
    let output = astgen(
        dir.path(),
        &["generate", "ast.grammar", "--check", "deny", "-o", "Ast.java"],
    );
    assert!(!output.status.success());
    assert!(!dir.path().join("Ast.java").exists());
    assert!(stderr(&output).contains("undeclared capability `Node`"));
}

#[test]
fn test_generate_from_stdin_uses_current_directory_config() {
    let dir = project("package = \"from.stdin\"\nimports = []\n", "");
    let mut child = Command::new(env!("CARGO_BIN_EXE_astgen"))
        .arg("generate")
        .current_dir(dir.path())
        .env_remove("ASTGEN_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"Stmt<Ast;")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success(), "{}", stderr(&output));

    let java = String::from_utf8(output.stdout).unwrap();
    assert!(java.starts_with("package from.stdin;\n\npublic interface Ast {\n"));
}

#[test]
fn test_check_prints_summary() {
    let dir = project("", "Expr<Ast=Lit:int v|Neg:Expr e;Stmt<Ast;");
    let output = astgen(dir.path(), &["check", "ast.grammar"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "ast.grammar: 2 families, 2 variants, no issues\n"
    );
}

#[test]
fn test_check_denies_even_when_config_is_off() {
    let dir = project("capability-check = \"off\"\n", "Type<Node=Type:int x;");
    let output = astgen(dir.path(), &["check", "ast.grammar"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = stderr(&output);
    assert!(stderr.contains("undeclared capability `Node`"));
    assert!(stderr.contains("has the same name as a family"));
}

#[test]
fn test_check_extern_capability_resolves() {
    let dir = project("", "Expr<Node=Lit:int v;");
    let output = astgen(
        dir.path(),
        &["check", "ast.grammar", "--extern-capability", "Node"],
    );
    assert!(output.status.success(), "{}", stderr(&output));
}
