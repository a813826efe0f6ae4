use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn config_show_defaults() {
    // No config file present, shows all defaults
    let tmp = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("swagger-autogen").unwrap();
    cmd.args(["config", "show", "--path", tmp.path().to_str().unwrap()]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Resolved settings:"))
        .stdout(predicate::str::contains("generate.format: json <- default"))
        .stdout(predicate::str::contains("alias.depth: 2 <- default"))
        .stdout(predicate::str::contains(
            "paths.dto: src/shared/api/dto.ts <- default",
        ))
        .stdout(predicate::str::contains("Output paths:"))
        .stdout(predicate::str::contains("@/shared/api/type-guards.gen"));
}

#[test]
fn config_show_with_project_config() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(
        tmp.path().join("swagger-autogen.toml"),
        r#"
[generate]
format = "text"

[alias]
depth = 3

[paths]
dto = "src/api/models.ts"
"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("swagger-autogen").unwrap();
    cmd.args(["config", "show", "--path", tmp.path().to_str().unwrap()]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("swagger-autogen.toml"))
        .stdout(predicate::str::contains(
            "generate.format: text <- project config",
        ))
        .stdout(predicate::str::contains("alias.depth: 3 <- project config"))
        .stdout(predicate::str::contains(
            "paths.dto: src/api/models.ts <- project config",
        ))
        .stdout(predicate::str::contains("@/api/models"));
}

#[test]
fn config_show_env_var_overrides_project() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("swagger-autogen.toml"), "[alias]\ndepth = 3\n").unwrap();

    let mut cmd = Command::cargo_bin("swagger-autogen").unwrap();
    cmd.args(["config", "show", "--path", tmp.path().to_str().unwrap()])
        .env("SWAGGER_AUTOGEN_ALIAS_DEPTH", "1");
    cmd.assert().success().stdout(predicate::str::contains(
        "alias.depth: 1 <- env var (SWAGGER_AUTOGEN_ALIAS_DEPTH)",
    ));
}

#[test]
fn config_explain_category() {
    let tmp = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("swagger-autogen").unwrap();
    cmd.args([
        "config",
        "explain",
        "queries",
        "--path",
        tmp.path().to_str().unwrap(),
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Artifact: queries"))
        .stdout(predicate::str::contains(
            "paths.queries: src/entities/{moduleName}/api/queries.ts <- default",
        ))
        .stdout(predicate::str::contains(
            "alias: @/entities/{moduleName}/api/queries",
        ));
}

#[test]
fn config_explain_unknown_category() {
    let tmp = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("swagger-autogen").unwrap();
    cmd.args([
        "config",
        "explain",
        "widgets",
        "--path",
        tmp.path().to_str().unwrap(),
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Unknown artifact category: widgets"));
}

#[test]
fn invalid_config_fails() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("swagger-autogen.toml"), "[paths]\nwidgets = \"x.ts\"\n").unwrap();

    let mut cmd = Command::cargo_bin("swagger-autogen").unwrap();
    cmd.args(["config", "show", "--path", tmp.path().to_str().unwrap()]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown artifact category"));
}
