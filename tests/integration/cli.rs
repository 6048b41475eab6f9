use predicates::prelude::*;

use user_secrets_id::test_utils::fixtures::MuxerBehavior;

use crate::common::{Workspace, shipped_assets_dir};

#[test]
fn test_id_prints_identifier() {
    let ws = Workspace::new(MuxerBehavior::WriteId("cli-secrets-1\n".to_string()));
    ws.projects.add_project("App.csproj").unwrap();

    ws.command().arg("id").assert().success().stdout("cli-secrets-1\n");
    assert!(ws.scratch_is_empty());
}

#[test]
fn test_id_with_project_and_configuration() {
    let ws = Workspace::new(MuxerBehavior::EchoProjectName);
    ws.projects.add_project("src/Api/Api.csproj").unwrap();

    ws.command()
        .args(["id", "--project", "src/Api", "-c", "Release"])
        .assert()
        .success()
        .stdout("Api\n");

    let args = ws.muxer.invocations().unwrap().remove(0);
    assert!(args.contains(&"/p:Configuration=Release".to_string()));
}

#[test]
fn test_id_json() {
    let ws = Workspace::new(MuxerBehavior::WriteId("json-id".to_string()));
    let project = ws.projects.add_project("App.csproj").unwrap();

    let output = ws.command().args(["id", "--json"]).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["userSecretsId"], "json-id");
    // Project discovery joins onto the canonical working directory of the child.
    let reported = value["project"].as_str().unwrap();
    assert!(reported.ends_with("App.csproj"));
    assert_eq!(
        std::path::Path::new(reported).canonicalize().unwrap(),
        project.canonicalize().unwrap()
    );
    assert!(value.get("secretsPath").is_none());
}

#[test]
fn test_path_prints_secrets_file() {
    let ws = Workspace::new(MuxerBehavior::WriteId("path-id".to_string()));
    ws.projects.add_project("App.csproj").unwrap();

    let expected = ws.home.path().join(".microsoft").join("usersecrets").join("path-id").join("secrets.json");
    ws.command().arg("path").assert().success().stdout(format!("{}\n", expected.display()));
}

#[test]
fn test_path_with_explicit_id_does_not_run_msbuild() {
    let ws = Workspace::new(MuxerBehavior::WriteNothing);

    ws.command()
        .args(["path", "--id", "given-id", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"userSecretsId\": \"given-id\""))
        .stdout(predicate::str::contains("given-id/secrets.json"))
        .stdout(predicate::str::contains("\"project\"").not());

    assert!(ws.muxer.invocations().unwrap().is_empty());
}

#[test]
fn test_invalid_explicit_id() {
    let ws = Workspace::new(MuxerBehavior::WriteNothing);

    ws.command()
        .args(["path", "--id", "bad/id"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid character '/'"));
}

#[test]
fn test_missing_id_exits_with_error() {
    let ws = Workspace::new(MuxerBehavior::WriteNothing);
    ws.projects.add_project("App.csproj").unwrap();

    ws.command()
        .arg("id")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Could not find the global property 'UserSecretsId'"))
        .stderr(predicate::str::contains("--id"));
    assert!(ws.scratch_is_empty());
}

#[test]
fn test_build_failure_output_only_with_verbose() {
    let ws = Workspace::new(MuxerBehavior::Fail {
        code: 1,
        stdout: "error MSB4025: The project file could not be loaded.".to_string(),
        stderr: String::new(),
    });
    ws.projects.add_project("App.csproj").unwrap();

    ws.command()
        .arg("id")
        .assert()
        .failure()
        .stdout(predicate::str::contains("MSB4025").not())
        .stderr(predicate::str::contains("Could not load the MSBuild project"));

    ws.command()
        .args(["id", "--verbose"])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("MSB4025"))
        .stderr(predicate::str::contains("Project file path"));
    assert!(ws.scratch_is_empty());
}

#[test]
fn test_verbose_json_stdout_is_only_json() {
    let ws = Workspace::new(MuxerBehavior::WriteId("verbose-json-id".to_string()));
    ws.projects.add_project("App.csproj").unwrap();

    let output = ws.command().args(["id", "--json", "-v"]).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["userSecretsId"], "verbose-json-id");
    assert!(String::from_utf8_lossy(&output.stderr).contains("Project file path"));
}

#[test]
fn test_explicit_id_is_trimmed() {
    let ws = Workspace::new(MuxerBehavior::WriteNothing);

    ws.command().args(["id", "--id", "  abc \n"]).assert().success().stdout("abc\n");
    assert!(ws.muxer.invocations().unwrap().is_empty());
}

#[test]
fn test_empty_explicit_id_is_rejected() {
    let ws = Workspace::new(MuxerBehavior::WriteNothing);

    ws.command()
        .args(["path", "--id", ""])
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("cannot be empty"));

    ws.command()
        .args(["id", "--id", "   "])
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("cannot be empty"));
    assert!(ws.muxer.invocations().unwrap().is_empty());
}

#[test]
fn test_dot_directory_explicit_id_is_rejected() {
    let ws = Workspace::new(MuxerBehavior::WriteNothing);

    for id in ["..", "."] {
        ws.command()
            .args(["path", "--id", id])
            .assert()
            .failure()
            .code(1)
            .stdout("")
            .stderr(predicate::str::contains("is not a valid directory name"));
    }
}

#[test]
fn test_multiple_projects_suggests_project_option() {
    let ws = Workspace::new(MuxerBehavior::WriteId("unused".to_string()));
    ws.projects.add_project("A.csproj").unwrap();
    ws.projects.add_project("B.csproj").unwrap();

    ws.command()
        .arg("id")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Multiple MSBuild project files found"))
        .stderr(predicate::str::contains("--project"));
}

#[test]
fn test_unstartable_muxer() {
    let ws = Workspace::new(MuxerBehavior::WriteNothing);
    ws.projects.add_project("App.csproj").unwrap();
    let missing = ws.scratch.path().join("no-dotnet-here");

    // Falls through to the repository's own toolassets and a bogus PATH.
    ws.command()
        .arg("id")
        .env("DOTNET_HOST_PATH", "")
        .env("PATH", &missing)
        .env("USER_SECRETS_ID_ASSETS_DIR", shipped_assets_dir())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to start"));
}

#[test]
fn test_verbose_and_quiet_conflict() {
    let ws = Workspace::new(MuxerBehavior::WriteNothing);
    ws.command().args(["id", "-v", "-q"]).assert().failure().code(2);
}
