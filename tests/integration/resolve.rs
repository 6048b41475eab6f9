use std::sync::Arc;
use std::thread;

use user_secrets_id::core::SecretsError;
use user_secrets_id::test_utils::RecordingReporter;
use user_secrets_id::test_utils::fixtures::MuxerBehavior;

use crate::common::Workspace;

fn secrets_error(err: &anyhow::Error) -> &SecretsError {
    err.downcast_ref::<SecretsError>().expect("expected a SecretsError")
}

#[test]
fn test_resolves_project_in_subdirectory() {
    let ws = Workspace::new(MuxerBehavior::EchoProjectName);
    let project = ws.projects.add_project("src/WebApp/WebApp.csproj").unwrap();
    let resolver = ws.resolver(Arc::new(RecordingReporter::new()));

    let resolved = resolver.resolve_project("src/WebApp", None).unwrap();
    assert_eq!(resolved.project_file, project);
    assert_eq!(resolved.id, "WebApp");
    assert!(ws.scratch_is_empty());
}

#[test]
fn test_metadata_file_removed_after_success_and_failure() {
    let ws = Workspace::new(MuxerBehavior::WriteId("id-1".to_string()));
    ws.projects.add_project("App.csproj").unwrap();
    let resolver = ws.resolver(Arc::new(RecordingReporter::new()));

    assert_eq!(resolver.resolve("", None).unwrap(), "id-1");
    let first = ws.muxer.metadata_paths().unwrap().remove(0);
    assert!(!first.exists());

    let ws = Workspace::new(MuxerBehavior::Fail {
        code: 2,
        stdout: String::new(),
        stderr: "MSB1009: Project file does not exist.".to_string(),
    });
    ws.projects.add_project("App.csproj").unwrap();
    let resolver = ws.resolver(Arc::new(RecordingReporter::new()));

    assert!(resolver.resolve("", None).is_err());
    let failed = ws.muxer.metadata_paths().unwrap().remove(0);
    assert!(!failed.exists());
    assert!(ws.scratch_is_empty());
}

#[test]
fn test_failed_build_never_returns_written_content() {
    let ws = Workspace::new(MuxerBehavior::Fail {
        code: 1,
        stdout: "Build FAILED.".to_string(),
        stderr: String::new(),
    });
    let project = ws.projects.add_project("App.csproj").unwrap();
    let reporter = Arc::new(RecordingReporter::new());
    let resolver = ws.resolver(reporter.clone());

    let err = resolver.resolve("App.csproj", Some("Release")).unwrap_err();
    assert!(matches!(
        secrets_error(&err),
        SecretsError::ProjectFailedToLoad { project: p } if p == &project
    ));
    assert!(!err.to_string().contains("decoy-id"));
    assert!(reporter.verbose_messages().iter().any(|m| m.contains("Build FAILED.")));
}

#[test]
fn test_any_non_zero_exit_code_is_failure() {
    let ws = Workspace::new(MuxerBehavior::Fail {
        code: 255,
        stdout: String::new(),
        stderr: String::new(),
    });
    ws.projects.add_project("App.csproj").unwrap();
    let resolver = ws.resolver(Arc::new(RecordingReporter::new()));

    let err = resolver.resolve("", None).unwrap_err();
    assert!(matches!(secrets_error(&err), SecretsError::ProjectFailedToLoad { .. }));
}

#[test]
fn test_successful_build_without_id() {
    let ws = Workspace::new(MuxerBehavior::WriteNothing);
    let project = ws.projects.add_project("NoSecrets.fsproj").unwrap();
    let resolver = ws.resolver(Arc::new(RecordingReporter::new()));

    let err = resolver.resolve("", None).unwrap_err();
    assert!(matches!(
        secrets_error(&err),
        SecretsError::ProjectMissingId { project: p } if p == &project
    ));
    assert!(ws.scratch_is_empty());
}

#[test]
fn test_configuration_is_forwarded() {
    let ws = Workspace::new(MuxerBehavior::WriteId("abc".to_string()));
    ws.projects.add_project("App.csproj").unwrap();
    let resolver = ws.resolver(Arc::new(RecordingReporter::new()));

    resolver.resolve("", Some("Staging")).unwrap();
    resolver.resolve("", Some("")).unwrap();

    let invocations = ws.muxer.invocations().unwrap();
    assert!(invocations[0].contains(&"/p:Configuration=Staging".to_string()));
    assert!(invocations[1].contains(&"/p:Configuration=Debug".to_string()));
}

#[test]
fn test_both_hooks_point_at_the_same_targets_file() {
    let ws = Workspace::new(MuxerBehavior::WriteId("abc".to_string()));
    ws.projects.add_project("App.csproj").unwrap();
    let resolver = ws.resolver(Arc::new(RecordingReporter::new()));
    resolver.resolve("", None).unwrap();

    let targets = resolver.targets_file().unwrap().display().to_string();
    let args = ws.muxer.invocations().unwrap().remove(0);
    assert!(args.contains(&format!("/p:CustomAfterMicrosoftCommonTargets={targets}")));
    assert!(args.contains(&format!("/p:CustomAfterMicrosoftCommonCrossTargetingTargets={targets}")));
}

#[test]
fn test_concurrent_resolutions_are_independent() {
    let ws = Workspace::new(MuxerBehavior::EchoProjectName);
    let names = ["Alpha", "Bravo", "Charlie", "Delta", "Echo", "Foxtrot"];
    for name in names {
        ws.projects.add_project(format!("{name}/{name}.csproj")).unwrap();
    }
    let resolver = Arc::new(ws.resolver(Arc::new(RecordingReporter::new())));

    let handles: Vec<_> = names
        .iter()
        .map(|name| {
            let resolver = Arc::clone(&resolver);
            let name = (*name).to_string();
            thread::spawn(move || (name.clone(), resolver.resolve(&name, None)))
        })
        .collect();

    for handle in handles {
        let (name, result) = handle.join().unwrap();
        assert_eq!(result.unwrap(), name);
    }

    let mut paths = ws.muxer.metadata_paths().unwrap();
    assert_eq!(paths.len(), names.len());
    paths.sort();
    paths.dedup();
    assert_eq!(paths.len(), names.len());
    assert!(ws.scratch_is_empty());
}
