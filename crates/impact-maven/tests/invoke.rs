use impact_maven::invoke::{TreeInvocation, TREE_ARGS};

#[test]
fn test_missing_launcher_is_tree_build_error() {
    let tmp = tempfile::TempDir::new().unwrap();
    let err = TreeInvocation::new(tmp.path())
        .program("nonexistent_mvn_xyz_123")
        .run()
        .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("Failed to build the dependency tree"), "{msg}");
    assert!(msg.contains("nonexistent_mvn_xyz_123"), "{msg}");
}

#[cfg(unix)]
#[test]
fn test_tree_arguments_are_passed() {
    let tmp = tempfile::TempDir::new().unwrap();
    let stdout = TreeInvocation::new(tmp.path())
        .program("echo")
        .arg("-q")
        .run()
        .unwrap();
    assert_eq!(stdout.trim(), format!("{} -q", TREE_ARGS.join(" ")));
}

#[cfg(unix)]
#[test]
fn test_nonzero_exit_is_tree_build_error() {
    let tmp = tempfile::TempDir::new().unwrap();
    let err = TreeInvocation::new(tmp.path())
        .program("false")
        .run()
        .unwrap_err();
    assert!(err.to_string().contains("exited with"));
}
