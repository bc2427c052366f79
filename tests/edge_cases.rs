//! Edge case and error handling tests for heft


use harness::{TestTree, run_heft};
use std::fs;

// ============================================================================
// Symlink Edge Cases
// ============================================================================

#[test]
#[cfg(unix)]
fn test_symlink_to_file_is_not_counted() {
    use std::os::unix::fs::symlink;

    let tree = TestTree::new();
    tree.add_file("target.bin", 4096);
    symlink(tree.path().join("target.bin"), tree.path().join("link.bin"))
        .expect("Failed to create symlink");

    let (stdout, _stderr, success) = run_heft(&tree, &["-n", "0"]);
    assert!(success, "heft should succeed with symlink");
    assert!(stdout.contains("target.bin"), "should show target file");
    assert!(!stdout.contains("link.bin"), "symlink must be skipped");
    // The link's bytes must not be double counted
    assert!(stdout.contains("4 KB of 4 KB shown"), "{}", stdout);
}

#[test]
#[cfg(unix)]
fn test_symlink_to_parent_no_infinite_loop() {
    use std::os::unix::fs::symlink;

    let tree = TestTree::new();
    tree.add_file("subdir/file.bin", 1024);

    // Create symlink from subdir/parent -> .. (potential infinite loop)
    symlink("..", tree.path().join("subdir").join("parent"))
        .expect("Failed to create parent symlink");

    let (stdout, _stderr, success) = run_heft(&tree, &["-L", "3", "-n", "0"]);
    assert!(success, "heft should not hang on parent symlink");
    assert!(stdout.contains("subdir"), "should show subdir");
    assert!(!stdout.contains("parent"), "symlink must be skipped");
}

#[test]
#[cfg(unix)]
fn test_broken_symlink() {
    use std::os::unix::fs::symlink;

    let tree = TestTree::new();
    tree.add_file("real.bin", 1024);
    symlink("nonexistent.bin", tree.path().join("broken.bin"))
        .expect("Failed to create broken symlink");

    let (stdout, _stderr, success) = run_heft(&tree, &["-n", "0"]);
    assert!(success, "heft should handle broken symlinks");
    assert!(stdout.contains("real.bin"), "should show real file");
    assert!(!stdout.contains("broken.bin"));
}

#[test]
#[cfg(unix)]
fn test_self_referential_symlink() {
    use std::os::unix::fs::symlink;

    let tree = TestTree::new();
    tree.add_file("file.bin", 1024);
    symlink("selfref", tree.path().join("selfref"))
        .expect("Failed to create self-referential symlink");

    let (stdout, _stderr, success) = run_heft(&tree, &["-n", "0"]);
    assert!(success, "heft should handle self-referential symlinks");
    assert!(stdout.contains("file.bin"), "should show regular file");
}

// ============================================================================
// Permission Error Handling
// ============================================================================

#[test]
#[cfg(unix)]
fn test_unreadable_directory_is_dropped_with_warning() {
    use std::os::unix::fs::PermissionsExt;

    let tree = TestTree::new();
    tree.add_file("readable/file.bin", 2048);

    let unreadable = tree.add_dir("unreadable");
    fs::write(unreadable.join("hidden.bin"), vec![b'x'; 4096]).expect("Failed to write file");

    let mut perms = fs::metadata(&unreadable).unwrap().permissions();
    perms.set_mode(0o000);
    fs::set_permissions(&unreadable, perms).expect("Failed to set permissions");

    let (stdout, stderr, success) = run_heft(&tree, &["-n", "0"]);

    // Restore permissions for cleanup
    let mut perms = fs::metadata(&unreadable).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&unreadable, perms).expect("Failed to restore permissions");

    assert!(success, "heft should handle unreadable directories gracefully");
    assert!(stdout.contains("readable"), "should show readable directory");
    assert!(!stdout.contains("unreadable/"), "dropped entry: {}", stdout);
    assert!(
        stderr.contains("skipped 1 unreadable"),
        "should warn about the dropped entry: {}",
        stderr
    );
    // Unreachable bytes are not counted
    assert!(stdout.contains("2 KB of 2 KB shown"), "{}", stdout);
}

// ============================================================================
// Special Filenames
// ============================================================================

#[test]
fn test_filename_with_spaces() {
    let tree = TestTree::new();
    tree.add_file("file with spaces.bin", 1024);
    tree.add_file("dir with spaces/nested.bin", 1024);

    let (stdout, _stderr, success) = run_heft(&tree, &["-n", "0"]);
    assert!(success, "heft should handle spaces in filenames");
    assert!(
        stdout.contains("file with spaces.bin"),
        "should show file with spaces: {}",
        stdout
    );
    assert!(stdout.contains("dir with spaces"), "should show dir with spaces");
}

#[test]
fn test_filename_with_unicode() {
    let tree = TestTree::new();
    tree.add_file("日本語.bin", 1024);
    tree.add_file("中文目录/文件.bin", 1024);

    let (stdout, _stderr, success) = run_heft(&tree, &["-n", "0"]);
    assert!(success, "heft should handle unicode filenames");
    assert!(stdout.contains("日本語.bin"), "should show Japanese filename");
    assert!(stdout.contains("中文目录"), "should show Chinese directory");
}

// ============================================================================
// Degenerate Trees
// ============================================================================

#[test]
fn test_empty_directory() {
    let tree = TestTree::new();

    let (stdout, _stderr, success) = run_heft(&tree, &[]);
    assert!(success, "heft should handle an empty directory");
    assert!(
        stdout.contains("0 KB of 0 KB shown"),
        "empty totals: {}",
        stdout
    );
}

#[test]
fn test_deeply_nested_tree_respects_level() {
    let tree = TestTree::new();
    tree.add_file("a/b/c/d/e/deep.bin", 1024);

    let (stdout, _stderr, success) = run_heft(&tree, &["-L", "2", "-n", "0"]);
    assert!(success);
    assert!(stdout.contains("a/b"), "level 2 reaches b: {}", stdout);
    assert!(!stdout.contains("deep.bin"), "level 2 stops above deep.bin");
}

// ============================================================================
// Cache Corruption
// ============================================================================

#[test]
fn test_corrupted_cache_lines_are_skipped_with_warning() {
    use std::io::Write;

    let tree = TestTree::new();
    tree.add_file("a.bin", 100 * 1024);

    let (_stdout, _stderr, success) = run_heft(&tree, &[]);
    assert!(success);

    let cache_path = tree.cache_file().expect("cache file should exist");
    let mut file = fs::OpenOptions::new()
        .append(true)
        .open(&cache_path)
        .unwrap();
    writeln!(file, "not_a_number | True | /x").unwrap();
    writeln!(file, "complete garbage").unwrap();
    drop(file);

    let (stdout, stderr, success) = run_heft(&tree, &["-n", "0"]);
    assert!(success, "corrupt lines must not abort the load: {}", stderr);
    assert!(stdout.contains("a.bin"), "valid records still load: {}", stdout);
    assert!(
        stderr.contains("malformed cache line"),
        "should warn: {}",
        stderr
    );
}

#[test]
fn test_empty_cache_file_is_fatal() {
    let tree = TestTree::new();
    tree.add_file("a.bin", 1024);

    let (_stdout, _stderr, success) = run_heft(&tree, &[]);
    assert!(success);

    let cache_path = tree.cache_file().expect("cache file should exist");
    fs::write(&cache_path, "").unwrap();

    let (_stdout, stderr, success) = run_heft(&tree, &[]);
    assert!(!success, "an empty cache has no tree to offer");
    assert!(stderr.contains("no root found"), "stderr: {}", stderr);
}
