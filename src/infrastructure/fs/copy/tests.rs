use super::*;
use std::fs;
use tempfile::tempdir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn upper(_path: &Path, contents: Vec<u8>) -> Vec<u8> {
    contents.to_ascii_uppercase()
}

#[tokio::test]
async fn copies_nested_tree_and_creates_directories() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    let dst = dir.path().join("out");
    write(&src, "config.json", "{}");
    write(&src, "img/logo.svg", "<svg/>");
    write(&src, "img/icons/a.svg", "<a/>");

    let report = copy_tree(&src, &dst, &CopyOptions::default()).await.unwrap();

    assert_eq!(report.files_copied, 3);
    assert_eq!(report.directories_created, 3);
    assert!(report.skipped.is_empty());
    assert_eq!(fs::read_to_string(dst.join("img/icons/a.svg")).unwrap(), "<a/>");
}

#[tokio::test]
async fn existing_destination_files_are_overwritten() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    let dst = dir.path().join("out");
    write(&src, "config.json", "new");
    write(&dst, "config.json", "old");
    write(&dst, "keep.txt", "untouched");

    copy_tree(&src, &dst, &CopyOptions::default()).await.unwrap();

    assert_eq!(fs::read_to_string(dst.join("config.json")).unwrap(), "new");
    assert_eq!(fs::read_to_string(dst.join("keep.txt")).unwrap(), "untouched");
}

#[tokio::test]
async fn transform_is_applied_to_every_file() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    let dst = dir.path().join("out");
    write(&src, "a.txt", "abc");
    write(&src, "nested/b.txt", "def");

    let options = CopyOptions::default().with_transform(upper);
    copy_tree(&src, &dst, &options).await.unwrap();

    assert_eq!(fs::read_to_string(dst.join("a.txt")).unwrap(), "ABC");
    assert_eq!(fs::read_to_string(dst.join("nested/b.txt")).unwrap(), "DEF");
}

#[cfg(unix)]
#[tokio::test]
async fn best_effort_skips_unreadable_files() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    let dst = dir.path().join("out");
    write(&src, "good.txt", "ok");
    std::os::unix::fs::symlink(dir.path().join("missing"), src.join("dangling.txt")).unwrap();

    let report = copy_tree(&src, &dst, &CopyOptions::new(CopyPolicy::BestEffort))
        .await
        .unwrap();

    assert_eq!(report.files_copied, 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].path, src.join("dangling.txt"));
    assert!(dst.join("good.txt").exists());
    assert!(!dst.join("dangling.txt").exists());
}

#[cfg(unix)]
#[tokio::test]
async fn fail_fast_aborts_on_unreadable_file() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    let dst = dir.path().join("out");
    write(&src, "good.txt", "ok");
    std::os::unix::fs::symlink(dir.path().join("missing"), src.join("dangling.txt")).unwrap();

    let err = copy_tree(&src, &dst, &CopyOptions::new(CopyPolicy::FailFast))
        .await
        .unwrap_err();

    assert!(matches!(err, BuildError::AssetMergeFailure { .. }));
}

#[tokio::test]
async fn missing_source_is_skipped_under_best_effort() {
    let dir = tempdir().unwrap();
    let report = copy_tree(
        &dir.path().join("nope"),
        &dir.path().join("out"),
        &CopyOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(report.files_copied, 0);
    assert_eq!(report.skipped.len(), 1);
}

#[cfg(unix)]
#[tokio::test]
async fn directory_link_to_ancestor_is_not_followed() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    let dst = dir.path().join("out");
    write(&src, "a.txt", "a");
    write(&src, "nested/b.txt", "b");
    std::os::unix::fs::symlink(&src, src.join("nested/up")).unwrap();

    let report = copy_tree(&src, &dst, &CopyOptions::new(CopyPolicy::BestEffort))
        .await
        .unwrap();

    assert_eq!(report.files_copied, 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].path, src.join("nested/up"));
    assert!(!dst.join("nested/up").exists());
}

#[cfg(unix)]
#[tokio::test]
async fn directory_link_outside_tree_is_copied() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    let shared = dir.path().join("shared");
    let dst = dir.path().join("out");
    write(&shared, "icons/x.svg", "<x/>");
    fs::create_dir_all(&src).unwrap();
    std::os::unix::fs::symlink(&shared, src.join("shared")).unwrap();

    let report = copy_tree(&src, &dst, &CopyOptions::default()).await.unwrap();

    assert!(report.skipped.is_empty());
    assert_eq!(fs::read_to_string(dst.join("shared/icons/x.svg")).unwrap(), "<x/>");
}

#[cfg(unix)]
#[tokio::test]
async fn fail_fast_aborts_on_directory_loop() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    write(&src, "a.txt", "a");
    std::os::unix::fs::symlink(dir.path(), src.join("root")).unwrap();

    let err = copy_tree(
        &src,
        &dir.path().join("out"),
        &CopyOptions::new(CopyPolicy::FailFast),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, BuildError::AssetMergeFailure { .. }));
}
