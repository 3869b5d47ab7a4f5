//! Property tests for layered asset merging.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use proptest::prelude::*;
use tempfile::tempdir;

use appbuild::application::AssetMerger;
use appbuild::domain::value_objects::CopyPolicy;
use appbuild::MergePlan;

/// Relative file path -> contents. Directories never carry an extension and
/// files always do, so no path is both a file and a directory.
fn layer() -> impl Strategy<Value = BTreeMap<String, String>> {
    let dir = proptest::string::string_regex("[a-c]{1,2}").unwrap();
    let file = proptest::string::string_regex("[a-d]{1,2}\\.txt").unwrap();
    let path = (proptest::collection::vec(dir, 0..3), file)
        .prop_map(|(dirs, file)| {
            let mut parts = dirs;
            parts.push(file);
            parts.join("/")
        });
    proptest::collection::btree_map(path, "[a-z]{0,8}", 0..8)
}

fn write_layer(root: &Path, files: &BTreeMap<String, String>) {
    fs::create_dir_all(root).unwrap();
    for (rel, contents) in files {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }
}

fn snapshot(root: &Path) -> BTreeMap<String, String> {
    let mut files = BTreeMap::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        if !dir.exists() {
            continue;
        }
        for entry in fs::read_dir(&dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                pending.push(path);
            } else {
                let rel = path.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/");
                files.insert(rel, fs::read_to_string(&path).unwrap());
            }
        }
    }
    files
}

fn merge(assets: &Path, out: &Path) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    runtime
        .block_on(
            AssetMerger::new(CopyPolicy::FailFast)
                .merge(&MergePlan::for_environment(assets, "production"), out),
        )
        .unwrap();
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 32,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the output equals common overlaid by the environment layer,
    /// and merging again changes nothing.
    #[test]
    fn property_merge_is_overlay_and_idempotent(
        common in layer(),
        production in layer(),
    ) {
        let dir = tempdir().unwrap();
        let assets = dir.path().join("assets");
        write_layer(&assets.join("common"), &common);
        write_layer(&assets.join("production"), &production);
        let out = dir.path().join("dist");

        merge(&assets, &out);
        let first = snapshot(&out);

        let mut expected = common.clone();
        expected.extend(production.clone());
        prop_assert_eq!(&first, &expected);

        merge(&assets, &out);
        prop_assert_eq!(snapshot(&out), first);
    }
}
