//! Property tests for entry file lookup.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use proptest::prelude::*;

use appbuild::domain::ports::EntryRequest;
use appbuild::domain::services::entry_resolver::resolve_entry_with;
use appbuild::domain::services::entry_candidates;
use appbuild::BuildError;

const CANDIDATES: [&str; 4] = ["main.ts", "main.js", "index.ts", "index.js"];

fn other_file() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z]{1,8}\\.(ts|js|tsx|json)")
        .unwrap()
        .prop_filter("not a conventional entry", |name| {
            !CANDIDATES.contains(&name.as_str())
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the first existing conventional name wins, whatever else is present.
    #[test]
    fn property_first_candidate_wins(
        present in proptest::collection::vec(any::<bool>(), 4),
        noise in proptest::collection::vec(other_file(), 0..6),
    ) {
        let dir = PathBuf::from("/project/src");
        let mut files: HashSet<PathBuf> = noise.iter().map(|name| dir.join(name)).collect();
        for (name, exists) in CANDIDATES.iter().zip(&present) {
            if *exists {
                files.insert(dir.join(name));
            }
        }

        let request = EntryRequest::new(&dir);
        let resolved = resolve_entry_with(&request, |path: &Path| files.contains(path));

        match present.iter().position(|exists| *exists) {
            Some(first) => prop_assert_eq!(resolved.unwrap(), dir.join(CANDIDATES[first])),
            None => {
                let is_not_found = matches!(resolved, Err(BuildError::EntryNotFound { .. }));
                prop_assert!(is_not_found);
            }
        }
    }

    /// PROPERTY: an explicit index is used verbatim and never falls back to conventions.
    #[test]
    fn property_explicit_index_never_falls_back(
        index in other_file(),
        index_exists in any::<bool>(),
    ) {
        let dir = PathBuf::from("/project/src");
        let mut files: HashSet<PathBuf> =
            CANDIDATES.iter().map(|name| dir.join(name)).collect();
        if index_exists {
            files.insert(dir.join(&index));
        }

        let request = EntryRequest::new(&dir).with_index(Some(index.clone()));
        let resolved = resolve_entry_with(&request, |path: &Path| files.contains(path));

        if index_exists {
            prop_assert_eq!(resolved.unwrap(), dir.join(&index));
        } else {
            prop_assert!(resolved.is_err());
        }
    }
}

#[test]
fn candidates_follow_name_then_extension_order() {
    let names: Vec<PathBuf> = entry_candidates(Path::new("src"));
    let expected: Vec<PathBuf> = CANDIDATES.iter().map(|n| Path::new("src").join(n)).collect();
    assert_eq!(names, expected);
}
