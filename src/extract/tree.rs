use crate::source::RawTreeEntry;

const CONVENTIONAL_DIRS: [&str; 12] = [
    "src", "lib", "tests", "test", "docs", "config", "scripts", "examples", "public", "assets",
    "cmd", "pkg",
];
const TEST_DIRS: [&str; 5] = ["test", "tests", "__tests__", "spec", "specs"];
const CI_FILES: [&str; 5] = [
    ".gitlab-ci.yml",
    ".travis.yml",
    "Jenkinsfile",
    "azure-pipelines.yml",
    "bitbucket-pipelines.yml",
];
const CI_DIRS: [&str; 2] = [".github/workflows/", ".circleci/"];
// Lint, format and build manifests, matched on lowercased top-level names.
const TOOLING_FILES: [&str; 18] = [
    "package.json",
    "tsconfig.json",
    "pyproject.toml",
    "requirements.txt",
    "setup.py",
    "setup.cfg",
    "pytest.ini",
    "cargo.toml",
    "rustfmt.toml",
    ".rustfmt.toml",
    "clippy.toml",
    "go.mod",
    "pom.xml",
    "build.gradle",
    "gemfile",
    "composer.json",
    ".editorconfig",
    ".golangci.yml",
];
const TOOLING_PREFIXES: [&str; 5] = [".eslintrc", ".prettierrc", ".pylintrc", ".flake8", ".rubocop"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeSignals {
    pub file_count: u64,
    pub has_readme: bool,
    pub readme_bytes: u64,
    pub has_license: bool,
    pub has_contributing: bool,
    pub has_tests: bool,
    pub has_ci: bool,
    pub has_gitignore: bool,
    pub has_tooling_config: bool,
    pub conventional_dirs: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    File,
    Dir,
    Other,
}

fn entry_kind(entry: &RawTreeEntry) -> EntryKind {
    match entry.kind.as_deref() {
        Some("tree") | Some("dir") => EntryKind::Dir,
        Some("commit") | Some("submodule") | Some("symlink") => EntryKind::Other,
        _ => EntryKind::File,
    }
}

pub fn classify_tree(entries: &[RawTreeEntry]) -> TreeSignals {
    let mut signals = TreeSignals::default();
    let mut seen_dirs: Vec<String> = Vec::new();

    for entry in entries {
        let Some(path) = entry
            .path
            .as_deref()
            .map(|path| path.trim_matches('/'))
            .filter(|path| !path.is_empty())
        else {
            continue;
        };
        let kind = entry_kind(entry);
        let top_level = !path.contains('/');

        // blobs nested under a directory imply the directory even when the
        // source omits tree entries
        let top_dir = match (kind, path.split_once('/')) {
            (_, Some((first, _))) => Some(first),
            (EntryKind::Dir, None) => Some(path),
            _ => None,
        };
        if let Some(dir) = top_dir {
            let dir = dir.to_ascii_lowercase();
            if CONVENTIONAL_DIRS.contains(&dir.as_str()) && !seen_dirs.contains(&dir) {
                seen_dirs.push(dir);
            }
        }

        if kind != EntryKind::File {
            continue;
        }
        signals.file_count += 1;

        let name = path.rsplit('/').next().unwrap_or(path);
        let lower = name.to_ascii_lowercase();
        let size = entry.size.unwrap_or(0).max(0) as u64;

        if top_level && lower.starts_with("readme") && !signals.has_readme {
            signals.has_readme = true;
            signals.readme_bytes = size;
        }
        if top_level
            && (lower.starts_with("license")
                || lower.starts_with("licence")
                || lower.starts_with("copying"))
        {
            signals.has_license = true;
        }
        if top_level && lower == ".gitignore" {
            signals.has_gitignore = true;
        }
        if top_level && is_tooling_config(&lower) {
            signals.has_tooling_config = true;
        }
        if lower.starts_with("contributing") && is_contributing_location(path) {
            signals.has_contributing = true;
        }
        if is_test_path(path) {
            signals.has_tests = true;
        }
        if is_ci_path(path) {
            signals.has_ci = true;
        }
    }

    signals.conventional_dirs = seen_dirs.len() as u32;
    signals
}

fn is_contributing_location(path: &str) -> bool {
    match path.rsplit_once('/') {
        None => true,
        Some((parent, _)) => {
            let parent = parent.to_ascii_lowercase();
            parent == ".github" || parent == "docs"
        }
    }
}

fn is_tooling_config(lower_name: &str) -> bool {
    TOOLING_FILES.contains(&lower_name)
        || TOOLING_PREFIXES
            .iter()
            .any(|prefix| lower_name.starts_with(prefix))
}

pub(crate) fn is_test_path(path: &str) -> bool {
    let mut components = path.split('/').peekable();
    while let Some(component) = components.next() {
        let lower = component.to_ascii_lowercase();
        if components.peek().is_some() {
            if TEST_DIRS.contains(&lower.as_str()) {
                return true;
            }
            continue;
        }
        let stem = lower.split('.').next().unwrap_or_default();
        return lower.starts_with("test_")
            || stem.ends_with("_test")
            || stem.ends_with("_spec")
            || lower.contains(".test.")
            || lower.contains(".spec.");
    }
    false
}

pub(crate) fn is_ci_path(path: &str) -> bool {
    CI_FILES.contains(&path) || CI_DIRS.iter().any(|dir| path.starts_with(dir))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob(path: &str, size: i64) -> RawTreeEntry {
        RawTreeEntry {
            path: Some(path.to_string()),
            kind: Some("blob".to_string()),
            size: Some(size),
        }
    }

    fn dir(path: &str) -> RawTreeEntry {
        RawTreeEntry {
            path: Some(path.to_string()),
            kind: Some("tree".to_string()),
            size: None,
        }
    }

    #[test]
    fn classify_tree_picks_up_documentation_files() {
        let signals = classify_tree(&[
            blob("README.md", 2400),
            blob("LICENSE", 1000),
            blob(".github/CONTRIBUTING.md", 300),
            blob("docs/README.md", 50),
        ]);
        assert!(signals.has_readme);
        assert_eq!(signals.readme_bytes, 2400);
        assert!(signals.has_license);
        assert!(signals.has_contributing);
        assert_eq!(signals.file_count, 4);
    }

    #[test]
    fn nested_readme_and_license_do_not_count() {
        let signals = classify_tree(&[blob("docs/README.md", 50), blob("vendor/x/LICENSE", 10)]);
        assert!(!signals.has_readme);
        assert!(!signals.has_license);
        assert!(!signals.has_contributing);
    }

    #[test]
    fn directories_and_submodules_are_not_files() {
        let signals = classify_tree(&[
            dir("src"),
            dir("tests"),
            blob("src/main.rs", 10),
            RawTreeEntry {
                path: Some("vendor/lib".to_string()),
                kind: Some("commit".to_string()),
                size: None,
            },
            RawTreeEntry::default(),
        ]);
        assert_eq!(signals.file_count, 1);
        assert_eq!(signals.conventional_dirs, 2);
    }

    #[test]
    fn conventional_dirs_are_inferred_from_nested_paths() {
        let signals = classify_tree(&[
            blob("src/lib.rs", 1),
            blob("docs/guide.md", 1),
            blob("docs/api.md", 1),
            blob("misc/notes.txt", 1),
        ]);
        assert_eq!(signals.conventional_dirs, 2);
    }

    #[test]
    fn test_paths_are_detected() {
        for path in [
            "tests/integration.rs",
            "pkg/server/server_test.go",
            "src/__tests__/App.jsx",
            "test_utils.py",
            "web/button.test.tsx",
            "spec/models/user_spec.rb",
            "lib/parser.spec.js",
        ] {
            assert!(is_test_path(path), "{path} should be a test path");
        }
        for path in ["src/contest.rs", "latest/notes.md", "src/testing.rs", "tests"] {
            assert!(!is_test_path(path), "{path} should not be a test path");
        }
    }

    #[test]
    fn ci_paths_are_detected() {
        assert!(is_ci_path(".github/workflows/ci.yml"));
        assert!(is_ci_path(".gitlab-ci.yml"));
        assert!(is_ci_path(".circleci/config.yml"));
        assert!(!is_ci_path(".github/ISSUE_TEMPLATE/bug.md"));
        assert!(!is_ci_path("docs/.travis.yml"));
    }

    #[test]
    fn gitignore_and_tooling_config_are_top_level_only() {
        let signals = classify_tree(&[
            blob(".gitignore", 40),
            blob(".eslintrc.json", 200),
            blob("README.md", 900),
        ]);
        assert!(signals.has_gitignore);
        assert!(signals.has_tooling_config);

        let nested = classify_tree(&[
            blob("web/.gitignore", 40),
            blob("web/package.json", 200),
            blob("src/main.rs", 10),
        ]);
        assert!(!nested.has_gitignore);
        assert!(!nested.has_tooling_config);
    }

    #[test]
    fn build_manifests_count_as_tooling() {
        for name in ["Cargo.toml", "pyproject.toml", "requirements.txt", "tsconfig.json", ".prettierrc"] {
            let signals = classify_tree(&[blob(name, 10)]);
            assert!(signals.has_tooling_config, "{name} should count as tooling");
        }
        assert!(!classify_tree(&[blob("notes.toml", 10)]).has_tooling_config);
    }
}
