//! Checks that `tests/unit` mirrors `src` and that every test file holds tests

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    const SRC_DIR: &str = "src";
    const UNIT_DIR: &str = "tests/unit";

    // Crate roots and module declaration files carry no logic of their own
    fn is_organizational(relative: &str) -> bool {
        relative == "main.rs" || relative == "lib.rs" || relative.ends_with("mod.rs")
    }

    fn relative_paths(root: &str) -> BTreeSet<String> {
        let root = Path::new(root);
        let mut paths = BTreeSet::new();
        if let Err(error) = walk(root, root, &mut paths) {
            assert!(
                !root.exists(),
                "Failed to read {}: {error}",
                root.display()
            );
        }
        paths
    }

    fn walk(dir: &Path, base: &Path, paths: &mut BTreeSet<String>) -> Result<(), io::Error> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let relative = path
                .strip_prefix(base)
                .map_err(|_| io::Error::other("Failed to strip prefix"))?
                .to_string_lossy()
                .replace('\\', "/");

            if path.is_dir() {
                paths.insert(relative);
                walk(&path, base, paths)?;
            } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                paths.insert(relative);
            }
        }
        Ok(())
    }

    // Tests every source file has a unit test file at the mirrored path
    // Verified by adding a source file without a test counterpart
    #[test]
    fn test_all_src_files_have_unit_tests() {
        let src = relative_paths(SRC_DIR);
        let unit = relative_paths(UNIT_DIR);

        let missing: Vec<String> = src
            .iter()
            .filter(|path| !is_organizational(path) && !unit.contains(*path))
            .map(|path| format!("  - src/{path} -> tests/unit/{path}"))
            .collect();

        assert!(
            missing.is_empty(),
            "Source files without unit tests:\n{}",
            missing.join("\n")
        );
    }

    // Tests every unit test file corresponds to a source file
    // Verified by renaming a source module without moving its tests
    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let src = relative_paths(SRC_DIR);
        let unit = relative_paths(UNIT_DIR);

        let orphaned: Vec<String> = unit
            .iter()
            .filter(|path| !is_organizational(path) && !src.contains(*path))
            .map(|path| format!("  - tests/unit/{path} -> src/{path} (missing)"))
            .collect();

        assert!(
            orphaned.is_empty(),
            "Unit test files without source files:\n{}",
            orphaned.join("\n")
        );
    }

    // Tests every non-organizational test file defines at least one test
    // Verified by deleting the tests from one unit file
    #[test]
    fn test_all_test_files_contain_tests() {
        let mut empty = Vec::new();

        for relative in relative_paths("tests") {
            let file_name = relative.rsplit('/').next().unwrap_or(&relative);
            if !relative.ends_with(".rs") || file_name == "main.rs" || file_name == "mod.rs" {
                continue;
            }

            let path = Path::new("tests").join(&relative);
            let content = fs::read_to_string(&path).unwrap_or_default();
            if !content.contains("#[test]") {
                empty.push(format!("  - {}", path.display()));
            }
        }

        assert!(
            empty.is_empty(),
            "Test files without any #[test] functions:\n{}",
            empty.join("\n")
        );
    }
}
