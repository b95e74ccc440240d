//! Tree and filesystem fixtures

use std::fs;

use tempfile::TempDir;
use workspace::FileTreeNode;

/// Project tree with `a.ts` at the root and `b.ts` under `sub/`
pub fn sample_tree() -> FileTreeNode {
    FileTreeNode::directory(
        "p1",
        "/",
        vec![
            FileTreeNode::file("a.ts", "/a.ts"),
            FileTreeNode::directory(
                "sub",
                "/sub",
                vec![FileTreeNode::file("b.ts", "/sub/b.ts")],
            ),
        ],
    )
}

/// Flat tree holding the given root-level files
pub fn flat_tree(files: &[&str]) -> FileTreeNode {
    FileTreeNode::directory(
        "root",
        "/",
        files
            .iter()
            .map(|name| FileTreeNode::file(*name, format!("/{}", name)))
            .collect(),
    )
}

/// On-disk project with a source file, a nested file and an ignored dir
pub fn project_dir() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::create_dir_all(dir.path().join("src/nested")).unwrap();
    fs::create_dir_all(dir.path().join("node_modules/pkg")).unwrap();
    fs::write(dir.path().join("README.md"), "# demo").unwrap();
    fs::write(dir.path().join("src/lib.rs"), "pub fn demo() {}").unwrap();
    fs::write(dir.path().join("src/nested/deep.rs"), "").unwrap();
    fs::write(dir.path().join("node_modules/pkg/index.js"), "").unwrap();
    dir
}
