//! Root-relative path composition.
//!
//! Remote keys are opaque: `root` and the relative path are joined with a
//! single `/` and nothing else is touched. Local paths hit the real
//! filesystem, so they are lexically cleaned and the relative part can never
//! climb above `root`.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// Compose the key sent to a remote backend: `root + "/" + path`.
///
/// An empty `path` composes to `root` itself. The filesystem root `/` is
/// the only root whose separator is not doubled, so it yields `/path`;
/// every other root is used verbatim, trailing `/` included.
pub fn remote_key(root: &str, path: &str) -> String {
    if path.is_empty() {
        root.to_string()
    } else if root == "/" {
        format!("/{path}")
    } else {
        format!("{root}/{path}")
    }
}

/// Compose the local filesystem path for `path` under `root`.
///
/// `..` segments in `path` are resolved as if `path` were rooted, so
/// `local_path("/data", "../../etc/passwd")` is `/data/etc/passwd`.
/// Symlinks are not resolved, so a symlink inside `root` that points
/// outside it is followed by the filesystem and escape through it is not
/// guarded.
pub fn local_path(root: &str, path: &str) -> PathBuf {
    let mut segments: Vec<&OsStr> = Vec::new();
    for component in Path::new(path).components() {
        match component {
            Component::Normal(seg) => segments.push(seg),
            Component::ParentDir => {
                segments.pop();
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }

    let mut out = clean(Path::new(root));
    if out.as_os_str().is_empty() && segments.is_empty() {
        return PathBuf::from(".");
    }
    out.extend(segments);
    out
}

/// Lexically normalize a path: drop `.`, collapse separators, and resolve
/// `..` against preceding segments.
fn clean(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `/..` is `/`.
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out.iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn remote_key_joins_with_slash() {
        assert_eq!(remote_key("bucket/prefix", "a/b.txt"), "bucket/prefix/a/b.txt");
    }

    #[test]
    fn remote_key_does_not_normalize() {
        assert_eq!(remote_key("bucket", "a/../b"), "bucket/a/../b");
        assert_eq!(remote_key("bucket", "./a"), "bucket/./a");
    }

    #[test]
    fn remote_key_empty_path_is_root() {
        assert_eq!(remote_key("bucket/prefix", ""), "bucket/prefix");
    }

    #[test]
    fn remote_key_filesystem_root() {
        assert_eq!(remote_key("/", "x"), "/x");
    }

    #[test]
    fn remote_key_keeps_trailing_slash_root() {
        assert_eq!(remote_key("bucket/prefix/", "a"), "bucket/prefix//a");
        assert_eq!(remote_key("//", "a"), "///a");
    }

    #[test]
    fn local_path_joins_and_cleans() {
        assert_eq!(local_path("/tmp/ccstore", "a/b.txt"), PathBuf::from("/tmp/ccstore/a/b.txt"));
        assert_eq!(local_path("/tmp//ccstore/", "./a//b.txt"), PathBuf::from("/tmp/ccstore/a/b.txt"));
        assert_eq!(local_path("/tmp/x/../ccstore", "a"), PathBuf::from("/tmp/ccstore/a"));
    }

    #[test]
    fn local_path_cannot_escape_root() {
        assert_eq!(local_path("/data", "../../etc/passwd"), PathBuf::from("/data/etc/passwd"));
        assert_eq!(local_path("/data", "a/../../b"), PathBuf::from("/data/b"));
        assert_eq!(local_path("/data", "/etc/passwd"), PathBuf::from("/data/etc/passwd"));
    }

    #[test]
    fn local_path_empty_is_root() {
        assert_eq!(local_path("/data", ""), PathBuf::from("/data"));
        assert_eq!(local_path("/", ""), PathBuf::from("/"));
        assert_eq!(local_path("", ""), PathBuf::from("."));
    }

    #[test]
    fn local_path_relative_root() {
        assert_eq!(local_path("store", "a"), PathBuf::from("store/a"));
        assert_eq!(local_path("../store", "a"), PathBuf::from("../store/a"));
    }

    proptest! {
        #[test]
        fn remote_key_is_root_slash_path(
            root in "[a-z]{1,8}(/[a-z0-9]{1,8}){0,3}/?",
            path in "[a-z0-9._-]{1,8}(/[a-z0-9._-]{1,8}){0,3}",
        ) {
            prop_assert_eq!(remote_key(&root, &path), format!("{root}/{path}"));
        }

        #[test]
        fn local_path_stays_under_root(path in "(\\.\\.|[a-z]{1,4}|\\.)(/(\\.\\.|[a-z]{1,4}|\\.)){0,6}") {
            prop_assert!(local_path("/data", &path).starts_with("/data"));
        }
    }
}
