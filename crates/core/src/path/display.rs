use once_cell::sync::Lazy;
use regex::Regex;

static DRIVE_LETTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([a-zA-Z]):").expect("drive letter pattern is valid"));

/// Collapse `.`, `..` and repeated separators without touching the disk.
///
/// Input may use either separator; output always uses `/`.
pub fn normalize_lexically(path: &str) -> String {
    let path = path.replace('\\', "/");
    let absolute = path.starts_with('/');

    let mut parts: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => match parts.last() {
                Some(last) if *last != ".." && !is_drive(last, parts.len()) => {
                    parts.pop();
                }
                Some(last) if is_drive(last, parts.len()) => {}
                None if absolute => {}
                _ => parts.push(".."),
            },
            _ => parts.push(part),
        }
    }

    let joined = parts.join("/");
    match (absolute, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

fn is_drive(part: &str, depth: usize) -> bool {
    depth == 1 && part.len() == 2 && part.ends_with(':')
}

/// Format a path as `/C/some/path/no/colon.txt`, the form the host's
/// `open_file` command accepts on every platform.
pub fn to_open_file_path(path: &str) -> String {
    let normalized = normalize_lexically(path);
    DRIVE_LETTER.replace(&normalized, "/$1").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lexically() {
        assert_eq!(normalize_lexically("/a//b/./c/../d"), "/a/b/d");
        assert_eq!(normalize_lexically("a/../../b"), "../b");
        assert_eq!(normalize_lexically("/.."), "/");
        assert_eq!(normalize_lexically("./"), ".");
        assert_eq!(normalize_lexically(r"C:\x\..\y"), "C:/y");
        assert_eq!(normalize_lexically("C:/.."), "C:");
    }

    #[test]
    fn test_open_file_path_strips_drive_colon() {
        assert_eq!(
            to_open_file_path(r"C:\Users\me\Packages\User\foo.py"),
            "/C/Users/me/Packages/User/foo.py"
        );
        assert_eq!(
            to_open_file_path("/home/me/Packages/User/foo.py"),
            "/home/me/Packages/User/foo.py"
        );
    }
}
