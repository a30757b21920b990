use std::cmp::Ordering;

/// Orders fully-qualified names segment by segment.
///
/// At the first differing segment a name that ends there sorts before one that keeps going,
/// so `java.util.List` comes before `java.util.concurrent.Future`. Otherwise segments compare
/// lexicographically and a name that is a prefix of the other sorts first.
pub fn compare_imports(left: &str, right: &str) -> Ordering {
    let mut left_segments = left.split('.').peekable();
    let mut right_segments = right.split('.').peekable();
    loop {
        match (left_segments.next(), right_segments.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l == r => continue,
            (Some(l), Some(r)) => {
                let left_is_last = left_segments.peek().is_none();
                let right_is_last = right_segments.peek().is_none();
                return match (left_is_last, right_is_last) {
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                    _ => l.cmp(r),
                };
            }
        }
    }
}

/// Whether `import` is `package` itself or names a type that lives directly in it (not in a
/// sub-package).
pub fn is_same_package_member(import: &str, package: &str) -> bool {
    match import.strip_prefix(package) {
        Some("") => true,
        Some(rest) => rest
            .strip_prefix('.')
            .is_some_and(|member| !member.is_empty() && !member.contains('.')),
        None => false,
    }
}

/// Drops imports that are redundant in a file of `package`, deduplicates and sorts the rest.
pub fn organize_imports<I, S>(imports: I, package: Option<&str>) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = imports
        .into_iter()
        .map(|import| import.as_ref().trim().to_string())
        .filter(|import| !import.is_empty())
        .filter(|import| !package.is_some_and(|package| is_same_package_member(import, package)))
        .collect();
    out.sort_by(|a, b| compare_imports(a, b));
    out.dedup();
    out
}
