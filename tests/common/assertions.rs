//! Domain-specific assertion macros for swcat harnesses.
//!
//! These wrap `pretty_assertions` and say which resource and software an
//! expectation was about when they fail.

/// Assert that `map[resource][name]` is exactly the given version set.
///
/// ```rust,ignore
/// assert_versions!(out, "kyric01", "oneapi", ["2023.1"]);
/// ```
#[macro_export]
macro_rules! assert_versions {
    ($map:expr, $resource:expr, $name:expr, [$($v:expr),* $(,)?]) => {{
        let map: &swcat_core::ResourceSoftwareMap = &$map;
        let resource: &str = $resource;
        let name: &str = $name;
        let expected: swcat_core::VersionSet = [$($v.to_string()),*].into_iter().collect();
        match map.get(resource).and_then(|software| software.get(name)) {
            Some(actual) => pretty_assertions::assert_eq!(
                actual, &expected,
                "versions of {:?} on {:?}", name, resource
            ),
            None => panic!(
                "assert_versions! failed: {:?} not found on {:?}.\n  Available: {:?}",
                name,
                resource,
                map.get(resource).map(|s| s.keys().collect::<Vec<_>>())
            ),
        }
    }};
}

/// Assert that `name` is absent from `map[resource]` (or the resource is).
#[macro_export]
macro_rules! assert_no_software {
    ($map:expr, $resource:expr, $name:expr) => {{
        let map: &swcat_core::ResourceSoftwareMap = &$map;
        let resource: &str = $resource;
        let name: &str = $name;
        if let Some(versions) = map.get(resource).and_then(|software| software.get(name)) {
            panic!(
                "assert_no_software! failed: {:?} present on {:?} with {:?}",
                name, resource, versions
            );
        }
    }};
}

/// Names of a block-path result, in result order.
pub fn entry_names(entries: &[swcat_core::SoftwareInfo]) -> Vec<&str> {
    entries.iter().map(|entry| entry.name.as_str()).collect()
}

/// The single entry called `name`, panicking with the available names if it
/// is missing or duplicated.
pub fn entry<'a>(entries: &'a [swcat_core::SoftwareInfo], name: &str) -> &'a swcat_core::SoftwareInfo {
    let matches: Vec<_> = entries.iter().filter(|e| e.name == name).collect();
    match matches.as_slice() {
        [one] => one,
        [] => panic!("no entry {name:?}; available: {:?}", entry_names(entries)),
        _ => panic!("entry {name:?} appears {} times", matches.len()),
    }
}
