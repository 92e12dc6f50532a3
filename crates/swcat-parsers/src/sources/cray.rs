//! Delta (NCSA): Cray programming environment naming.

use super::RecordParser;
use swcat_core::ParseOutcome;

/// `craype-*` families whose suffix is really a version or target, longest first.
const CRAYPE_FAMILIES: &[&str] = &["craype-x86", "craype-accel", "craype"];

#[derive(Debug, Clone, Copy)]
pub struct Delta;

impl RecordParser for Delta {
    fn source(&self) -> &'static str {
        "delta"
    }

    fn rewrite(&self, mut name: String, mut version: String) -> ParseOutcome {
        if version.is_empty() {
            // craype-x86-milan → (craype-x86, milan)
            let split = CRAYPE_FAMILIES.iter().find_map(|family| {
                name.strip_prefix(family).map(|rest| {
                    let target = rest.strip_prefix('-').unwrap_or(rest);
                    (family.to_string(), target.to_string())
                })
            });
            if let Some((family, target)) = split {
                name = family;
                version = target;
            }
        } else if name.contains("cray") {
            if let Some(rest) = name.strip_prefix("cray-") {
                name = rest.to_string();
            } else if let Some(rest) = name.strip_suffix("-cray") {
                name = rest.to_string();
            }
        }
        ParseOutcome::from_pair(name, version)
    }
}
