//! Ookami (Stony Brook): hierarchical module paths.
//!
//! Module names arrive as slash-delimited trees (`nvidia/<toolchain>/...`,
//! `hdf5/parallel/<mpi>/<version>`, `<package>/<variant>`). The package name is
//! recovered by position, which depends on the tree and its depth; the rest of
//! the path is folded into the version.

use super::{slash_join, RecordParser};
use swcat_core::clean::{clean_name_version, EmbeddedVersion};
use swcat_core::ParseOutcome;

const HDF5_PARALLEL: &str = "hdf5/parallel";

#[derive(Debug, Clone, Copy)]
pub struct Ookami;

impl RecordParser for Ookami {
    fn source(&self) -> &'static str {
        "ookami"
    }

    fn rewrite(&self, name: String, version: String) -> ParseOutcome {
        let rewritten = if name.starts_with("nvidia") {
            Ok(nvidia(&name, &version))
        } else if name.starts_with(HDF5_PARALLEL) {
            hdf5_parallel(&name, &version)
        } else if let Some((package, variant)) = name.split_once('/') {
            Ok((package.to_string(), slash_join(&[variant, &version])))
        } else {
            Ok((name, version))
        };

        match rewritten {
            Ok((name, version)) => {
                let (name, version) = clean_name_version(&name, &version);
                ParseOutcome::from_pair(name, version)
            }
            Err(reason) => ParseOutcome::Failed(reason),
        }
    }
}

/// `nvidia` alone carries the package in the version (`nvhpc-23.1`);
/// `nvidia/.../<package>` names the package last and the toolchain second.
fn nvidia(name: &str, version: &str) -> (String, String) {
    let segments: Vec<&str> = name.split('/').collect();
    match segments.as_slice() {
        [_] => match EmbeddedVersion::Dash.split(version) {
            Some((package, release)) => (package.to_string(), release.to_string()),
            None => (name.to_string(), version.to_string()),
        },
        [_, package] => (package.to_string(), version.to_string()),
        [_, toolchain, .., package] => (package.to_string(), slash_join(&[version, toolchain])),
        [] => (name.to_string(), version.to_string()),
    }
}

/// Parallel HDF5 builds are filed under the MPI they were built against.
fn hdf5_parallel(name: &str, version: &str) -> Result<(String, String), String> {
    let full_version = slash_join(&[name, version]);

    if name.contains("openmpi") {
        return Ok(("openmpi".to_string(), full_version));
    }
    if !name.contains("mvapich2") {
        return Ok((name.to_string(), version.to_string()));
    }

    let tail = name.replacen(HDF5_PARALLEL, "", 1);
    let segments: Vec<&str> = tail.split('/').collect();
    let last = segments.last().copied().unwrap_or_default();
    let last_char = last
        .chars()
        .last()
        .ok_or_else(|| format!("empty trailing segment in module path {name:?}"))?;

    let package = if last_char.is_ascii_digit() && segments.len() > 1 {
        segments[segments.len() - 2]
    } else {
        last
    };
    let package = if package.is_empty() || package.chars().all(|c| c.is_ascii_digit() || c == '.') {
        "mvapich2"
    } else {
        package
    };
    Ok((package.to_string(), full_version))
}
