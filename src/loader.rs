//! Project loading
//!
//! Collects `*.json` files from files and directories, keys them by
//! basename, parses them and assigns roles. This is the only place that
//! touches the filesystem; the validators work on the parsed trees.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::catalog::Dialect;
use crate::config::ProjectConfig;
use crate::error::{Result, ValidatorError};
use crate::project::{FileRole, ProjectFile};

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// Every JSON file under `paths`, in a stable order
pub fn collect_json_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();

    for path in paths {
        if !path.exists() {
            return Err(ValidatorError::NotFound(path.clone()));
        }
        if path.is_file() {
            found.push(path.clone());
            continue;
        }
        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_file() && is_json(entry.path()) {
                found.push(entry.into_path());
            }
        }
    }

    Ok(found)
}

/// Read and parse one file. Unreadable JSON is not an error here; it is
/// carried on the [`ProjectFile`] and reported as a finding.
pub fn load_file(path: &Path, role: FileRole) -> Result<ProjectFile> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());

    let bytes = fs::read(path)?;
    match serde_json::from_slice(&bytes) {
        Ok(document) => Ok(ProjectFile::new(name, role, document)),
        Err(e) => {
            warn!(file = %path.display(), error = %e, "file is not valid JSON");
            Ok(ProjectFile::unparsed(name, role, e.to_string()))
        }
    }
}

/// Load a project from files and directories.
///
/// Roles come from `assignments` first, then the configured overrides, then
/// the file name. Files sharing a basename are all loaded; the project
/// validator reports the clash.
pub fn load_project(
    paths: &[PathBuf],
    project: &ProjectConfig,
    assignments: &BTreeMap<String, FileRole>,
) -> Result<Vec<ProjectFile>> {
    let mut files: Vec<ProjectFile> = Vec::new();

    for path in collect_json_files(paths)? {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let role = assignments
            .get(&name)
            .cloned()
            .unwrap_or_else(|| project.role_for(&name));
        debug!(file = %name, role = %role, "loading file");
        files.push(load_file(&path, role)?);
    }

    Ok(files)
}

/// Parse a `--assign <file>=<role>` argument. A bare `address-map` role
/// takes `default_map_type`, matching the name-based guess.
pub fn parse_assignment(arg: &str, default_map_type: Dialect) -> Result<(String, FileRole)> {
    let (name, role) = arg
        .split_once('=')
        .ok_or_else(|| ValidatorError::InvalidAssignment(arg.to_string()))?;
    Ok((
        name.trim().to_string(),
        FileRole::parse_with_default(role, default_map_type)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_project_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("devices.json"), "[]").unwrap();
        fs::write(dir.path().join("config.json"), "{not json").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::create_dir(dir.path().join("maps")).unwrap();
        fs::write(dir.path().join("maps").join("pcs_control.json"), "[]").unwrap();
        fs::write(dir.path().join("maps").join("pcs.json"), "[]").unwrap();

        let mut assignments = BTreeMap::new();
        assignments.insert("pcs.json".to_string(), FileRole::address_map(Dialect::Canbus));

        let files = load_project(&[dir.path().to_path_buf()], &ProjectConfig::default(), &assignments).unwrap();
        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["config.json", "devices.json", "pcs.json", "pcs_control.json"]);

        let config = &files[0];
        assert_eq!(config.role, FileRole::Config);
        assert!(config.document.is_err());

        assert_eq!(files[2].role, FileRole::address_map(Dialect::Canbus));
        assert_eq!(files[3].role, FileRole::ControlMap);
    }

    #[test]
    fn test_shared_basename_keeps_both() {
        let dir = tempfile::tempdir().unwrap();
        for sub in ["a", "b"] {
            fs::create_dir(dir.path().join(sub)).unwrap();
            fs::write(dir.path().join(sub).join("pcs_map.json"), "[]").unwrap();
        }

        let files = load_project(&[dir.path().to_path_buf()], &ProjectConfig::default(), &BTreeMap::new()).unwrap();
        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["pcs_map.json", "pcs_map.json"]);
    }

    #[test]
    fn test_missing_path() {
        let err = collect_json_files(&[PathBuf::from("/definitely/not/here")]).unwrap_err();
        assert!(matches!(err, ValidatorError::NotFound(_)));
    }

    #[test]
    fn test_parse_assignment() {
        let (name, role) = parse_assignment("io.json=address-map:Digital I/O", Dialect::ModbusTcpIp).unwrap();
        assert_eq!(name, "io.json");
        assert_eq!(role, FileRole::address_map(Dialect::DigitalIo));

        let (_, role) = parse_assignment("pcs.json=address-map", Dialect::Canbus).unwrap();
        assert_eq!(role, FileRole::address_map(Dialect::Canbus));

        assert!(matches!(
            parse_assignment("io.json", Dialect::ModbusTcpIp),
            Err(ValidatorError::InvalidAssignment(_))
        ));
    }
}
