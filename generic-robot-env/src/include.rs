//! `<include file="..."/>` expansion.
//!
//! A scene file usually pulls the robot model in with `<include>`, and robot
//! models split themselves further into asset and actuator files. Expansion
//! replaces each include element by the children of the included document's
//! root, resolving the file name against the directory of the file holding the
//! include element.
use crate::error::{Result, RobotEnvError};
use crate::xml::XmlElement;
use log::{debug, warn};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Reads `path` and expands every include reachable from it into one tree.
///
/// Files already expanded (compared by canonical path) are skipped with a
/// warning, so include cycles terminate and a file included twice contributes
/// its content once.
pub fn resolve_includes(path: impl AsRef<Path>) -> Result<XmlElement> {
    let root_path = canonicalize(path.as_ref())?;
    let mut visited = HashSet::from([root_path.clone()]);
    let mut root = load_document(&root_path)?;
    expand(&mut root, parent_dir(&root_path), &mut visited)?;
    Ok(root)
}

fn expand(element: &mut XmlElement, base_dir: &Path, visited: &mut HashSet<PathBuf>) -> Result<()> {
    let children = std::mem::take(&mut element.children);

    for mut child in children {
        if child.name != "include" {
            expand(&mut child, base_dir, visited)?;
            element.children.push(child);
            continue;
        }

        let file = child
            .attr("file")
            .filter(|f| !f.is_empty())
            .ok_or_else(|| RobotEnvError::XmlParse {
                path: base_dir.to_path_buf(),
                message: "<include> element without a `file` attribute".to_string(),
            })?;
        let included_path = canonicalize(&base_dir.join(file))?;

        if !visited.insert(included_path.clone()) {
            warn!(
                "Skipping include of {}: file already expanded (include cycle or repeated include)",
                included_path.display()
            );
            continue;
        }

        debug!("Expanding include {}", included_path.display());
        let mut included = load_document(&included_path)?;
        expand(&mut included, parent_dir(&included_path), visited)?;
        element.children.append(&mut included.children);
    }

    Ok(())
}

fn load_document(path: &Path) -> Result<XmlElement> {
    let content = std::fs::read_to_string(path).map_err(|source| RobotEnvError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    XmlElement::parse_str(&content, path)
}

fn canonicalize(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Err(RobotEnvError::FileNotFound(path.to_path_buf()));
    }
    path.canonicalize().map_err(|source| RobotEnvError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parent_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempdir::TempDir;

    fn write_files(dir: &Path, files: &[(&str, &str)]) {
        for (name, content) in files {
            let path = dir.join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&path, content).unwrap();
        }
    }

    fn names(root: &XmlElement, tag: &str) -> Vec<String> {
        root.declarations()
            .filter(|e| e.name == tag)
            .filter_map(|e| e.attr("name").map(str::to_string))
            .collect()
    }

    #[test]
    fn test_nested_includes_across_directories() {
        let dir = TempDir::new("include").unwrap();
        write_files(
            dir.path(),
            &[
                (
                    "scene.xml",
                    r#"<mujoco>
                      <include file="robots/arm/arm.xml"/>
                      <worldbody><camera name="overview"/></worldbody>
                    </mujoco>"#,
                ),
                (
                    "robots/arm/arm.xml",
                    r#"<mujoco>
                      <worldbody><body name="base"><joint name="j1"/></body></worldbody>
                      <include file="parts/actuators.xml"/>
                    </mujoco>"#,
                ),
                (
                    "robots/arm/parts/actuators.xml",
                    r#"<mujoco><actuator><motor name="m1" joint="j1"/></actuator></mujoco>"#,
                ),
            ],
        );

        let root = resolve_includes(dir.path().join("scene.xml")).unwrap();
        assert_eq!(names(&root, "joint"), vec!["j1"]);
        assert_eq!(names(&root, "motor"), vec!["m1"]);
        assert_eq!(names(&root, "camera"), vec!["overview"]);
        assert!(root.declarations().all(|e| e.name != "include"));
    }

    #[test]
    fn test_include_cycle_terminates() {
        let dir = TempDir::new("include").unwrap();
        write_files(
            dir.path(),
            &[
                (
                    "a.xml",
                    r#"<mujoco><include file="b.xml"/><worldbody><joint name="ja"/></worldbody></mujoco>"#,
                ),
                (
                    "b.xml",
                    r#"<mujoco><include file="a.xml"/><worldbody><joint name="jb"/></worldbody></mujoco>"#,
                ),
                ("self.xml", r#"<mujoco><include file="self.xml"/><worldbody/></mujoco>"#),
            ],
        );

        let root = resolve_includes(dir.path().join("a.xml")).unwrap();
        assert_eq!(names(&root, "joint"), vec!["jb", "ja"]);

        let root = resolve_includes(dir.path().join("self.xml")).unwrap();
        assert_eq!(root.children.len(), 1);
    }

    #[test]
    fn test_repeated_include_expanded_once() {
        let dir = TempDir::new("include").unwrap();
        write_files(
            dir.path(),
            &[
                (
                    "scene.xml",
                    r#"<mujoco><include file="cam.xml"/><include file="./cam.xml"/></mujoco>"#,
                ),
                ("cam.xml", r#"<mujoco><worldbody><camera name="top"/></worldbody></mujoco>"#),
            ],
        );

        let root = resolve_includes(dir.path().join("scene.xml")).unwrap();
        assert_eq!(names(&root, "camera"), vec!["top"]);
    }

    #[test]
    fn test_missing_files() {
        let dir = TempDir::new("include").unwrap();
        write_files(
            dir.path(),
            &[("scene.xml", r#"<mujoco><include file="missing.xml"/></mujoco>"#)],
        );

        match resolve_includes(dir.path().join("scene.xml")) {
            Err(RobotEnvError::FileNotFound(path)) => assert!(path.ends_with("missing.xml")),
            other => panic!("expected FileNotFound, got {other:?}"),
        }
        assert!(matches!(
            resolve_includes(dir.path().join("nope.xml")),
            Err(RobotEnvError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_include_without_file_attribute() {
        let dir = TempDir::new("include").unwrap();
        write_files(dir.path(), &[("scene.xml", r#"<mujoco><include/></mujoco>"#)]);
        assert!(matches!(
            resolve_includes(dir.path().join("scene.xml")),
            Err(RobotEnvError::XmlParse { .. })
        ));
    }
}
