// file: src/translate/generator/folder.rs
// version: 1.0.0
// guid: b86e0d42-9f15-4a7c-83b2-6c0f1e94d5a8

//! Resource manager folders for standalone instances

use super::ResourceGenerator;
use crate::error::Result;
use crate::translate::naming::{unquote, validate_name};
use std::io::Write;
use tracing::debug;

/// Folder names already written during one generator run, in creation order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreatedFolders(Vec<String>);

impl CreatedFolders {
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|f| f == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    fn with(mut self, name: &str) -> Self {
        self.0.push(name.to_string());
        self
    }
}

impl<W: Write> ResourceGenerator<'_, W> {
    /// Write a folder for `basedir` unless it was already created.
    ///
    /// Takes the folders created so far and returns the updated set.
    pub(super) fn write_folder(&mut self, created: CreatedFolders, basedir: &str) -> Result<CreatedFolders> {
        let name = unquote(basedir);
        if created.contains(name) {
            debug!("Folder {} already created", name);
            return Ok(created);
        }

        validate_name(name)?;

        writeln!(self.out, "resource \"yandex_resourcemanager_folder\" \"{}\" {{", name)?;
        writeln!(self.out, "\tname = \"{}\"", name)?;
        write!(self.out, "}}\n\n")?;

        Ok(created.with(name))
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::render;
    use crate::error::ConvertError;

    const TWO_IN_SAME_DIR: &str = r#"
resource "virtualbox_server" "a" {
	basedir = "apps"
	cpus = 2
	memory = 2048
	os_id = "Ubuntu_64"
}
resource "virtualbox_server" "b" {
	basedir = "apps"
	cpus = 2
	memory = 2048
	os_id = "Ubuntu_64"
}
"#;

    #[test]
    fn test_folder_written_once() {
        let out = render(TWO_IN_SAME_DIR, &[]).unwrap();
        assert_eq!(out.matches("resource \"yandex_resourcemanager_folder\"").count(), 1);
        assert!(out.contains("resource \"yandex_resourcemanager_folder\" \"apps\" {\n\tname = \"apps\"\n}\n\n"));
        assert_eq!(out.matches("folder_id = \"${yandex_resourcemanager_folder.apps.id}\"").count(), 2);
    }

    #[test]
    fn test_folder_precedes_its_instance() {
        let out = render(TWO_IN_SAME_DIR, &[]).unwrap();
        let folder = out.find("yandex_resourcemanager_folder\" \"apps\"").unwrap();
        let first = out.find("yandex_compute_instance\" \"a\"").unwrap();
        assert!(folder < first);
    }

    #[test]
    fn test_invalid_folder_name() {
        let src = "resource \"virtualbox_server\" \"a\" {\n basedir = \"My_Dir\"\n cpus = 2\n memory = 2048\n os_id = \"Ubuntu_64\"\n}\n";
        let err = render(src, &[]).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidName { ref name, .. } if name == "My_Dir"));
    }

    #[test]
    fn test_created_folders_accumulate() {
        let folders = super::CreatedFolders::default().with("a").with("b");
        assert_eq!(folders.names(), ["a".to_string(), "b".to_string()]);
        assert!(folders.contains("b"));
        assert!(!folders.contains("c"));
    }
}
