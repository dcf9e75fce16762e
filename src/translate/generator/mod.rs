// file: src/translate/generator/mod.rs
// version: 1.0.0
// guid: 47b9c2e1-5d08-4f3a-96e7-b0c4a81d2f63

//! Yandex Cloud resource generator
//!
//! Writes the target configuration in a fixed order:
//! - provider block with credentials
//! - network and subnet shared by every instance
//! - one instance group per source group
//! - one compute instance per ungrouped entity, preceded by its folder the
//!   first time that folder is referenced

mod folder;
mod group;
mod instance;
mod network;
pub mod sizing;

pub use folder::CreatedFolders;
pub use sizing::ComputeSize;

use super::model::SourceModel;
use super::os_catalog::OsCatalog;
use crate::config::ConversionSettings;
use crate::error::Result;
use crate::prompt::Prompter;
use std::io::Write;
use tracing::info;

/// Writes a converted configuration for one [`SourceModel`]
pub struct ResourceGenerator<'a, W: Write> {
    out: W,
    catalog: &'a OsCatalog,
    settings: &'a ConversionSettings,
    prompter: &'a mut dyn Prompter,
}

impl<'a, W: Write> ResourceGenerator<'a, W> {
    pub fn new(
        out: W,
        catalog: &'a OsCatalog,
        settings: &'a ConversionSettings,
        prompter: &'a mut dyn Prompter,
    ) -> Self {
        Self {
            out,
            catalog,
            settings,
            prompter,
        }
    }

    /// Generate the whole target configuration.
    ///
    /// Returns the folders that were created. On error the output holds a
    /// partial configuration and must be discarded by the caller.
    pub fn generate(&mut self, model: &SourceModel) -> Result<CreatedFolders> {
        self.write_provider()?;
        self.write_network()?;
        self.write_subnet()?;

        for group in model.groups() {
            self.write_group(model, group)?;
        }

        let mut folders = CreatedFolders::default();
        let mut instances = 0usize;
        for entity in model.standalone_entities() {
            if let Some(basedir) = entity.attr("basedir") {
                folders = self.write_folder(folders, basedir)?;
            }
            self.write_instance(entity)?;
            instances += 1;
        }

        self.out.flush()?;
        info!(
            "Generated {} instance groups, {} instances and {} folders",
            model.groups().len(),
            instances,
            folders.len()
        );
        Ok(folders)
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Subnet reference used by instances and groups
fn subnet_ref(subnet_name: &str) -> String {
    format!("${{yandex_vpc_subnet.{}.id}}", subnet_name)
}

/// Network reference used by the subnet and groups
fn network_ref(network_name: &str) -> String {
    format!("${{yandex_vpc_network.{}.id}}", network_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Credentials, NetworkSettings};
    use crate::error::ConvertError;
    use crate::prompt::ScriptedPrompter;
    use crate::translate::scanner::scan;
    use std::collections::HashMap;
    use std::io::Cursor;

    pub(super) fn settings() -> ConversionSettings {
        ConversionSettings {
            credentials: Credentials {
                token: "t1.token".to_string(),
                cloud_id: "b1gcloud".to_string(),
                folder_id: "b1gfolder".to_string(),
                zone: "ru-central1-a".to_string(),
            },
            network: NetworkSettings {
                network_name: "main-net".to_string(),
                subnet_name: "main-subnet".to_string(),
                cidr: "10.0.0.0/24".to_string(),
            },
            service_accounts: HashMap::from([("db".to_string(), "aje-sa".to_string())]),
        }
    }

    pub(super) fn catalog() -> OsCatalog {
        OsCatalog::from_entries([
            ("ubuntu-lts-v20231002", "fd8ubuntu"),
            ("ubuntu-22-04-lts-v20231002", "fd8ubuntu22"),
            ("debian-11-v20231002", "fd8debian11"),
        ])
    }

    pub(super) fn render(source: &str, answers: &[&str]) -> Result<String> {
        let model = scan(Cursor::new(source))?;
        let settings = settings();
        let catalog = catalog();
        let mut prompter = ScriptedPrompter::new(answers.iter().copied());
        let mut generator = ResourceGenerator::new(Vec::new(), &catalog, &settings, &mut prompter);
        generator.generate(&model)?;
        Ok(String::from_utf8(generator.into_inner()).expect("utf8 output"))
    }

    #[test]
    fn test_web_scenario() {
        let out = render(
            "resource \"virtualbox_server\" \"web\" {\n\tcpus = \"3\"\n\tmemory = \"1500\"\n\tos_id = \"Ubuntu_64\"\n}\n",
            &[],
        )
        .unwrap();

        assert!(out.contains("resource \"yandex_compute_instance\" \"web\" {\n"));
        assert!(out.contains("\t\tcores = 4\n"));
        assert!(out.contains("\t\tmemory = 2\n"));
        assert!(out.contains("\t\tnat = true\n"));
        assert!(out.contains("\t\t\timage_id = \"fd8ubuntu\"\n"));
    }

    #[test]
    fn test_block_order() {
        let out = render(
            "resource \"virtualbox_server\" \"solo\" {\n cpus = 2\n memory = 2048\n os_id = \"Debian11_64\"\n}\n\
             resource \"virtualbox_server\" \"db1\" {\n cpus = 2\n memory = 2048\n os_id = \"Debian11_64\"\n group = \"db\"\n}\n",
            &[],
        )
        .unwrap();

        let provider = out.find("provider \"yandex\"").unwrap();
        let network = out.find("resource \"yandex_vpc_network\"").unwrap();
        let subnet = out.find("resource \"yandex_vpc_subnet\"").unwrap();
        let group = out.find("resource \"yandex_compute_instance_group\"").unwrap();
        let instance = out.find("resource \"yandex_compute_instance\" \"solo\"").unwrap();
        assert!(provider < network && network < subnet && subnet < group && group < instance);
        assert!(!out.contains("resource \"yandex_compute_instance\" \"db1\""));
    }

    #[test]
    fn test_missing_cpus_fails() {
        let err = render(
            "resource \"virtualbox_server\" \"web\" {\n memory = 1024\n os_id = \"Ubuntu_64\"\n}\n",
            &[],
        )
        .unwrap_err();
        assert!(matches!(err, ConvertError::CpusNotDefined(ref r) if r == "\"web\""));
    }

    #[test]
    fn test_empty_model_still_writes_network() {
        let out = render("", &[]).unwrap();
        assert!(out.contains("resource \"yandex_vpc_network\" \"main-net\""));
        assert!(!out.contains("yandex_compute_instance"));
    }
}
