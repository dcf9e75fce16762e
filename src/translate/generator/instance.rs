// file: src/translate/generator/instance.rs
// version: 1.0.0
// guid: 7a3c91f6-d204-4e5b-a8f7-2e61b9d0c534

//! Standalone compute instances

use super::sizing::ComputeSize;
use super::{subnet_ref, ResourceGenerator};
use crate::error::{ConvertError, Result};
use crate::translate::model::Entity;
use crate::translate::naming::{unquote, validate_name};
use std::io::Write;
use tracing::debug;

impl<W: Write> ResourceGenerator<'_, W> {
    pub(super) fn write_instance(&mut self, entity: &Entity) -> Result<()> {
        debug!("Converting virtual machine {}", entity.reference);
        writeln!(self.out, "resource \"yandex_compute_instance\" {} {{", entity.reference)?;

        self.write_optional_fields(entity)?;
        self.write_boot_disk(entity)?;
        self.write_network_interface(entity)?;
        self.write_resources(entity)?;

        write!(self.out, "}}\n\n")?;
        Ok(())
    }

    fn write_optional_fields(&mut self, entity: &Entity) -> Result<()> {
        if let Some(count) = entity.attr("count") {
            writeln!(self.out, "\tcount = {}", count)?;
        }

        if let Some(name) = entity.attr("name") {
            validate_name(unquote(name))?;
            writeln!(self.out, "\tname = {}", name)?;
        }

        if let Some(basedir) = entity.attr("basedir") {
            writeln!(
                self.out,
                "\tfolder_id = \"${{yandex_resourcemanager_folder.{}.id}}\"",
                unquote(basedir)
            )?;
        }
        Ok(())
    }

    fn write_boot_disk(&mut self, entity: &Entity) -> Result<()> {
        let os_id = entity
            .attr("os_id")
            .ok_or_else(|| ConvertError::OsIdNotDefined(entity.reference.clone()))?;
        let image_id = self.catalog.resolve(os_id)?;

        write!(self.out, "\tboot_disk {{\n\t\tinitialize_params {{\n")?;
        writeln!(self.out, "\t\t\timage_id = \"{}\"", image_id)?;
        write!(self.out, "\t\t}}\n\t}}\n")?;
        Ok(())
    }

    fn write_network_interface(&mut self, entity: &Entity) -> Result<()> {
        writeln!(self.out, "\tnetwork_interface {{")?;
        writeln!(
            self.out,
            "\t\tsubnet_id = \"{}\"",
            subnet_ref(&self.settings.network.subnet_name)
        )?;
        if entity.uses_nat() {
            writeln!(self.out, "\t\tnat = true")?;
        }
        writeln!(self.out, "\t}}")?;
        Ok(())
    }

    fn write_resources(&mut self, entity: &Entity) -> Result<()> {
        let size = ComputeSize::of(entity)?.rounded();

        writeln!(self.out, "\tresources {{")?;
        writeln!(self.out, "\t\tcores = {}", size.cores)?;
        writeln!(self.out, "\t\tmemory = {}", size.memory_gb)?;
        writeln!(self.out, "\t}}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::render;
    use crate::error::ConvertError;

    #[test]
    fn test_full_instance_block() {
        let src = r#"
resource "virtualbox_server" "web" {
	count = 2
	name = "web-01"
	cpus = 2
	memory = 4096
	os_id = "Ubuntu22_64"
	network_adapter {
		network_mode = "bridged"
	}
}
"#;
        let out = render(src, &[]).unwrap();
        let expected = "resource \"yandex_compute_instance\" \"web\" {\n\
\tcount = 2\n\
\tname = \"web-01\"\n\
\tboot_disk {\n\
\t\tinitialize_params {\n\
\t\t\timage_id = \"fd8ubuntu22\"\n\
\t\t}\n\
\t}\n\
\tnetwork_interface {\n\
\t\tsubnet_id = \"${yandex_vpc_subnet.main-subnet.id}\"\n\
\t}\n\
\tresources {\n\
\t\tcores = 2\n\
\t\tmemory = 4\n\
\t}\n\
}\n\n";
        assert!(out.ends_with(expected), "unexpected output:\n{}", out);
    }

    #[test]
    fn test_nat_adapter_enables_nat() {
        let src = "resource \"virtualbox_server\" \"vm\" {\n cpus = 2\n memory = 2048\n os_id = \"Ubuntu_64\"\n \
network_adapter {\n  network_mode = \"hostonly\"\n }\n network_adapter {\n  network_mode = \"nat\"\n }\n}\n";
        let out = render(src, &[]).unwrap();
        assert!(out.contains("\t\tnat = true\n"));
    }

    #[test]
    fn test_invalid_instance_name() {
        let src = "resource \"virtualbox_server\" \"vm\" {\n name = \"Web\"\n cpus = 2\n memory = 2048\n os_id = \"Ubuntu_64\"\n}\n";
        assert!(matches!(render(src, &[]), Err(ConvertError::InvalidName { .. })));
    }

    #[test]
    fn test_missing_os_id() {
        let src = "resource \"virtualbox_server\" \"vm\" {\n cpus = 2\n memory = 2048\n}\n";
        assert!(matches!(render(src, &[]), Err(ConvertError::OsIdNotDefined(_))));
    }

    #[test]
    fn test_unresolved_os() {
        let src = "resource \"virtualbox_server\" \"vm\" {\n cpus = 2\n memory = 2048\n os_id = \"Solaris11_64\"\n}\n";
        assert!(matches!(render(src, &[]), Err(ConvertError::UnresolvedOsName { .. })));
    }

    #[test]
    fn test_missing_memory() {
        let src = "resource \"virtualbox_server\" \"vm\" {\n cpus = 2\n os_id = \"Ubuntu_64\"\n}\n";
        assert!(matches!(render(src, &[]), Err(ConvertError::MemoryNotDefined(_))));
    }
}
