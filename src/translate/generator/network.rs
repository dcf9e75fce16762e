// file: src/translate/generator/network.rs
// version: 1.0.0
// guid: 13d8f5a0-6c27-4e9b-8a41-d5e2b0c79f18

//! Provider, network and subnet blocks

use super::{network_ref, ResourceGenerator};
use crate::error::Result;
use std::io::Write;
use tracing::debug;

impl<W: Write> ResourceGenerator<'_, W> {
    pub(super) fn write_provider(&mut self) -> Result<()> {
        let creds = &self.settings.credentials;

        write!(
            self.out,
            "terraform {{\n\trequired_providers {{\n\t\tyandex = {{\n\t\t\tsource = \"yandex-cloud/yandex\"\n\t\t}}\n\t}}\n}}\n\n"
        )?;
        writeln!(self.out, "provider \"yandex\" {{")?;
        writeln!(self.out, "\ttoken = \"{}\"", creds.token)?;
        writeln!(self.out, "\tcloud_id = \"{}\"", creds.cloud_id)?;
        writeln!(self.out, "\tfolder_id = \"{}\"", creds.folder_id)?;
        writeln!(self.out, "\tzone = \"{}\"", creds.zone)?;
        write!(self.out, "}}\n\n")?;
        Ok(())
    }

    pub(super) fn write_network(&mut self) -> Result<()> {
        let name = &self.settings.network.network_name;
        debug!("Writing network {}", name);

        writeln!(self.out, "resource \"yandex_vpc_network\" \"{}\" {{", name)?;
        writeln!(self.out, "\tname = \"{}\"", name)?;
        write!(self.out, "}}\n\n")?;
        Ok(())
    }

    pub(super) fn write_subnet(&mut self) -> Result<()> {
        let network = &self.settings.network;
        debug!("Writing subnet {} ({})", network.subnet_name, network.cidr);

        writeln!(self.out, "resource \"yandex_vpc_subnet\" \"{}\" {{", network.subnet_name)?;
        writeln!(self.out, "\tname = \"{}\"", network.subnet_name)?;
        writeln!(self.out, "\tv4_cidr_blocks = [\"{}\"]", network.cidr)?;
        writeln!(self.out, "\tzone = \"{}\"", self.settings.credentials.zone)?;
        writeln!(self.out, "\tnetwork_id = \"{}\"", network_ref(&network.network_name))?;
        write!(self.out, "}}\n\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::render;

    #[test]
    fn test_provider_block() {
        let out = render("", &[]).unwrap();
        assert!(out.starts_with("terraform {\n\trequired_providers {\n\t\tyandex = {\n"));
        assert!(out.contains(
            "provider \"yandex\" {\n\ttoken = \"t1.token\"\n\tcloud_id = \"b1gcloud\"\n\tfolder_id = \"b1gfolder\"\n\tzone = \"ru-central1-a\"\n}\n\n"
        ));
    }

    #[test]
    fn test_network_and_subnet_blocks() {
        let out = render("", &[]).unwrap();
        assert!(out.contains("resource \"yandex_vpc_network\" \"main-net\" {\n\tname = \"main-net\"\n}\n\n"));
        assert!(out.contains(
            "resource \"yandex_vpc_subnet\" \"main-subnet\" {\n\
             \tname = \"main-subnet\"\n\
             \tv4_cidr_blocks = [\"10.0.0.0/24\"]\n\
             \tzone = \"ru-central1-a\"\n\
             \tnetwork_id = \"${yandex_vpc_network.main-net.id}\"\n}\n\n"
        ));
    }
}
