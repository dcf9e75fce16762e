// file: src/translate/generator/group.rs
// version: 1.1.0
// guid: f0c57a8e-24b3-4d91-b6e8-85a3d1f20c47

//! Instance groups built from grouped virtual machines
//!
//! All members of a source group collapse into one instance template: the
//! largest member decides the size, NAT is enabled when any member needs it
//! and the scale size is the total member count.

use super::sizing::{parse_number, ComputeSize};
use super::{network_ref, subnet_ref, ResourceGenerator};
use crate::error::{ConvertError, Result};
use crate::translate::model::{Entity, Group, SourceModel};
use crate::translate::naming::{unquote, validate_name};
use std::io::Write;
use tracing::{debug, info};

/// Everything needed to write one instance group
struct GroupPlan {
    name: String,
    service_account_id: String,
    size: ComputeSize,
    image_id: String,
    nat: bool,
    scale: u64,
}

impl<W: Write> ResourceGenerator<'_, W> {
    pub(super) fn write_group(&mut self, model: &SourceModel, group: &Group) -> Result<()> {
        let name = unquote(&group.name).to_string();
        validate_name(&name)?;

        let members = group
            .members
            .iter()
            .filter_map(|reference| model.entity(reference))
            .collect::<Vec<_>>();
        info!("Converting group {} with {} machines", name, members.len());

        let plan = GroupPlan {
            service_account_id: self.service_account(&name)?,
            size: aggregate_size(&members)?,
            image_id: self.group_image(&name, &members)?,
            nat: members.iter().any(|m| m.uses_nat()),
            scale: scale_size(&members)?,
            name,
        };

        self.write_group_block(&plan)
    }

    /// Pick the boot image; asks the operator when members disagree
    fn group_image(&mut self, group: &str, members: &[&Entity]) -> Result<String> {
        let mut systems: Vec<String> = Vec::new();
        for member in members {
            let os_id = member
                .attr("os_id")
                .ok_or_else(|| ConvertError::OsIdNotDefined(member.reference.clone()))?;
            if !systems.iter().any(|s| s == os_id) {
                systems.push(os_id.to_string());
            }
        }

        let system = match systems.len() {
            0 => return Err(ConvertError::OsIdNotDefined(format!("group {}", group))),
            1 => &systems[0],
            _ => {
                let question = format!("Please select the os for group of vm {} from this list.", group);
                let choice = self.prompter.choose(&question, &systems)?;
                systems.get(choice).ok_or_else(|| {
                    ConvertError::prompt(format!("choice {} is out of range for group {}", choice, group))
                })?
            }
        };

        debug!("Group {} boots {}", group, system);
        Ok(self.catalog.resolve(system)?.to_string())
    }

    fn service_account(&mut self, group: &str) -> Result<String> {
        if let Some(id) = self.settings.service_accounts.get(group) {
            return Ok(id.clone());
        }
        self.prompter.ask(&format!(
            "Please write the ID of the service account authorized for {} instance group.",
            group
        ))
    }

    fn write_group_block(&mut self, plan: &GroupPlan) -> Result<()> {
        let network = &self.settings.network;
        let creds = &self.settings.credentials;

        writeln!(self.out, "resource \"yandex_compute_instance_group\" \"{}\" {{", plan.name)?;
        writeln!(self.out, "\tname = \"{}\"", plan.name)?;
        writeln!(self.out, "\tfolder_id = \"{}\"", creds.folder_id)?;
        writeln!(self.out, "\tservice_account_id = \"{}\"", plan.service_account_id)?;

        writeln!(self.out, "\tinstance_template {{")?;
        writeln!(self.out, "\t\tresources {{")?;
        writeln!(self.out, "\t\t\tmemory = {}", plan.size.memory_gb)?;
        writeln!(self.out, "\t\t\tcores = {}", plan.size.cores)?;
        writeln!(self.out, "\t\t}}")?;
        write!(self.out, "\t\tboot_disk {{\n\t\t\tinitialize_params {{\n")?;
        writeln!(self.out, "\t\t\t\timage_id = \"{}\"", plan.image_id)?;
        write!(self.out, "\t\t\t}}\n\t\t}}\n")?;
        writeln!(self.out, "\t\tnetwork_interface {{")?;
        writeln!(self.out, "\t\t\tnetwork_id = \"{}\"", network_ref(&network.network_name))?;
        writeln!(self.out, "\t\t\tsubnet_ids = [\"{}\"]", subnet_ref(&network.subnet_name))?;
        if plan.nat {
            writeln!(self.out, "\t\t\tnat = true")?;
        }
        writeln!(self.out, "\t\t}}")?;
        writeln!(self.out, "\t}}")?;

        write!(self.out, "\tscale_policy {{\n\t\tfixed_scale {{\n")?;
        writeln!(self.out, "\t\t\tsize = {}", plan.scale)?;
        write!(self.out, "\t\t}}\n\t}}\n")?;

        writeln!(self.out, "\tallocation_policy {{")?;
        writeln!(self.out, "\t\tzones = [\"{}\"]", creds.zone)?;
        writeln!(self.out, "\t}}")?;

        write!(self.out, "\tdeploy_policy {{\n\t\tmax_unavailable = 1\n\t\tmax_expansion = 1\n\t}}\n")?;
        write!(self.out, "}}\n\n")?;
        Ok(())
    }
}

/// Largest cores and memory among the members, rounded up to even
fn aggregate_size(members: &[&Entity]) -> Result<ComputeSize> {
    let mut size = ComputeSize::default();
    for member in members {
        size = size.max(ComputeSize::of(member)?);
    }
    Ok(size.rounded())
}

/// Total machines: each member counts its `count`, or one
fn scale_size(members: &[&Entity]) -> Result<u64> {
    members.iter().try_fold(0u64, |total, member| {
        let raw = member.attr("count");
        let count = match raw {
            Some(raw) => parse_number(member, "count", raw)?,
            None => 1,
        };
        total
            .checked_add(count)
            .ok_or_else(|| ConvertError::numeric("count", raw.unwrap_or("1"), &member.reference))
    })
}
