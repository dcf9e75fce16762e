// file: src/cli/sources.rs
// version: 1.0.0
// guid: 2f7d0b84-c5a9-4e13-8b62-e1d9a4f07c35

//! Inputs of a conversion run: the source file, the settings and the image
//! catalog

use super::args::ConvertArgs;
use crate::config::settings::{validate_cidr, PartialCredentials, PartialNetwork};
use crate::config::{
    ConfigLoader, ConversionSettings, Credentials, NetworkSettings, SettingsFile,
    AVAILABILITY_ZONES,
};
use crate::error::{ConvertError, Result};
use crate::prompt::Prompter;
use crate::translate::{validate_name, OsCatalog};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Pick the source configuration.
///
/// An explicit `--source` wins. Otherwise the `.tf` files of the search
/// directory are listed (the output file excluded); a single candidate is
/// used as is and several are offered to the operator.
pub async fn select_source(args: &ConvertArgs, prompter: &mut dyn Prompter) -> Result<PathBuf> {
    if let Some(source) = &args.source {
        return Ok(source.clone());
    }

    let output_name = args.output.file_name();
    let mut configs = Vec::new();
    let mut entries = fs::read_dir(&args.dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_tf = path.extension().map(|ext| ext == "tf").unwrap_or(false);
        if is_tf && path.file_name() != output_name {
            configs.push(path);
        }
    }
    configs.sort();

    match configs.len() {
        0 => Err(ConvertError::NoSourceFile(args.dir.display().to_string())),
        1 => Ok(configs.remove(0)),
        _ => {
            let names: Vec<String> = configs
                .iter()
                .map(|p| p.file_name().unwrap_or_default().to_string_lossy().into_owned())
                .collect();
            let choice = prompter.choose("Please select the file to convert from this list.", &names)?;
            Ok(configs.swap_remove(choice))
        }
    }
}

/// Merge command line values, the settings file and operator answers.
///
/// Command line values override the file; anything still missing is asked
/// for and re-asked until it is valid.
pub fn collect_settings(args: &ConvertArgs, prompter: &mut dyn Prompter) -> Result<ConversionSettings> {
    let file = match &args.config {
        Some(path) => ConfigLoader::new().load_settings(path)?,
        None => SettingsFile::default(),
    };
    let PartialCredentials {
        token,
        cloud_id,
        folder_id,
        zone,
    } = file.credentials;
    let PartialNetwork {
        network_name,
        subnet_name,
        cidr,
    } = file.network;

    let credentials = Credentials {
        token: or_ask(
            args.token.clone().or(token),
            prompter,
            "Please write security token or IAM token used for authentication in Yandex.Cloud.",
            |_| Ok(()),
        )?,
        cloud_id: or_ask(
            args.cloud_id.clone().or(cloud_id),
            prompter,
            "Please write the ID of the cloud to apply any resources to.",
            |_| Ok(()),
        )?,
        folder_id: or_ask(
            args.folder_id.clone().or(folder_id),
            prompter,
            "Please write the ID of the folder to operate under, if not specified by a given resource.",
            |_| Ok(()),
        )?,
        zone: match args.zone.clone().or(zone) {
            Some(zone) => zone,
            None => {
                let zones: Vec<String> = AVAILABILITY_ZONES.iter().map(|z| z.to_string()).collect();
                let choice = prompter.choose(
                    "Please select the name of the default availability zone to operate under.",
                    &zones,
                )?;
                zones[choice].clone()
            }
        },
    };

    let network = NetworkSettings {
        network_name: or_ask(
            args.network.clone().or(network_name),
            prompter,
            "Please write a name for the network.",
            validate_name,
        )?,
        subnet_name: or_ask(
            args.subnet.clone().or(subnet_name),
            prompter,
            "Please write a name for the subnet.",
            validate_name,
        )?,
        cidr: or_ask(
            args.cidr.clone().or(cidr),
            prompter,
            "Please write a block of internal IPv4 addresses owned by the subnet, \
             e.g. 10.0.0.0/22 or 192.168.0.0/16. Minimum subnet size is /28, maximum is /16.",
            validate_cidr,
        )?,
    };

    let settings = ConversionSettings {
        credentials,
        network,
        service_accounts: file.service_accounts,
    };
    settings.validate()?;
    Ok(settings)
}

fn or_ask<F>(value: Option<String>, prompter: &mut dyn Prompter, question: &str, check: F) -> Result<String>
where
    F: Fn(&str) -> Result<()>,
{
    if let Some(value) = value {
        return Ok(value);
    }

    loop {
        let answer = prompter.ask(question)?;
        match check(&answer) {
            Ok(()) => return Ok(answer),
            Err(e) => warn!("{}", e),
        }
    }
}

/// Load the image catalog from a listing file, or run `yc` when none is given
pub async fn load_catalog(images_file: Option<&Path>) -> Result<OsCatalog> {
    let table = match images_file {
        Some(path) => {
            debug!("Reading image list from {}", path.display());
            fs::read_to_string(path).await.map_err(|e| {
                ConvertError::catalog(format!("failed to read {}: {}", path.display(), e))
            })?
        }
        None => fetch_image_list().await?,
    };

    let catalog = OsCatalog::parse_table(&table);
    if catalog.is_empty() {
        warn!("The image catalog is empty, no os_id can be resolved");
    } else {
        info!("Image catalog holds {} images", catalog.len());
    }
    Ok(catalog)
}

async fn fetch_image_list() -> Result<String> {
    info!("Fetching the image list with yc");
    let output = Command::new("yc")
        .args(["compute", "image", "list", "--folder-id", "standard-images"])
        .output()
        .await
        .map_err(|e| ConvertError::catalog(format!("failed to run yc: {}", e)))?;

    if !output.status.success() {
        return Err(ConvertError::catalog(format!(
            "yc exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::{Cli, Commands};
    use crate::prompt::ScriptedPrompter;
    use clap::Parser;
    use tempfile::TempDir;

    fn args(extra: &[&str]) -> ConvertArgs {
        let mut argv = vec!["vbox-yc-converter", "convert"];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Convert(mut a) => {
                // keep the process environment out of the tests
                a.token = None;
                a.cloud_id = None;
                a.folder_id = None;
                a.zone = None;
                a
            }
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn test_select_single_source() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("vms.tf"), "").unwrap();
        std::fs::write(dir.path().join("yandex_cloud.tf"), "").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();

        let a = args(&["--dir", dir.path().to_str().unwrap()]);
        let mut prompter = ScriptedPrompter::default();
        let source = select_source(&a, &mut prompter).await.unwrap();
        assert_eq!(source, dir.path().join("vms.tf"));
    }

    #[tokio::test]
    async fn test_select_among_several_sources() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.tf"), "").unwrap();
        std::fs::write(dir.path().join("b.tf"), "").unwrap();

        let a = args(&["--dir", dir.path().to_str().unwrap()]);
        let mut prompter = ScriptedPrompter::new(["2"]);
        let source = select_source(&a, &mut prompter).await.unwrap();
        assert_eq!(source, dir.path().join("b.tf"));
    }

    #[tokio::test]
    async fn test_select_without_sources() {
        let dir = TempDir::new().unwrap();
        let a = args(&["--dir", dir.path().to_str().unwrap()]);
        let result = select_source(&a, &mut ScriptedPrompter::default()).await;
        assert!(matches!(result, Err(ConvertError::NoSourceFile(_))));
    }

    #[test]
    fn test_collect_settings_from_prompts() {
        let a = args(&[]);
        let mut prompter = ScriptedPrompter::new([
            "token", "cloud", "folder", "2", "Bad_Name", "net", "subnet", "10.0.0.0/8", "10.0.0.0/24",
        ]);
        let settings = collect_settings(&a, &mut prompter).unwrap();

        assert_eq!(settings.credentials.zone, "ru-central1-b");
        assert_eq!(settings.network.network_name, "net");
        assert_eq!(settings.network.cidr, "10.0.0.0/24");
    }

    #[test]
    fn test_collect_settings_flags_win() {
        let mut a = args(&["--network", "flag-net", "--subnet", "flag-subnet", "--cidr", "172.16.0.0/20"]);
        a.token = Some("t".to_string());
        a.cloud_id = Some("c".to_string());
        a.folder_id = Some("f".to_string());
        a.zone = Some("ru-central1-d".to_string());

        let settings = collect_settings(&a, &mut ScriptedPrompter::default()).unwrap();
        assert_eq!(settings.network.subnet_name, "flag-subnet");
        assert_eq!(settings.credentials.zone, "ru-central1-d");
    }

    #[test]
    fn test_collect_settings_rejects_invalid_flag() {
        let mut a = args(&["--network", "Net", "--subnet", "sub", "--cidr", "10.0.0.0/24"]);
        a.token = Some("t".to_string());
        a.cloud_id = Some("c".to_string());
        a.folder_id = Some("f".to_string());
        a.zone = Some("ru-central1-a".to_string());

        let result = collect_settings(&a, &mut ScriptedPrompter::default());
        assert!(matches!(result, Err(ConvertError::InvalidName { .. })));
    }

    #[tokio::test]
    async fn test_load_catalog_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("yc_images.txt");
        std::fs::write(
            &path,
            "+----+\n| ID | NAME | FAMILY | PRODUCT IDS | STATUS |\n+----+\n| fd8abc | debian-11-v1 | debian-11 | f2e | READY |\n+----+\n",
        )
        .unwrap();

        let catalog = load_catalog(Some(&path)).await.unwrap();
        assert_eq!(catalog.resolve("\"Debian11_64\"").unwrap(), "fd8abc");
    }

    #[tokio::test]
    async fn test_load_catalog_missing_file() {
        let result = load_catalog(Some(Path::new("/nonexistent/yc_images.txt"))).await;
        assert!(matches!(result, Err(ConvertError::Catalog(_))));
    }
}
