// file: src/cli/args.rs
// version: 2.0.0
// guid: 85f1a3d7-2c6e-4b09-9e48-d7a0c51b2e96

//! Command line argument definitions

use crate::config::DEFAULT_OUTPUT;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vbox-yc-converter")]
#[command(about = "Convert VirtualBox Terraform configurations to Yandex Cloud")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a VirtualBox configuration into a Yandex Cloud configuration
    Convert(ConvertArgs),

    /// List images available in the catalog
    ListImages {
        #[arg(long, help = "Pre-fetched output of `yc compute image list`")]
        images_file: Option<PathBuf>,

        #[arg(short, long, help = "Only show images whose name contains this text")]
        filter: Option<String>,
    },

    /// Show which image a VirtualBox os_id resolves to
    ResolveOs {
        /// VirtualBox OS type, e.g. Ubuntu22_64
        os_id: String,

        #[arg(long, help = "Pre-fetched output of `yc compute image list`")]
        images_file: Option<PathBuf>,
    },

    /// Check a name against the Yandex Cloud naming rules
    CheckName {
        name: String,
    },
}

/// Arguments of the convert command
#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    #[arg(short, long, help = "Source configuration; asked for when several .tf files exist")]
    pub source: Option<PathBuf>,

    #[arg(short, long, default_value = ".", help = "Directory searched for .tf files")]
    pub dir: PathBuf,

    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    #[arg(short, long, help = "YAML or TOML settings file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Pre-fetched output of `yc compute image list`")]
    pub images_file: Option<PathBuf>,

    #[arg(long, env = "YC_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[arg(long, env = "YC_CLOUD_ID")]
    pub cloud_id: Option<String>,

    #[arg(long, env = "YC_FOLDER_ID")]
    pub folder_id: Option<String>,

    #[arg(long, env = "YC_ZONE")]
    pub zone: Option<String>,

    #[arg(long, help = "Name of the VPC network to create")]
    pub network: Option<String>,

    #[arg(long, help = "Name of the subnet to create")]
    pub subnet: Option<String>,

    #[arg(long, help = "IPv4 block of the subnet, /16 to /28")]
    pub cidr: Option<String>,
}
