// file: src/main.rs
// version: 2.0.0
// guid: 58c2f9e7-1a0d-4b36-9e84-f3d7a6b20c19

//! VirtualBox to Yandex Cloud converter - Main entry point

use clap::Parser;
use vbox_yc_converter::{
    cli::{args::Cli, args::Commands, commands::*},
    logging::logger,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    logger::init_logger(cli.verbose, cli.quiet)?;

    match cli.command {
        Commands::Convert(args) => convert_command(args).await,
        Commands::ListImages {
            images_file,
            filter,
        } => list_images_command(images_file, filter).await,
        Commands::ResolveOs { os_id, images_file } => resolve_os_command(&os_id, images_file).await,
        Commands::CheckName { name } => check_name_command(&name),
    }
}
