use std::path::{Path, PathBuf};
use std::process;

use bytes::Bytes;
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};

use landrive::file_list::{format_size, format_timestamp};
use landrive::{
    Config, DirectorySink, DriveClient, DriveError, DriveResult, FileManager, SelectedFile,
    TerminalDialog,
};

type Manager = FileManager<DriveClient, TerminalDialog, DirectorySink>;

#[tokio::main]
async fn main() {
    env_logger::init();

    let matches = app().get_matches();
    if let Err(e) = run(&matches).await {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn app() -> App<'static, 'static> {
    let name_arg = Arg::with_name("NAME")
        .help("File name on the server")
        .required(true)
        .index(1);

    App::new("landrive")
        .version(env!("CARGO_PKG_VERSION"))
        .about("List, upload, download and delete files on a LAN Drive server")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("server")
                .long("server")
                .short("s")
                .takes_value(true)
                .value_name("URL")
                .help("Server base url, e.g. http://192.168.1.180:8080"),
        )
        .arg(
            Arg::with_name("config")
                .long("config")
                .short("c")
                .takes_value(true)
                .value_name("FILE")
                .help("JSON config file (default: ./landrive.json if present)"),
        )
        .subcommand(SubCommand::with_name("list").about("List all files on the server"))
        .subcommand(
            SubCommand::with_name("download")
                .about("Download a file")
                .arg(name_arg.clone())
                .arg(
                    Arg::with_name("out")
                        .long("out")
                        .short("o")
                        .takes_value(true)
                        .value_name("DIR")
                        .help("Directory to save into"),
                ),
        )
        .subcommand(
            SubCommand::with_name("delete")
                .about("Delete a file")
                .arg(name_arg.clone())
                .arg(
                    Arg::with_name("yes")
                        .long("yes")
                        .short("y")
                        .help("Do not ask for confirmation"),
                ),
        )
        .subcommand(
            SubCommand::with_name("upload").about("Upload a file").arg(
                Arg::with_name("PATH")
                    .help("Local file to upload")
                    .required(true)
                    .index(1),
            ),
        )
        .subcommand(
            SubCommand::with_name("info")
                .about("Show information about a file")
                .arg(name_arg),
        )
}

async fn run(matches: &ArgMatches<'_>) -> DriveResult<()> {
    let mut config = Config::load(matches.value_of("config").map(Path::new))?;
    if let Some(server) = matches.value_of("server") {
        config.server = server.to_string();
    }

    let (command, sub) = match matches.subcommand() {
        (command, Some(sub)) => (command, sub),
        _ => return Ok(()),
    };

    let download_dir = sub
        .value_of("out")
        .map(PathBuf::from)
        .unwrap_or_else(|| config.download_dir.clone());
    let manager: Manager = FileManager::new(
        DriveClient::new(&config)?,
        TerminalDialog::new(sub.is_present("yes")),
        DirectorySink::new(download_dir),
    );
    tracing::info!("using {}", manager.api().base_url());

    match command {
        "list" => {
            manager.list_files().await?;
            print_files(&manager).await;
        }
        "download" => {
            let name = sub.value_of("NAME").unwrap_or_default();
            manager.download_file(name).await?;
            println!("Downloaded {}", name);
        }
        "delete" => {
            let name = sub.value_of("NAME").unwrap_or_default();
            if manager.delete_file(name).await? {
                println!("Deleted {}", name);
                print_files(&manager).await;
            } else {
                println!("Delete cancelled");
            }
        }
        "upload" => {
            let path = Path::new(sub.value_of("PATH").unwrap_or_default());
            let selection = read_selection(path).await?;
            if manager.upload_file(Some(selection)).await? {
                print_files(&manager).await;
            }
        }
        "info" => {
            let entry = manager.file_info(sub.value_of("NAME").unwrap_or_default()).await?;
            println!("Name: {}", entry.name);
            println!("Size: {}", format_size(entry.size));
            println!("Modified: {}", format_timestamp(entry.modified.unwrap_or(0)));
        }
        other => tracing::error!("unhandled subcommand {}", other),
    }
    Ok(())
}

async fn print_files(manager: &Manager) {
    let list = manager.snapshot().await;
    if list.is_empty() {
        print!("{}", list);
        return;
    }
    println!("Files on server ({} total):", list.len());
    println!("{:<30} {:<12} {:<18}", "Name", "Size", "Modified");
    println!("{}", "-".repeat(60));
    for entry in list.entries() {
        println!(
            "{:<30} {:<12} {:<18}",
            entry.name,
            format_size(entry.size),
            format_timestamp(entry.modified.unwrap_or(0))
        );
    }
}

async fn read_selection(path: &Path) -> DriveResult<SelectedFile> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| DriveError::InvalidFilename(path.display().to_string()))?;
    let data = tokio::fs::read(path).await?;
    Ok(SelectedFile {
        name,
        data: Bytes::from(data),
    })
}
