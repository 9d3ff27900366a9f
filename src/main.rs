use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use structopt::StructOpt;

use blindrf_shared::channel::Channel;
use blindrf_shared::remotes::parse_remote_id;
use blindrf_shared::{Button, Decoder, Registry};

mod playback;
mod transmit;

#[derive(Debug, StructOpt)]
#[structopt(name = "blindrf", about = "Blind remote 433 MHz command tool")]
struct Opt {
    #[structopt(short, long)]
    debug: bool,
    /// JSON list of {"remote_id", "name"} records to name remotes
    #[structopt(long = "remotes", parse(from_os_str))]
    remotes: Option<PathBuf>,
    #[structopt(subcommand)]
    cmd: CliCommand,
}

#[derive(StructOpt, Debug)]
enum CliCommand {
    /// Print the payloads a remote sends for a button press
    Transmit {
        /// Remote id, 0x93 or 147
        #[structopt(parse(try_from_str = parse_remote_id))]
        remote: u8,
        /// CC or 0-16
        channel: Channel,
        /// up down stop trailer
        button: Button,
        #[structopt(long)]
        json: bool,
    },
    /// Decode captured codes. Reads the capture file, or stdin, when no codes are given
    Decode {
        codes: Vec<String>,
        #[structopt(short, long, parse(from_os_str))]
        file: Option<PathBuf>,
        #[structopt(long)]
        json: bool,
    },
    /// Channel field and offset for every channel
    Table,
    /// List known remotes
    Remotes,
}

fn main() -> anyhow::Result<()> {
    let opt = Opt::from_args();

    let loglevel = if opt.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new().filter_level(loglevel).init();

    let remotes = load_remotes(opt.remotes.as_ref())?;

    match opt.cmd {
        CliCommand::Transmit {
            remote,
            channel,
            button,
            json,
        } => transmit::transmit(&remotes, remote, channel, button, json),
        CliCommand::Decode { codes, file, json } => {
            let decoder = Decoder::new(remotes);
            if codes.is_empty() {
                playback::command_playback(&decoder, file.as_deref(), json)
            } else {
                playback::command_codes(&decoder, &codes, json)
            }
        }
        CliCommand::Table => {
            transmit::print_table();
            Ok(())
        }
        CliCommand::Remotes => {
            for remote in remotes.iter() {
                println!("0x{:02x}\t{}", remote.remote_id, remote.name);
            }
            Ok(())
        }
    }
}

fn load_remotes(path: Option<&PathBuf>) -> anyhow::Result<Registry> {
    let mut remotes = Registry::builtin();

    if let Some(path) = path {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let count = remotes
            .extend_from_json(&json)
            .with_context(|| format!("failed to load remotes from {}", path.display()))?;
        log::info!("Loaded {} remotes from {}", count, path.display());
    }

    Ok(remotes)
}
