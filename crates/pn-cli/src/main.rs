use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use pn_cli::{commands, logging, CliConfig};
use pn_shortlink::{ShortLinkStore, ShortenRequest};
use std::io::Read;
use std::path::PathBuf;

fn cli() -> Command {
    Command::new("pn")
        .version(pn_cli::VERSION)
        .about("Plate Notation: compact sharing of assay plate layouts")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Configuration file (default: ./pn.toml if present)"),
        )
        .arg(
            Arg::new("data")
                .long("data")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Short-link store file (overrides config and PN_DATA_PATH)"),
        )
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .global(true)
                .help("Base URL for share links"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON"),
        )
        .subcommand(
            Command::new("encode")
                .about("Encode a JSON plate grid into notation")
                .arg(
                    Arg::new("input")
                        .help("JSON file with {\"plateType\", \"wells\"}; '-' or omitted reads stdin"),
                )
                .arg(
                    Arg::new("url")
                        .long("url")
                        .action(ArgAction::SetTrue)
                        .help("Print a share URL instead of the bare notation"),
                ),
        )
        .subcommand(
            Command::new("decode")
                .about("Decode a notation string into JSON")
                .arg(Arg::new("notation").help("Notation; omitted reads stdin")),
        )
        .subcommand(
            Command::new("stats")
                .about("Show size statistics for a notation string")
                .arg(Arg::new("notation").help("Notation; omitted reads stdin")),
        )
        .subcommand(
            Command::new("parse-url")
                .about("Decode the layout carried by a share URL")
                .arg(Arg::new("share-url").required(true).help("Share URL")),
        )
        .subcommand(
            Command::new("shorten")
                .about("Create a short link for a notation or share URL")
                .arg(Arg::new("notation").help("Notation to shorten"))
                .arg(
                    Arg::new("url")
                        .long("url")
                        .help("Share URL to take the notation from"),
                ),
        )
        .subcommand(
            Command::new("resolve")
                .about("Look up the notation behind a short id")
                .arg(Arg::new("id").required(true).help("Short id"))
                .arg(
                    Arg::new("redirect")
                        .long("redirect")
                        .action(ArgAction::SetTrue)
                        .help("Print the redirect target instead"),
                ),
        )
        .subcommand(Command::new("list").about("List stored short links"))
}

fn read_stdin() -> anyhow::Result<String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read stdin")?;
    Ok(buf)
}

/// Literal argument value, or stdin when absent
fn arg_or_stdin(args: &ArgMatches, name: &str) -> anyhow::Result<String> {
    match args.get_one::<String>(name) {
        Some(value) if value != "-" => Ok(value.clone()),
        _ => read_stdin(),
    }
}

fn load_config(matches: &ArgMatches) -> anyhow::Result<CliConfig> {
    let explicit = matches.get_one::<PathBuf>("config");
    Ok(CliConfig::load(explicit.map(PathBuf::as_path))?
        .with_data_path_override(matches.get_one::<PathBuf>("data").cloned())
        .with_base_url_override(matches.get_one::<String>("base-url").cloned()))
}

async fn run(matches: &ArgMatches) -> anyhow::Result<String> {
    let config = load_config(matches)?;
    let base_url = config.share.base_url.as_deref();

    match matches.subcommand() {
        Some(("encode", args)) => {
            let raw = match args.get_one::<String>("input") {
                Some(path) if path != "-" => std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {path}"))?,
                _ => read_stdin()?,
            };
            commands::encode(&raw, args.get_flag("url"), base_url)
        }
        Some(("decode", args)) => commands::decode(&arg_or_stdin(args, "notation")?),
        Some(("stats", args)) => commands::stats(&arg_or_stdin(args, "notation")?),
        Some(("parse-url", args)) => {
            let url = args
                .get_one::<String>("share-url")
                .context("missing share URL")?;
            commands::parse_url(url)
        }
        Some(("shorten", args)) => {
            let request = ShortenRequest {
                notation: args.get_one::<String>("notation").cloned(),
                url: args.get_one::<String>("url").cloned(),
            };
            let store = ShortLinkStore::new(config.store.clone());
            commands::shorten(&store, &request, base_url).await
        }
        Some(("resolve", args)) => {
            let id = args.get_one::<String>("id").context("missing short id")?;
            let store = ShortLinkStore::new(config.store.clone());
            commands::resolve(&store, id, args.get_flag("redirect")).await
        }
        Some(("list", _)) => {
            let store = ShortLinkStore::new(config.store.clone());
            Ok(commands::list(&store).await)
        }
        _ => anyhow::bail!("unknown command"),
    }
}

#[tokio::main]
async fn main() {
    let matches = cli().get_matches();
    logging::init(matches.get_count("verbose"), matches.get_flag("log-json"));

    match run(&matches).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
        }
        Err(e) => {
            tracing::debug!("Command failed: {:?}", e);
            eprintln!("error: {e:#}");
            std::process::exit(1);
        }
    }
}
