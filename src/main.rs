use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use facadekit::commands;
use facadekit::{connect_with_retry, init_logging, Config, FileConnector, ShapeSetKind};
use std::path::PathBuf;

fn cli() -> Command {
    Command::new("facadekit")
        .version(facadekit::VERSION)
        .about("Parametric facade geometry and CAD document maintenance")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Configuration file (.toml or .json)"),
        )
        .arg(
            Arg::new("document")
                .long("document")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Drawing document file; overrides connection.document"),
        )
        .subcommand(
            Command::new("draw")
                .about("Generate the facade and summarise it")
                .arg(
                    Arg::new("dxf")
                        .long("dxf")
                        .value_parser(value_parser!(PathBuf))
                        .help("Also write the geometry to a DXF file"),
                ),
        )
        .subcommand(
            Command::new("send")
                .about("Send generated shapes to a layer")
                .arg(Arg::new("layer").required(true).help("Target layer"))
                .arg(
                    Arg::new("set")
                        .long("set")
                        .action(ArgAction::Append)
                        .value_parser(value_parser!(ShapeSetKind))
                        .help("Shape set to send (windows, doors, valleys, stair-windows, outline)"),
                )
                .arg(
                    Arg::new("replace")
                        .long("replace")
                        .action(ArgAction::SetTrue)
                        .help("Clear the layer before sending"),
                ),
        )
        .subcommand(
            Command::new("clear")
                .about("Delete every object on a layer")
                .arg(Arg::new("layer").required(true).help("Layer to clear")),
        )
        .subcommand(
            Command::new("audit")
                .about("Audit layers, hide external references and report statistics")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                )
                .arg(
                    Arg::new("save")
                        .long("save")
                        .action(ArgAction::SetTrue)
                        .help("Save the report to the output directory"),
                ),
        )
        .subcommand(
            Command::new("repair-geometry")
                .about("Join lines and close open polylines")
                .arg(
                    Arg::new("save")
                        .long("save")
                        .action(ArgAction::SetTrue)
                        .help("Save the repaired document"),
                ),
        )
        .subcommand(Command::new("normalize-viewports").about("Show, scale and lock layout viewports"))
        .subcommand(
            Command::new("init-config")
                .about("Write a default configuration file")
                .arg(
                    Arg::new("path")
                        .value_parser(value_parser!(PathBuf))
                        .help("Where to write it (default: platform config directory)"),
                ),
        )
}

fn run_on_document(
    config: &Config,
    matches: &ArgMatches,
    name: &str,
    args: &ArgMatches,
) -> anyhow::Result<()> {
    let document = matches
        .get_one::<PathBuf>("document")
        .cloned()
        .or_else(|| config.connection.document.clone())
        .context("No document given: pass --document or set connection.document")?;

    let mut connector = FileConnector::new(document).create_if_missing(name == "send");
    let mut doc = connect_with_retry(&mut connector, &config.retry_policy())?;

    let mut persist = true;
    let output = match name {
        "send" => {
            let layer = args.get_one::<String>("layer").context("missing layer")?;
            let sets: Vec<ShapeSetKind> = args
                .get_many::<ShapeSetKind>("set")
                .map(|values| values.copied().collect())
                .unwrap_or_default();
            commands::send(config, &mut doc, layer, &sets, args.get_flag("replace"))?
        }
        "clear" => {
            let layer = args.get_one::<String>("layer").context("missing layer")?;
            commands::clear(config, &mut doc, layer)?
        }
        "audit" => commands::audit(
            config,
            &mut doc,
            args.get_flag("json"),
            args.get_flag("save"),
        )?,
        "repair-geometry" => {
            persist = args.get_flag("save");
            commands::repair_geometry(config, &mut doc, persist)?
        }
        "normalize-viewports" => commands::normalize_viewports(config, &mut doc)?,
        other => anyhow::bail!("Unknown command: {}", other),
    };

    if persist {
        connector.save(doc)?;
    }
    print!("{}", output);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    tracing::debug!(version = facadekit::VERSION, built = facadekit::BUILD_DATE, "Starting");

    let matches = cli().get_matches();

    if let Some(("init-config", args)) = matches.subcommand() {
        let path = commands::init_config(args.get_one::<PathBuf>("path").map(PathBuf::as_path))?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    let config_path = matches.get_one::<PathBuf>("config").map(PathBuf::as_path);
    let config = Config::load_or_default(config_path).context("Invalid configuration")?;

    match matches.subcommand() {
        Some(("draw", args)) => {
            let dxf = args.get_one::<PathBuf>("dxf").map(PathBuf::as_path);
            print!("{}", commands::draw(&config, dxf)?);
            Ok(())
        }
        Some((name, args)) => run_on_document(&config, &matches, name, args),
        None => Ok(()),
    }
}
