use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use serde_json::Value as JsonValue;
use simcfg_core::SchemaError;
use simcfg_scenario::{LayoutHint, Scenario};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    let file = Arg::new("file")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Scenario file (.yaml, .yml or .json)");
    let json = Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output as JSON");
    let layout = Arg::new("layout")
        .long("layout")
        .default_value("infer")
        .value_parser(["current", "legacy", "infer"])
        .help("Layout of the input file");

    Command::new("simcfg")
        .version(simcfg_scenario::VERSION)
        .about("Validate and migrate scenario configuration files")
        .subcommand_required(true)
        .subcommand(
            Command::new("check")
                .about("Validate a scenario file and print its error tree")
                .arg(file.clone())
                .arg(layout.clone())
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .action(ArgAction::SetTrue)
                        .help("Treat a failing scenario as an error"),
                )
                .arg(json.clone()),
        )
        .subcommand(
            Command::new("hash")
                .about("Print the content hash of a scenario file")
                .arg(file.clone())
                .arg(layout)
                .arg(
                    Arg::new("short")
                        .long("short")
                        .action(ArgAction::SetTrue)
                        .help("Print only the first 16 hex characters"),
                )
                .arg(json.clone()),
        )
        .subcommand(
            Command::new("defaults")
                .about("Print the default scenario")
                .arg(json.clone()),
        )
        .subcommand(
            Command::new("migrate")
                .about("Rewrite a scenario file in the current layout")
                .arg(file)
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_parser(value_parser!(PathBuf))
                        .help("Write here instead of stdout"),
                )
                .arg(json),
        )
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();
    match matches.subcommand() {
        Some(("check", args)) => check(args),
        Some(("hash", args)) => hash(args),
        Some(("defaults", args)) => defaults(args),
        Some(("migrate", args)) => migrate(args),
        _ => Ok(ExitCode::FAILURE),
    }
}

fn check(args: &ArgMatches) -> Result<ExitCode> {
    let path = required_path(args, "file")?;
    let hint = layout_hint(args);
    let strict = args.get_flag("strict");
    let document = read_document(path)?;
    let data = document
        .as_object()
        .with_context(|| format!("{} is not a mapping", path.display()))?;

    let scenario = match Scenario::create(data, hint, strict) {
        Ok(scenario) => scenario,
        Err(SchemaError::Validation(err)) => {
            print_tree(err.tree(), args.get_flag("json"))?;
            anyhow::bail!("{} failed validation", path.display());
        }
        Err(err) => return Err(err).context("failed to build scenario"),
    };

    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&scenario.to_error_tree())?);
    } else {
        print!("{}", scenario.report());
    }
    Ok(if scenario.is_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn hash(args: &ArgMatches) -> Result<ExitCode> {
    let path = required_path(args, "file")?;
    let document = read_document(path)?;
    let scenario = Scenario::create_from_value(&document, layout_hint(args))
        .with_context(|| format!("failed to build scenario from {}", path.display()))?;
    let hash = scenario.content_hash();

    if args.get_flag("json") {
        let output = serde_json::json!({"content_hash": hash, "passed": scenario.is_passed()});
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if args.get_flag("short") {
        println!("{}", hash.short());
    } else {
        println!("{hash}");
    }
    Ok(ExitCode::SUCCESS)
}

fn defaults(args: &ArgMatches) -> Result<ExitCode> {
    let scenario = Scenario::new()?;
    let rendered = if args.get_flag("json") {
        scenario.to_json()?
    } else {
        scenario.to_yaml()?
    };
    println!("{rendered}");
    Ok(ExitCode::SUCCESS)
}

fn migrate(args: &ArgMatches) -> Result<ExitCode> {
    let path = required_path(args, "file")?;
    let document = read_document(path)?;
    let data = document
        .as_object()
        .with_context(|| format!("{} is not a mapping", path.display()))?;

    let scenario = Scenario::create_from_mapping(data, LayoutHint::Infer)?;
    if !scenario.is_passed() {
        tracing::warn!(file = %path.display(), "migrated scenario does not pass validation");
        eprint!("{}", scenario.report());
    }

    let rendered = if args.get_flag("json") {
        scenario.to_json()?
    } else {
        scenario.to_yaml()?
    };
    match args.get_one::<PathBuf>("output") {
        Some(output) => fs::write(output, rendered)
            .with_context(|| format!("failed to write {}", output.display()))?,
        None => println!("{rendered}"),
    }
    Ok(ExitCode::SUCCESS)
}

fn layout_hint(args: &ArgMatches) -> LayoutHint {
    match args.get_one::<String>("layout").map(String::as_str) {
        Some("current") => LayoutHint::Current,
        Some("legacy") => LayoutHint::Legacy,
        _ => LayoutHint::Infer,
    }
}

fn required_path<'a>(args: &'a ArgMatches, name: &str) -> Result<&'a Path> {
    args.get_one::<PathBuf>(name)
        .map(PathBuf::as_path)
        .with_context(|| format!("missing argument <{name}>"))
}

fn read_document(path: &Path) -> Result<JsonValue> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let document = if is_json {
        serde_json::from_str(&text).with_context(|| format!("invalid JSON in {}", path.display()))?
    } else if text.trim().is_empty() {
        JsonValue::Object(serde_json::Map::new())
    } else {
        serde_yaml::from_str(&text).with_context(|| format!("invalid YAML in {}", path.display()))?
    };
    Ok(document)
}

fn print_tree(tree: &JsonValue, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(tree)?);
    } else {
        print!("{}", serde_yaml::to_string(tree)?);
    }
    Ok(())
}
