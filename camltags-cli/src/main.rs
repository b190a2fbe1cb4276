//! Command-line interface for camltags
//! This binary writes tags for OCaml sources, as a tags file or in one of the other formats.
//!
//! Usage:
//!   camltags [OPTIONS] `<FILES>`...     - Tag the files, writing to stdout or --output
//!   camltags --list-kinds [--kinds L]   - List the declaration kinds and whether they are on

mod tagging;

use camltags_config::{CamltagsConfig, ConfigError, Loader, PROJECT_FILE};
use camltags_parser::ocaml::formats::{FormatRegistry, RenderOptions};
use camltags_parser::ocaml::{Kind, KindSet};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::io::Write;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn build_cli() -> Command {
    Command::new("camltags")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate tags for OCaml sources")
        .arg_required_else_help(true)
        .arg(
            Arg::new("files")
                .help("OCaml source files (.ml, .mli)")
                .num_args(1..)
                .required_unless_present("list-kinds"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format")
                .value_parser(["ctags", "xref", "json", "yaml", "tokens"]),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults and ./camltags.toml"),
        )
        .arg(
            Arg::new("kinds")
                .long("kinds")
                .help("Emit exactly these kinds, by letter (e.g. 'fvM'); see --list-kinds"),
        )
        .arg(
            Arg::new("local")
                .long("local")
                .help("Also tag parameters and local bindings")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-file-module")
                .long("no-file-module")
                .help("Do not tag each file with the module it defines")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-sort")
                .long("no-sort")
                .help("Keep tags in the order they were found")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-header")
                .long("no-header")
                .help("Omit the !_TAG_ preamble of tags files")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("max-depth")
                .long("max-depth")
                .help("Scope nesting tracked before scopes are dropped")
                .value_parser(value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Write to this file instead of stdout"),
        )
        .arg(
            Arg::new("list-kinds")
                .long("list-kinds")
                .help("List declaration kinds and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log more (-v debug, -vv trace); RUST_LOG takes precedence")
                .action(ArgAction::Count),
        )
}

fn main() {
    let matches = build_cli().get_matches();
    init_logging(matches.get_count("verbose"));

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if matches.get_flag("list-kinds") {
        print!("{}", list_kinds(&config));
        return;
    }

    let paths: Vec<String> = matches
        .get_many::<String>("files")
        .map(|files| files.cloned().collect())
        .unwrap_or_default();
    let output = matches.get_one::<String>("output").map(String::as_str);

    if !handle_tag_command(&paths, &config, output) {
        std::process::exit(1);
    }
}

/// `-v` raises the level, `RUST_LOG` replaces it
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Defaults, then `./camltags.toml`, then `--config`, then flags.
fn load_config(matches: &ArgMatches) -> Result<CamltagsConfig, String> {
    let mut loader = Loader::new().with_optional_file(PROJECT_FILE);
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }

    loader = apply_flags(loader, matches).map_err(|e| e.to_string())?;

    if let Some(letters) = matches.get_one::<String>("kinds") {
        let kinds = KindSet::from_letters(letters)
            .map_err(|letter| format!("unknown kind letter '{}' in --kinds", letter))?;
        loader = loader.with_kinds(kinds).map_err(|e| e.to_string())?;
    }

    loader.build().map_err(|e| e.to_string())
}

fn apply_flags(mut loader: Loader, matches: &ArgMatches) -> Result<Loader, ConfigError> {
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.set_override("output.format", format.as_str())?;
    }
    if matches.get_flag("local") {
        loader = loader.set_override("extraction.export_local_info", true)?;
    }
    if matches.get_flag("no-file-module") {
        loader = loader.set_override("extraction.file_module", false)?;
    }
    if matches.get_flag("no-sort") {
        loader = loader.set_override("output.sort", false)?;
    }
    if matches.get_flag("no-header") {
        loader = loader.set_override("output.header", false)?;
    }
    if let Some(depth) = matches.get_one::<u64>("max-depth") {
        loader = loader.set_override("extraction.max_scope_depth", *depth)?;
    }
    Ok(loader)
}

fn list_kinds(config: &CamltagsConfig) -> String {
    let mut listing = String::new();
    for kind in Kind::ALL {
        let state = if config.kinds.enabled(kind) { "on" } else { "off" };
        listing.push_str(&format!(
            "{}  {:<12} {:<4} {}\n",
            kind.letter(),
            kind.name(),
            state,
            kind.description()
        ));
    }
    listing
}

/// Tag `paths` and write the rendering. Returns false when anything failed.
fn handle_tag_command(paths: &[String], config: &CamltagsConfig, output: Option<&str>) -> bool {
    let run = tagging::tag_files(
        paths,
        &config.extract_options(),
        config.extraction.file_module,
    );

    for (path, err) in &run.failures {
        eprintln!("{}: {}", path, err);
    }
    for (path, diagnostic) in &run.diagnostics {
        eprintln!("{}: {}", path, diagnostic);
    }

    let options = RenderOptions {
        sort: config.output.sort,
        header: config.output.header,
    };
    let rendered = match FormatRegistry::with_defaults().serialize(
        &run.files,
        config.output.format.name(),
        &options,
    ) {
        Ok(rendered) => rendered,
        Err(e) => {
            eprintln!("Error formatting tags: {}", e);
            return false;
        }
    };

    if let Err(e) = write_output(output, &rendered) {
        eprintln!("Error writing output: {}", e);
        return false;
    }

    !run.has_failures()
}

fn write_output(output: Option<&str>, rendered: &str) -> std::io::Result<()> {
    match output {
        Some(path) => std::fs::write(Path::new(path), rendered),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()
        }
    }
}
