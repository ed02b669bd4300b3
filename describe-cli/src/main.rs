// Command-line interface for describe
//
// This binary renders endpoint documentation trees. Trees are produced by whatever introspects the
// web application; they reach this tool as JSON (the `json` format) and leave it as RST, HTML, or a
// tree visualization for debugging.
//
// The core capabilities use the describe-babel crate. This crate only wires files, configuration and
// logging around it.
//
// Converting:
//
// The conversion needs a to and from pair. The from can be auto-detected from the file extension, while being overwrittable by an explicit --from flag.
// Usage:
//  describe <input> --to <format> [--from <format>] [--output <file>]  - Convert (default)
//  describe convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above (explicit)
//  describe formats [--json]               - List available formats
//  describe generate-css                   - Print the baseline CSS embedded in HTML output
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the format.
// A following argument that starts with '-' is not taken as the value; the parameter becomes
// the flag value "true". Use --extra-<parameter-name>=<value> for such values.
// Example:
//  describe api.json --to rst --extra-section-chars '#*=' --extra-explicit-title
//  describe api.json --to rst --extra-section-chars=-=~
//
// Logging:
//
// Diagnostics (dangling doc.link targets, render progress) go to stderr through tracing. The filter
// comes from RUST_LOG (EnvFilter syntax), otherwise `warn`, or `debug` with --verbose.

use clap::{Arg, ArgAction, Command, ValueHint};
use describe_babel::formats::html::{HtmlFormat, BASELINE_CSS};
use describe_babel::formats::rst::settings::RstSettings;
use describe_babel::formats::rst::RstFormat;
use describe_babel::FormatRegistry;
use describe_config::{DescribeConfig, Loader, PROJECT_CONFIG_FILE};
use std::collections::HashMap;
use std::fs;
use tracing_subscriber::EnvFilter;

const SUBCOMMANDS: &[&str] = &["convert", "formats", "generate-css", "help"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        if let Some(key) = arg.strip_prefix("--extra-") {
            // `--extra-key=value` is the only way to pass a value starting with '-'
            if let Some((key, value)) = key.split_once('=') {
                extra_params.insert(key.to_string(), value.to_string());
                i += 1;
                continue;
            }

            let has_value = args.get(i + 1).is_some_and(|next| !next.starts_with('-'));

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("describe")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render endpoint documentation trees as reStructuredText or HTML")
        .long_about(
            "describe renders the documentation tree of a web application's endpoints.\n\n\
            Commands:\n  \
            - convert: Render a document tree (JSON) to rst, html, json or treeviz\n  \
            - formats: List the available formats\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n  \
            Values starting with '-' need the --extra-<name>=<value> form.\n\n\
            Examples:\n  \
            describe api.json --to rst                         # RST to stdout\n  \
            describe api.json --to html -o api.html            # HTML page\n  \
            describe api.json --to treeviz --extra-ast-full    # Inspect the tree",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a describe.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log debug diagnostics to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Render a document tree (default command)")
                .long_about(
                    "Render a document tree into another format.\n\n\
                    Formats:\n  \
                    - json:     Document tree exchange (.json), the only input format\n  \
                    - rst:      reStructuredText (.rst, .txt)\n  \
                    - html:     HTML page with embedded CSS (.html, .htm)\n  \
                    - treeviz:  Tree visualization (.tree)\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    describe convert api.json --to rst              # RST (stdout)\n  \
                    describe convert api.json --to html -o api.html # HTML file\n  \
                    describe api.json --to rst                      # 'convert' is optional",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .long_help(
                            "Target format to render to.\n\n\
                            Available formats: rst, html, json, treeviz\n\
                            Use the format name, not the file extension.",
                        )
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("formats")
                .about("List available formats")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the list as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("generate-css")
                .about("Output the baseline CSS used for HTML export")
                .long_about(
                    "Outputs the baseline CSS embedded in every HTML page.\n\n\
                    Use this as a starting point for custom styling: extra CSS given through\n\
                    [html] css_file in describe.toml (or --extra-css-file) is appended after it.",
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A leading file argument means the default command
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&cleaned_args[1].as_str())
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    init_tracing(matches.get_flag("verbose"));

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let to = sub_matches.get_one::<String>("to").expect("to is required");
            let registry = build_registry(&config);

            // Auto-detect --from if not provided
            let from = match sub_matches.get_one::<String>("from") {
                Some(f) => f.to_string(),
                None => match registry.detect_format_from_filename(input) {
                    Some(detected) => detected,
                    None => {
                        eprintln!("Error: Could not detect format from filename '{input}'");
                        eprintln!("Please specify --from explicitly");
                        std::process::exit(1);
                    }
                },
            };

            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(&registry, input, &from, to, output, &extra_params);
        }
        Some(("formats", sub_matches)) => {
            handle_formats_command(&build_registry(&config), sub_matches.get_flag("json"));
        }
        Some(("generate-css", _)) => {
            print!("{BASELINE_CSS}");
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Registry whose rst and html formats start from the loaded configuration.
fn build_registry(config: &DescribeConfig) -> FormatRegistry {
    let mut registry = FormatRegistry::default();
    registry.register(RstFormat::new(RstSettings::from(&config.rst)));

    let custom_css = config.html.css_file().map(|path| {
        fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Error reading CSS file '{}': {e}", path.display());
            std::process::exit(1);
        })
    });
    registry.register(HtmlFormat::new(config.html.options(custom_css)));
    registry
}

/// Handle the convert command
fn handle_convert_command(
    registry: &FormatRegistry,
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
) {
    // Validate formats exist
    if let Err(e) = registry.get(from) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let doc = registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });
    tracing::info!(input, from, to, nodes = doc.len(), "converting");

    let result = registry
        .serialize_with_options(&doc, to, extra_params)
        .unwrap_or_else(|e| {
            eprintln!("Render error: {e}");
            std::process::exit(1);
        });

    match output {
        Some(path) => {
            fs::write(path, result).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{result}"),
    }
}

/// Handle the formats command
fn handle_formats_command(registry: &FormatRegistry, as_json: bool) {
    let mut rows = Vec::new();
    for name in registry.list_formats() {
        let Ok(format) = registry.get(&name) else {
            continue;
        };
        rows.push(serde_json::json!({
            "name": name,
            "description": format.description(),
            "extensions": format.file_extensions(),
            "parse": format.supports_parsing(),
            "serialize": format.supports_serialization(),
        }));
    }

    if as_json {
        match serde_json::to_string_pretty(&rows) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    println!("Available formats:\n");
    for name in registry.list_formats() {
        let Ok(format) = registry.get(&name) else {
            continue;
        };
        let mut modes = Vec::new();
        if format.supports_parsing() {
            modes.push("parse");
        }
        if format.supports_serialization() {
            modes.push("serialize");
        }
        println!(
            "  {name:<10} {:<40} [{}]",
            format.description(),
            modes.join(", ")
        );
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> DescribeConfig {
    let loader = Loader::new().with_optional_file(PROJECT_CONFIG_FILE);
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

/// Extras that configure the CLI itself rather than a format.
fn apply_config_overrides(config: &mut DescribeConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(path) = extra_params.remove("css-file") {
        config.html.css_file = path;
    }
}
