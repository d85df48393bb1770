use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use pv_catalog::Catalog;
use pv_navigation::{
    hierarchy, AppState, Clipboard, CollaboratorError, MemoryPreferenceStore, SearchMode,
    SystemPreference, ViewerConfig,
};
use std::io::{self, Write};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Clipboard that prints what it is given
struct WriterClipboard<W: Write>(W);

impl<W: Write> Clipboard for WriterClipboard<W> {
    fn write(&mut self, text: &str) -> Result<(), CollaboratorError> {
        writeln!(self.0, "{text}").map_err(|e| CollaboratorError::Clipboard(e.to_string()))
    }
}

fn cli() -> Command {
    Command::new("pv-viewer")
        .version(pv_navigation::VERSION)
        .about("Browse, search and link the policy example catalog")
        .subcommand_required(true)
        .arg(
            Arg::new("catalog")
                .long("catalog")
                .global(true)
                .value_name("FILE")
                .help("JSON catalog to load instead of the bundled one"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("FILE")
                .help("TOML viewer configuration"),
        )
        .subcommand(
            Command::new("index")
                .about("List the addressed hierarchy")
                .arg(
                    Arg::new("filter")
                        .long("filter")
                        .value_name("QUERY")
                        .default_value("")
                        .help("Keep topics and entries whose name or description matches"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the filtered catalog as JSON"),
                ),
        )
        .subcommand(
            Command::new("show")
                .about("Render one section")
                .arg(Arg::new("address").required(true).help("Section address"))
                .arg(
                    Arg::new("raw")
                        .long("raw")
                        .action(ArgAction::SetTrue)
                        .help("Show raw text instead of compiled markdown"),
                )
                .arg(
                    Arg::new("dark")
                        .long("dark")
                        .action(ArgAction::SetTrue)
                        .help("Use the dark highlighting theme"),
                )
                .arg(
                    Arg::new("search")
                        .long("search")
                        .value_name("PATTERN")
                        .requires("replace")
                        .help("Text to find before rendering"),
                )
                .arg(
                    Arg::new("replace")
                        .long("replace")
                        .value_name("TEXT")
                        .requires("search")
                        .help("Replacement for every match"),
                )
                .arg(
                    Arg::new("literal")
                        .long("literal")
                        .action(ArgAction::SetTrue)
                        .help("Match the search text literally"),
                ),
        )
        .subcommand(
            Command::new("link")
                .about("Print a deep link to an address")
                .arg(Arg::new("address").required(true)),
        )
        .subcommand(
            Command::new("locate")
                .about("Print the breadcrumb for a location fragment")
                .arg(Arg::new("fragment").required(true)),
        )
}

fn required<'a>(args: &'a ArgMatches, name: &str) -> Result<&'a str> {
    args.get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("missing argument <{name}>"))
}

fn load_catalog(matches: &ArgMatches) -> Result<Catalog> {
    match matches.get_one::<String>("catalog") {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read catalog {path}"))?;
            Catalog::from_json(&json).with_context(|| format!("failed to load catalog {path}"))
        }
        None => Catalog::builtin().context("bundled catalog is invalid"),
    }
}

fn load_config(matches: &ArgMatches) -> Result<ViewerConfig> {
    match matches.get_one::<String>("config") {
        Some(path) => {
            let source = std::fs::read_to_string(Path::new(path))
                .with_context(|| format!("failed to read config {path}"))?;
            ViewerConfig::from_toml_str(&source).with_context(|| format!("invalid config {path}"))
        }
        None => Ok(ViewerConfig::default()),
    }
}

fn run(matches: &ArgMatches, out: &mut dyn Write) -> Result<()> {
    let catalog = load_catalog(matches)?;
    let mut config = load_config(matches)?;

    match matches.subcommand() {
        Some(("index", args)) => {
            let filtered = pv_navigation::filter(&catalog, required(args, "filter")?);

            if args.get_flag("json") {
                let json = serde_json::to_string_pretty(&filtered.to_topics())?;
                writeln!(out, "{json}")?;
                return Ok(());
            }

            for topic in hierarchy(&filtered) {
                writeln!(out, "{}  {}", topic.address, topic.name)?;
                for subtopic in &topic.subtopics {
                    writeln!(out, "  {}  {}", subtopic.address, subtopic.name)?;
                    for section in &subtopic.sections {
                        writeln!(out, "    {}  {}", section.address(), section.title)?;
                    }
                }
            }
        }
        Some(("show", args)) => {
            let address = required(args, "address")?;
            if args.get_flag("literal") {
                config = config.with_search_mode(SearchMode::Literal);
            }

            let mut state = AppState::new(catalog, config);
            let ambient = SystemPreference {
                dark: args.get_flag("dark"),
            };
            state.load_preferences(&MemoryPreferenceStore::new(), &ambient);
            if args.get_flag("raw") {
                state.toggle_raw();
            }

            if let (Some(search), Some(replacement)) = (
                args.get_one::<String>("search"),
                args.get_one::<String>("replace"),
            ) {
                state
                    .replace(address, search, replacement)
                    .with_context(|| format!("cannot replace in {address}"))?;
            }

            let renderer = state.config().build_renderer();
            let displayable = state
                .render_section(address, &renderer)
                .with_context(|| format!("cannot show {address}"))?;
            if displayable.degraded {
                tracing::warn!(address, "rendered as raw text");
            }
            writeln!(out, "{}", displayable.html)?;
        }
        Some(("link", args)) => {
            let address = required(args, "address")?;
            let mut state = AppState::new(catalog, config);
            let mut clipboard = WriterClipboard(&mut *out);
            state
                .copy_deep_link(address, &mut clipboard)
                .with_context(|| format!("cannot link {address}"))?;
            if let Some(notice) = state.take_notice() {
                tracing::info!("{notice}");
            }
        }
        Some(("locate", args)) => {
            let fragment = required(args, "fragment")?;
            let mut state = AppState::new(catalog, config);
            if !state.load_fragment(fragment) {
                bail!("fragment '{fragment}' does not resolve");
            }
            writeln!(out, "{}", state.breadcrumb())?;
        }
        _ => bail!("no command given"),
    }

    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let matches = cli().get_matches();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&matches, &mut out)
}
