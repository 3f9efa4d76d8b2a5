//! GRC dashboard summary cards CLI.
//!
//! Reads policy or finding payloads, aggregates them into summary cards and
//! prints the overview. Also exposes the view-state glue around the cards:
//! drill-down, the persisted card choice and the collapse toggle.

use clap::{Args, Parser, Subcommand, ValueEnum};
use grc_cards::{DrillDownTarget, EntityType};
use grc_common::{ActiveFilters, CardChoice, DisplayMode, Error, OutputFormat, Result};
use grc_config::{
    default_view_state_dir, load_config, FileViewStateStore, LoadedConfig, MemoryViewStateStore,
    ViewStateStore, POLICY_OVERVIEW_STATE_KEY,
};
use grc_core::exit_codes::ExitCode;
use grc_core::input::read_items;
use grc_core::logging::{generate_run_id, init_logging, LogConfig, LogLevel};
use grc_core::output::{error_line, error_response, Envelope};
use grc_core::render;
use grc_core::schema::{
    available_schemas, format_schema, generate_all_schemas, generate_schema, SchemaFormat,
};
use grc_view::{
    drill_down, select_and_save, toggle_card_collapse, CardChoiceOptions, OverviewContext,
    OverviewInput, ViewParams,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, error, warn};

#[derive(Parser)]
#[command(name = "grc-core")]
#[command(about = "Summary cards for governance, risk and compliance dashboards")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct GlobalOpts {
    /// Path to config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding persisted view state
    #[arg(long, global = true, env = "GRC_VIEW_STATE_DIR")]
    view_state_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate items into summary cards
    Cards(CardsArgs),

    /// Narrow the dashboard to a clicked card tile
    DrillDown(DrillDownArgs),

    /// Read or change the persisted card choice
    Choice(ChoiceArgs),

    /// Flip the collapsed state of the cards in a query string
    ToggleCard(ToggleArgs),

    /// Print JSON Schema for output types
    Schema(SchemaArgs),
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Cards(_) => "cards",
            Commands::DrillDown(_) => "drill-down",
            Commands::Choice(_) => "choice",
            Commands::ToggleCard(_) => "toggle-card",
            Commands::Schema(_) => "schema",
        }
    }
}

#[derive(Args, Debug)]
struct CardsArgs {
    /// JSON array of policies or findings (stdin when absent or `-`)
    #[arg(long)]
    items: Option<PathBuf>,

    /// Item kind: policy or finding
    #[arg(long, conflicts_with = "route")]
    mode: Option<String>,

    /// Page route; a trailing `findings` segment selects finding mode
    #[arg(long)]
    route: Option<String>,

    /// Classification to group by (default: persisted choice)
    #[arg(long)]
    choice: Option<String>,

    /// Active filter as kind=value (repeatable)
    #[arg(long = "filter")]
    filters: Vec<String>,

    /// Current page query string
    #[arg(long, default_value = "")]
    query: String,

    /// View-state key holding the card choice
    #[arg(long, default_value = POLICY_OVERVIEW_STATE_KEY)]
    key: String,
}

/// Tile that was clicked.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum EntityArg {
    Cluster,
    Policy,
    Finding,
    Severity,
}

impl From<EntityArg> for EntityType {
    fn from(arg: EntityArg) -> Self {
        match arg {
            EntityArg::Cluster => EntityType::Cluster,
            EntityArg::Policy => EntityType::Policy,
            EntityArg::Finding => EntityType::Finding,
            EntityArg::Severity => EntityType::Severity,
        }
    }
}

#[derive(Args, Debug)]
struct DrillDownArgs {
    /// Classification kind of the clicked card
    #[arg(long)]
    kind: String,

    /// Display name of the clicked card
    #[arg(long)]
    name: String,

    /// Tile that was clicked
    #[arg(long, value_enum)]
    entity: EntityArg,

    /// Currently active filter as kind=value (repeatable)
    #[arg(long = "filter")]
    filters: Vec<String>,

    /// Current page query string
    #[arg(long, default_value = "")]
    query: String,
}

#[derive(Args, Debug)]
struct ChoiceArgs {
    #[command(subcommand)]
    action: ChoiceCommand,
}

#[derive(Subcommand, Debug)]
enum ChoiceCommand {
    /// Show the persisted card choice
    Get {
        #[arg(long, default_value = POLICY_OVERVIEW_STATE_KEY)]
        key: String,
    },
    /// Persist a new card choice
    Set {
        /// categories or standards
        value: String,
        #[arg(long, default_value = POLICY_OVERVIEW_STATE_KEY)]
        key: String,
    },
}

#[derive(Args, Debug)]
struct ToggleArgs {
    /// Current page query string
    #[arg(default_value = "")]
    query: String,
}

#[derive(Args, Debug)]
struct SchemaArgs {
    /// Type name to print the schema of
    name: Option<String>,

    /// List available types
    #[arg(long)]
    list: bool,

    /// Print every schema
    #[arg(long, conflicts_with = "name")]
    all: bool,

    /// Single-line JSON
    #[arg(long)]
    compact: bool,
}

fn main() {
    let cli = parse_cli();

    let level = if cli.global.quiet {
        Some(LogLevel::Error)
    } else {
        match cli.global.verbose {
            0 => None,
            1 => Some(LogLevel::Debug),
            _ => Some(LogLevel::Trace),
        }
    };
    init_logging(&LogConfig::from_env(level, None));

    let run_id = generate_run_id();
    let command = cli.command.name();
    debug!(run_id = %run_id, command, "starting");

    let result = match &cli.command {
        Commands::Cards(args) => run_cards(&cli.global, &run_id, args),
        Commands::DrillDown(args) => run_drill_down(&cli.global, &run_id, args),
        Commands::Choice(args) => run_choice(&cli.global, &run_id, args),
        Commands::ToggleCard(args) => run_toggle(&cli.global, &run_id, args),
        Commands::Schema(args) => run_schema(&cli.global, args),
    };

    let code = match result {
        Ok(()) => ExitCode::Clean,
        Err(err) => {
            let code = ExitCode::from_error(&err);
            if code.is_internal_error() {
                error!(run_id = %run_id, command, code = %code, "{}", err);
            } else if code.is_user_error() {
                warn!(run_id = %run_id, command, code = %code, "{}", err);
            }
            report_error(cli.global.format, &run_id, command, &err);
            code
        }
    };
    std::process::exit(code.as_i32());
}

/// Failure report on stderr: a JSON body, or a headline line for humans.
fn report_error(format: OutputFormat, run_id: &str, command: &str, err: &Error) {
    match format {
        OutputFormat::Json => {
            let body = error_response(run_id, command, err);
            match serde_json::to_string_pretty(&body) {
                Ok(text) => eprintln!("{}", text),
                Err(_) => eprintln!("{}", err),
            }
        }
        OutputFormat::Md | OutputFormat::Summary => eprintln!("{}", error_line(err)),
        OutputFormat::Exitcode => {}
    }
}

/// Parse arguments; usage errors exit with the argument error code.
fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.use_stderr() => {
            let _ = err.print();
            std::process::exit(ExitCode::ArgsError.as_i32());
        }
        Err(err) => err.exit(),
    }
}

fn load(global: &GlobalOpts) -> Result<LoadedConfig> {
    Ok(load_config(global.config.as_deref())?)
}

/// View-state store: CLI directory, then config, then the platform default.
fn open_store(global: &GlobalOpts, loaded: &LoadedConfig) -> Box<dyn ViewStateStore> {
    let dir = global
        .view_state_dir
        .clone()
        .or_else(|| loaded.config.view_state_dir.clone())
        .or_else(default_view_state_dir);
    match dir {
        Some(dir) => {
            debug!(dir = %dir.display(), "view state directory");
            Box::new(FileViewStateStore::new(dir))
        }
        None => Box::new(MemoryViewStateStore::new()),
    }
}

fn parse_filters(specs: &[String]) -> Result<ActiveFilters> {
    specs
        .iter()
        .try_fold(ActiveFilters::new(), |filters, spec| filters.with_spec(spec))
}

/// Print a payload in the requested format.
fn emit<T, M, S>(
    global: &GlobalOpts,
    run_id: &str,
    command: &str,
    payload: &T,
    markdown: M,
    summary: S,
) -> Result<()>
where
    T: Serialize,
    M: FnOnce() -> String,
    S: FnOnce() -> String,
{
    match global.format {
        OutputFormat::Json => {
            println!("{}", Envelope::new(run_id, command, payload).to_json_pretty()?)
        }
        OutputFormat::Md => print!("{}", markdown()),
        OutputFormat::Summary => println!("{}", summary()),
        OutputFormat::Exitcode => {}
    }
    Ok(())
}

fn run_cards(global: &GlobalOpts, run_id: &str, args: &CardsArgs) -> Result<()> {
    let loaded = load(global)?;
    let store = open_store(global, &loaded);

    let mode = match (&args.mode, &args.route) {
        (Some(mode), _) => mode.parse::<DisplayMode>()?,
        (None, Some(route)) => DisplayMode::from_path(route),
        (None, None) => DisplayMode::default(),
    };
    let choice = match &args.choice {
        Some(choice) => choice.parse::<CardChoice>()?,
        None => store
            .load(&args.key)
            .card_choice_or(loaded.config.default_choice()),
    };
    let filters = parse_filters(&args.filters)?;
    let params = ViewParams::parse(&args.query);
    let items = read_items(args.items.as_deref(), mode)?;

    let context = OverviewContext::new(loaded.config.catalog());
    let overview = context.build(&OverviewInput {
        items: &items,
        filters: &filters,
        choice,
        params: &params,
    });

    emit(
        global,
        run_id,
        "cards",
        &overview,
        || render::overview_markdown(&overview),
        || render::overview_summary(&overview, run_id),
    )
}

fn run_drill_down(global: &GlobalOpts, run_id: &str, args: &DrillDownArgs) -> Result<()> {
    let target = DrillDownTarget {
        kind: args.kind.parse()?,
        display_name: args.name.clone(),
        entity: args.entity.into(),
    };
    let filters = parse_filters(&args.filters)?;
    let next = drill_down(&filters, &target, &args.query);

    emit(
        global,
        run_id,
        "drill-down",
        &next,
        || render::drill_down_markdown(&next),
        || format!("[{}] drill-down: ?{}", run_id, next.query),
    )
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChoiceReport {
    key: String,
    choice: CardChoice,
    label: String,
    selected_index: usize,
    persisted: bool,
}

fn run_choice(global: &GlobalOpts, run_id: &str, args: &ChoiceArgs) -> Result<()> {
    let loaded = load(global)?;
    let store = open_store(global, &loaded);
    let options = CardChoiceOptions::new(&loaded.config.catalog());

    let (key, state) = match &args.action {
        ChoiceCommand::Get { key } => (key, store.load(key)),
        ChoiceCommand::Set { value, key } => {
            let choice = value.parse::<CardChoice>()?;
            (key, select_and_save(&*store, key, choice)?)
        }
    };

    let choice = state.card_choice_or(loaded.config.default_choice());
    let report = ChoiceReport {
        key: key.clone(),
        choice,
        label: options.selected_label(choice).to_string(),
        selected_index: options.selected_index(choice),
        persisted: state.grc_card_choice.is_some(),
    };

    emit(
        global,
        run_id,
        "choice",
        &report,
        || format!("# Card choice\n\n**{}** ({})\n", report.label, report.choice),
        || format!("[{}] choice: {}", run_id, report.choice),
    )
}

#[derive(Serialize)]
struct ToggleReport {
    query: String,
    params: ViewParams,
}

fn run_toggle(global: &GlobalOpts, run_id: &str, args: &ToggleArgs) -> Result<()> {
    let query = toggle_card_collapse(&args.query);
    let report = ToggleReport {
        params: ViewParams::parse(&query),
        query,
    };

    emit(
        global,
        run_id,
        "toggle-card",
        &report,
        || format!("`?{}`\n", report.query),
        || format!("[{}] toggle-card: ?{}", run_id, report.query),
    )
}

fn run_schema(global: &GlobalOpts, args: &SchemaArgs) -> Result<()> {
    let format = if args.compact {
        SchemaFormat::JsonCompact
    } else {
        SchemaFormat::Json
    };

    if args.all {
        let all = generate_all_schemas();
        let value = serde_json::to_value(&all)?;
        println!("{}", format_schema(&value, format)?);
        return Ok(());
    }

    match (&args.name, args.list) {
        (Some(name), false) => {
            let schema =
                generate_schema(name).ok_or_else(|| Error::UnknownSchema(name.clone()))?;
            println!("{}", format_schema(&schema, format)?);
        }
        _ => {
            if global.format == OutputFormat::Json {
                let list: Vec<_> = available_schemas()
                    .into_iter()
                    .map(|(name, description)| {
                        serde_json::json!({ "name": name, "description": description })
                    })
                    .collect();
                println!("{}", format_schema(&serde_json::Value::Array(list), format)?);
            } else {
                for (name, description) in available_schemas() {
                    println!("{:<20} {}", name, description);
                }
            }
        }
    }
    Ok(())
}
