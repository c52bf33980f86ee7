mod commands;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "girder",
    version,
    about = "Construction design recommendations from site conditions"
)]
struct Cli {
    /// JSON rule file
    #[arg(
        short,
        long,
        global = true,
        env = "GIRDER_RULES",
        default_value = "knowledge_base/construction_rules.json"
    )]
    rules: PathBuf,

    /// Log engine activity to stderr (overridden by GIRDER_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend concrete grade, steel diameter and beam size for a site
    Evaluate {
        /// Soil type (e.g., Clay, Sand, Rock)
        #[arg(long)]
        soil_type: Option<String>,

        /// Load-bearing capacity in kPa
        #[arg(long)]
        load_capacity: Option<String>,

        /// Moisture content in %
        #[arg(long)]
        moisture: Option<String>,

        /// Number of floors
        #[arg(long)]
        floors: Option<String>,

        /// Area in square metres
        #[arg(long)]
        area: Option<String>,

        /// Wind speed in km/h, a single value or a range like 30-40
        #[arg(long)]
        wind_speed: Option<String>,

        /// Environment (e.g., Normal, Coastal, Corrosive)
        #[arg(long)]
        environment: Option<String>,

        /// Additional criteria as FIELD=VALUE
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        extra: Vec<String>,

        /// Evaluate against the built-in rules instead of the rule file
        #[arg(long)]
        builtin: bool,

        /// List the rules that disagree with the input, and on which fields
        #[arg(long)]
        explain: bool,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Manage and inspect the rule file
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },
    /// Record feedback on a recommendation
    Feedback {
        /// Whether the recommendation was useful
        #[arg(long, value_enum)]
        rating: RatingArg,

        /// Job role of the person giving feedback
        #[arg(long)]
        role: String,

        /// Free-text comment
        #[arg(long)]
        note: Option<String>,

        /// Feedback log file (JSON lines)
        #[arg(
            long,
            env = "GIRDER_FEEDBACK_LOG",
            default_value = "knowledge_base/feedback.jsonl"
        )]
        log: PathBuf,
    },
}

#[derive(Subcommand)]
enum RulesAction {
    /// List the rules in store order
    List,
    /// Add a rule from a JSON file containing one {"if": ..., "then": ...} object
    Add {
        file: PathBuf,
    },
    /// Remove the rule at a position shown by `rules list`
    Remove {
        index: usize,
    },
    /// Validate a rule file (defaults to --rules)
    Validate {
        file: Option<PathBuf>,
    },
    /// Write the built-in construction rules to the rule file
    Init {
        /// Overwrite an existing rule file
        #[arg(long)]
        force: bool,
    },
    /// Describe the rule file format
    Schema,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum RatingArg {
    Positive,
    Negative,
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "girder_core=debug,girder=debug,warn"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_env("GIRDER_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Evaluate {
            soil_type,
            load_capacity,
            moisture,
            floors,
            area,
            wind_speed,
            environment,
            extra,
            builtin,
            explain,
            output,
        } => {
            let input = commands::evaluate::SiteInput {
                soil_type,
                load_capacity,
                moisture,
                floors,
                area,
                wind_speed,
                environment,
                extra,
            };
            commands::evaluate::run(&cli.rules, input, builtin, explain, &output)
        }
        Commands::Rules { action } => match action {
            RulesAction::List => commands::rules::list(&cli.rules),
            RulesAction::Add { file } => commands::rules::add(&cli.rules, &file),
            RulesAction::Remove { index } => commands::rules::remove(&cli.rules, index),
            RulesAction::Validate { file } => {
                commands::rules::validate(file.as_deref().unwrap_or(&cli.rules))
            }
            RulesAction::Init { force } => commands::rules::init(&cli.rules, force),
            RulesAction::Schema => commands::rules::schema(),
        },
        Commands::Feedback {
            rating,
            role,
            note,
            log,
        } => commands::feedback::run(&log, rating, role, note),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
