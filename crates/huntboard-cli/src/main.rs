#![forbid(unsafe_code)]

mod cmd;
mod output;
mod resolve;
mod session;

use clap::{CommandFactory, Parser, Subcommand};
use output::{OutputMode, resolve_output_mode};
use session::Session;
use std::env;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "huntboard: kanban board for a targeted job search",
    long_about = None
)]
struct Cli {
    /// Enable debug logging for huntboard.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Output format: pretty, text or json.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Directory holding board data and config.toml. Defaults to
    /// $HUNTBOARD_DIR, then the platform data directory.
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Cards",
        about = "Add a job target",
        long_about = "Create a job target card. New cards start in targets-identified with medium priority unless told otherwise.",
        after_help = "EXAMPLES:\n    # Add a company\n    hb add \"Acme Corp\"\n\n    # Add with role, priority and tags\n    hb add \"Acme Corp\" --role \"Staff Engineer\" --priority high --tag remote\n\n    # Emit machine-readable output\n    hb add \"Acme Corp\" --json"
    )]
    Add(cmd::add::AddArgs),

    #[command(
        next_help_heading = "Read",
        about = "List job targets",
        long_about = "List job targets with optional search, filters and sort order. Archived cards are hidden unless --archived is given.",
        after_help = "EXAMPLES:\n    # List everything, most recently updated first\n    hb list\n\n    # High-priority cards tagged remote\n    hb list --priority high --tag remote\n\n    # Use the saved search and filters\n    hb list --use-prefs\n\n    # Emit machine-readable output\n    hb list --json"
    )]
    List(cmd::list::ListArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show the board",
        long_about = "Show every column in pipeline order with the cards it holds.",
        after_help = "EXAMPLES:\n    # Show the board\n    hb board\n\n    # Ignore collapsed columns\n    hb board --expand"
    )]
    Board(cmd::board::BoardArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show one job target",
        long_about = "Show full details for a single job target, including follow-ups, outreach and warm-up history.",
        after_help = "EXAMPLES:\n    # Show a card\n    hb show jt_1739980800000_k2j9x1a\n\n    # Use a unique suffix\n    hb show k2j9x1a"
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        next_help_heading = "Cards",
        about = "Edit a job target",
        long_about = "Change fields on an existing job target. Only the fields given are touched.",
        after_help = "EXAMPLES:\n    # Raise priority and replace tags\n    hb edit k2j9x1a --priority high --tag remote --tag fintech\n\n    # Record the interview stage\n    hb edit k2j9x1a --stage technical\n\n    # Add a key person\n    hb edit k2j9x1a --person \"Dana Lee=Hiring Manager\""
    )]
    Edit(cmd::edit::EditArgs),

    #[command(
        next_help_heading = "Cards",
        about = "Move a job target to another column",
        after_help = "EXAMPLES:\n    # Start outreach\n    hb move k2j9x1a outreach-initiated"
    )]
    Move(cmd::move_cmd::MoveArgs),

    #[command(
        next_help_heading = "Cards",
        about = "Delete a job target",
        after_help = "EXAMPLES:\n    hb delete k2j9x1a"
    )]
    Delete(cmd::delete::DeleteArgs),

    #[command(
        next_help_heading = "Cards",
        about = "Archive a job target",
        long_about = "Hide a job target from default views. Use --undo to bring it back.",
        after_help = "EXAMPLES:\n    # Archive\n    hb archive k2j9x1a\n\n    # Unarchive\n    hb archive k2j9x1a --undo"
    )]
    Archive(cmd::archive::ArchiveArgs),

    #[command(
        name = "follow-up",
        next_help_heading = "Activity",
        about = "Schedule or complete follow-ups",
        after_help = "EXAMPLES:\n    # Follow up in a week\n    hb follow-up add k2j9x1a \"Ping recruiter\" --on +1w\n\n    # Mark it done\n    hb follow-up done k2j9x1a 3f2a"
    )]
    FollowUp(cmd::follow_up::FollowUpArgs),

    #[command(
        next_help_heading = "Activity",
        about = "Log outreach attempts and responses",
        after_help = "EXAMPLES:\n    # Log a referral request\n    hb outreach add k2j9x1a --type referral-request --contact \"Sam\" --referrer \"Alex\"\n\n    # Record the reply\n    hb outreach respond k2j9x1a 9c41"
    )]
    Outreach(cmd::outreach::OutreachArgs),

    #[command(
        name = "warm-up",
        next_help_heading = "Activity",
        about = "Record warm-up actions",
        after_help = "EXAMPLES:\n    hb warm-up add k2j9x1a \"Commented on launch post\" --type comment --impact 15"
    )]
    WarmUp(cmd::warm_up::WarmUpArgs),

    #[command(
        next_help_heading = "Metadata",
        about = "Manage tags",
        after_help = "EXAMPLES:\n    # List tags\n    hb tags\n\n    # Create a tag\n    hb tags create remote --color \"#4CAF50\"\n\n    # Delete a tag everywhere\n    hb tags delete remote"
    )]
    Tags(cmd::tags::TagsArgs),

    #[command(
        next_help_heading = "Metadata",
        about = "List board columns",
        after_help = "EXAMPLES:\n    hb columns --json"
    )]
    Columns(cmd::columns::ColumnsArgs),

    #[command(
        next_help_heading = "Metadata",
        about = "Show or change saved preferences",
        after_help = "EXAMPLES:\n    # Show\n    hb prefs\n\n    # Save a filter and sort order\n    hb prefs set --priority high --sort priority --direction desc\n\n    # Collapse a column on the board\n    hb prefs set --collapse stalled-cold\n\n    # Back to defaults\n    hb prefs reset"
    )]
    Prefs(cmd::prefs::PrefsArgs),

    #[command(
        next_help_heading = "Setup",
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n    hb completions bash > ~/.local/share/bash-completion/completions/hb"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("HUNTBOARD_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "huntboard=debug,info"
        } else {
            "huntboard=info,warn"
        })
    });

    let format = env::var("HUNTBOARD_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = cli.output_mode();

    if let Commands::Completions(args) = &cli.command {
        let mut command = Cli::command();
        return cmd::completions::run_completions(args.shell, &mut command);
    }

    let session = Session::open(cli.data_dir.as_deref()).inspect_err(|err| {
        let _ = output::render_error(
            output,
            &output::CliError::with_details(
                format!("{err:#}"),
                "Fix or remove config.toml in the data directory",
                huntboard_core::ErrorCode::ConfigParseError.code(),
            ),
        );
    })?;
    debug!(command = ?cli.command, "dispatching");

    match cli.command {
        Commands::Add(args) => cmd::add::run_add(args, output, &session),
        Commands::List(args) => cmd::list::run_list(args, output, &session),
        Commands::Board(ref args) => cmd::board::run_board(args, output, &session),
        Commands::Show(ref args) => cmd::show::run_show(args, output, &session),
        Commands::Edit(args) => cmd::edit::run_edit(args, output, &session),
        Commands::Move(ref args) => cmd::move_cmd::run_move(args, output, &session),
        Commands::Delete(ref args) => cmd::delete::run_delete(args, output, &session),
        Commands::Archive(ref args) => cmd::archive::run_archive(args, output, &session),
        Commands::FollowUp(args) => cmd::follow_up::run_follow_up(args, output, &session),
        Commands::Outreach(args) => cmd::outreach::run_outreach(args, output, &session),
        Commands::WarmUp(args) => cmd::warm_up::run_warm_up(args, output, &session),
        Commands::Tags(args) => cmd::tags::run_tags(args, output, &session),
        Commands::Columns(ref args) => cmd::columns::run_columns(args, output, &session),
        Commands::Prefs(args) => cmd::prefs::run_prefs(args, output, &session),
        Commands::Completions(_) => Ok(()),
    }
}
