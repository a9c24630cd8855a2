use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "

Maintenance CLI for the Nail Art booking app
License: MIT
Rust Edition: 2024"
);

#[derive(Parser)]
#[command(name = "nailfix")]
#[command(about = "Scripted booking app fixes with preview, backups, and rollback")]
#[command(long_about = "nailfix applies the studio's scripted maintenance fixes to the booking app.

Each fix is a named, ordered list of literal find-and-replace rules against
one source file. Every anchor is checked before it is replaced, so a fix can
be re-run safely: rules whose anchors are gone are reported and skipped
instead of corrupting the file.

FEATURES:
  • Automatic backups before every modification
  • Dry-run mode to preview changes
  • Easy rollback with one command
  • Colored diff output
  • Safe re-runs: already-applied rules are skipped

EXAMPLES:
  nailfix list                        Show the fix catalog
  nailfix login-phone                 Apply a fix (backup is taken first)
  nailfix -d calendar-auto-open       Preview a fix without modifying files
  nailfix -i login-connection         Ask for confirmation before applying
  nailfix check                       Bracket balance check on fix targets
  nailfix rollback                    Undo the most recent fix
  nailfix history                     Show applied-fix history")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_version = LONG_VERSION)]
#[command(propagate_version = true)]
struct Cli {
    /// Name of the fix to apply (see 'nailfix list')
    #[arg(value_name = "FIX")]
    fix: Option<String>,

    /// Dry run mode (preview changes without applying)
    #[arg(short = 'd', long, alias = "dry-run")]
    #[arg(help = "Preview changes without modifying files")]
    dry_run: bool,

    /// Interactive mode (ask before applying changes)
    #[arg(short = 'i', long)]
    #[arg(help = "Ask for confirmation before applying the fix.")]
    interactive: bool,

    /// Number of context lines to show (default: 2)
    #[arg(short = 'n', long, value_name = "NUM")]
    #[arg(
        help = "Number of context lines to show around changes\nUse 0 to show only changed lines (equivalent to --no-context)"
    )]
    context: Option<usize>,

    /// No context (show only changed lines)
    #[arg(long = "no-context", alias = "nc")]
    #[arg(help = "Show only changed lines without context\nEquivalent to --context=0")]
    no_context: bool,

    /// Skip backup creation (requires --force)
    #[arg(long = "no-backup", requires = "force")]
    #[arg(
        help = "Skip creating a backup (requires --force)\n⚠️  USE WITH CAUTION: Changes cannot be undone!\nRecommended only for files under version control"
    )]
    no_backup: bool,

    /// Force dangerous operations (use with --no-backup)
    #[arg(long = "force", requires = "no_backup")]
    #[arg(
        help = "Force dangerous operations (required for --no-backup)\nConfirms you understand the risks"
    )]
    force: bool,

    /// Custom backup directory
    #[arg(long, value_name = "DIR")]
    #[arg(
        help = "Use custom directory for backups\nDefault: ~/.nailfix/backups/\nUseful when backup partition is full"
    )]
    backup_dir: Option<String>,

    /// Root of the booking app checkout
    #[arg(long, value_name = "DIR", global = true)]
    #[arg(
        help = "Root of the booking app checkout\nFix targets like src/components/LoginPage.tsx are resolved against it.\nDefault: [project] root from config, else the current directory"
    )]
    root: Option<String>,

    /// Subcommands
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List available fixes
    #[command(long_about = "List every fix in the catalog.

Shows the fix name, the file it patches, a one-line summary, and the
number of rules it carries.

EXAMPLES:
  nailfix list                    Show the fix catalog")]
    List,

    /// Check bracket balance of the fix targets
    #[command(long_about = "Count braces and parentheses in every fix target.

A rule applied against a drifted anchor can leave a component with
unbalanced brackets. This check counts '{'/'}' and '('/')' per target
and flags any imbalance. It is a coarse character count, not a parser.

EXAMPLES:
  nailfix check                   Check all fix targets
  nailfix check --root ~/app      Check targets under a specific checkout")]
    Check,

    /// Rollback a previous fix
    #[command(long_about = "Restore files from a backup.

If no backup ID is specified, rolls back the most recent operation.
Use 'nailfix history' to see all available backups.

EXAMPLES:
  nailfix rollback                        Rollback last operation
  nailfix rollback 20250201-120000123-ab  Rollback specific backup")]
    Rollback {
        /// Backup ID to rollback (optional, defaults to last operation)
        #[arg(value_name = "ID")]
        id: Option<String>,
    },

    /// Show operation history
    #[command(long_about = "Display a log of all nailfix operations.

Shows timestamp, fix name, files affected, and backup location for each
operation.

EXAMPLES:
  nailfix history                 Show all operations, most recent first
  nailfix history | head -20      Show the most recent operations")]
    History,

    /// Show current tool status
    #[command(long_about = "Display resolved paths and backup state.

Shows the project root fixes are resolved against, the config file, the
debug log location, and the backup directory with its most recent
operation.

EXAMPLES:
  nailfix status                  Show tool status
  nailfix status --root ~/app     Status for a specific checkout")]
    Status,

    /// Manage backups
    #[command(long_about = "Manage nailfix backups.

Provides subcommands for listing, restoring, removing, and pruning backups.

EXAMPLES:
  nailfix backup list                 List all backups
  nailfix backup show <id>            Show backup details
  nailfix backup restore <id>         Restore from backup
  nailfix backup remove <id>          Remove a backup
  nailfix backup prune --keep=5       Keep only 5 most recent backups
  nailfix backup prune --keep-days=7  Keep only backups from last 7 days")]
    Backup {
        #[command(subcommand)]
        action: BackupAction,
    },

    /// Edit configuration file
    #[command(long_about = "Open configuration file in text editor.

Opens the nailfix configuration file (~/.nailfix/config.toml) in your
default editor. If the file doesn't exist, a default one will be created.

After saving and exiting, the configuration will be validated.
If there are any errors, they will be displayed.

CONFIGURATION OPTIONS:
  [project]
    root = \"/path\"               # Booking app checkout root (optional)

  [backup]
    backup_dir = \"/path\"         # Custom backup directory (optional)

  [output]
    context_lines = 2             # Context lines to show (max 10)

  [logging]
    debug = false                 # Write debug logs to a file

EXAMPLES:
  nailfix config                  Edit configuration
  nailfix config --show           Show current configuration
  nailfix config --log-path       Show where debug logs are written")]
    Config {
        /// Show current configuration without editing
        #[arg(long = "show")]
        show: bool,

        /// Show the debug log file path
        #[arg(long = "log-path")]
        log_path: bool,
    },
}

#[derive(Subcommand)]
enum BackupAction {
    /// List all backups
    #[command(long_about = "List all backups with details.

Shows backup ID, timestamp, fix name, and files for each backup.

EXAMPLES:
  nailfix backup list             List all backups
  nailfix backup list -v          List with verbose output")]
    List {
        /// Show more details (file paths)
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show backup details
    #[command(long_about = "Show detailed information about a specific backup.

Displays the full metadata for a backup including fix name, timestamp,
and all files that were backed up.

EXAMPLES:
  nailfix backup show 20250201-120000123-abc12345    Show specific backup")]
    Show {
        /// Backup ID
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Restore from a backup
    #[command(long_about = "Restore files from a backup.

Restores all files to their state at the time of the backup.
The backup is removed after successful restore.

EXAMPLES:
  nailfix backup restore 20250201-120000123-abc12345    Restore from backup")]
    Restore {
        /// Backup ID
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Remove a backup
    #[command(long_about = "Remove a specific backup.

Permanently deletes a backup and frees disk space.
Use with caution - this cannot be undone.

EXAMPLES:
  nailfix backup remove 20250201-120000123-abc12345    Remove backup")]
    Remove {
        /// Backup ID
        #[arg(value_name = "ID")]
        id: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Prune old backups
    #[command(long_about = "Remove old backups, keeping only recent ones.

Helps manage disk space by removing old backups.
You can keep a certain number of recent backups, or backups from recent days.

EXAMPLES:
  nailfix backup prune --keep=5                 Keep only 5 most recent
  nailfix backup prune --keep-days=7            Keep only last 7 days
  nailfix backup prune --keep=5 --force         Skip confirmation")]
    Prune {
        /// Number of recent backups to keep
        #[arg(long, value_name = "N")]
        keep: Option<usize>,

        /// Keep backups from last N days
        #[arg(long, value_name = "N")]
        keep_days: Option<usize>,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

pub fn parse_args() -> Result<Args> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::List) => Ok(Args::List),
        Some(Commands::Check) => Ok(Args::Check { root: cli.root }),
        Some(Commands::Rollback { id }) => Ok(Args::Rollback { id }),
        Some(Commands::History) => Ok(Args::History),
        Some(Commands::Status) => Ok(Args::Status { root: cli.root }),
        Some(Commands::Config { show, log_path }) => Ok(Args::Config { show, log_path }),
        Some(Commands::Backup { action }) => match action {
            BackupAction::List { verbose } => Ok(Args::BackupList { verbose }),
            BackupAction::Show { id } => Ok(Args::BackupShow { id }),
            BackupAction::Restore { id } => Ok(Args::BackupRestore { id }),
            BackupAction::Remove { id, force } => Ok(Args::BackupRemove { id, force }),
            BackupAction::Prune { keep, keep_days, force } => Ok(Args::BackupPrune {
                keep,
                keep_days,
                force,
            }),
        },
        None => {
            let fix = cli
                .fix
                .context("Missing fix name. Usage: nailfix <FIX> (see 'nailfix list')")?;

            // None means "use the configured context size"
            let context = if cli.no_context { Some(0) } else { cli.context };

            Ok(Args::Apply {
                fix,
                dry_run: cli.dry_run,
                interactive: cli.interactive,
                context,
                no_backup: cli.no_backup,
                backup_dir: cli.backup_dir,
                root: cli.root,
            })
        }
    }
}

#[derive(Debug)]
pub enum Args {
    Apply {
        fix: String,
        dry_run: bool,
        interactive: bool,
        context: Option<usize>,
        no_backup: bool,
        backup_dir: Option<String>,
        root: Option<String>,
    },
    List,
    Check {
        root: Option<String>,
    },
    Rollback {
        id: Option<String>,
    },
    History,
    Status {
        root: Option<String>,
    },
    BackupList {
        verbose: bool,
    },
    BackupShow {
        id: String,
    },
    BackupRestore {
        id: String,
    },
    BackupRemove {
        id: String,
        force: bool,
    },
    BackupPrune {
        keep: Option<usize>,
        keep_days: Option<usize>,
        force: bool,
    },
    Config {
        show: bool,
        log_path: bool,
    },
}
