use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::anyhow;
use clap::{ArgAction, Args, Parser, Subcommand};
use tasklane_core::{ClientConfig, SortOrder, StatusFilter};
use tasklane_shared::TaskPriority;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

pub const CONFIG_ENV: &str = "TASKLANE_CONFIG";
/// Used when the config leaves `api.base_url` empty.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyVal {
    pub key: String,
    pub value: String,
}

impl std::str::FromStr for KeyVal {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (k, v) = s
            .split_once('=')
            .ok_or_else(|| anyhow!("expected KEY=VALUE, got: {s}"))?;
        Ok(Self {
            key: k.trim().to_string(),
            value: v.trim().to_string(),
        })
    }
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "tasklane",
    version,
    about = "Terminal client for the task board backend",
    disable_help_subcommand = true
)]
pub struct GlobalCli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    #[arg(
        long = "set",
        value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<KeyVal>()),
        action = ArgAction::Append,
        global = true
    )]
    pub overrides: Vec<KeyVal>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List tasks, optionally filtered and sorted.
    List {
        #[arg(long, default_value = "all", value_parser = parse_filter)]
        status: StatusFilter,

        #[arg(long)]
        search: Option<String>,

        #[arg(long, default_value = "date-desc", value_parser = parse_sort)]
        sort: SortOrder,
    },
    /// Show one task in full.
    Show { id: String },
    /// Create a task.
    Add(AddArgs),
    /// Change fields of an existing task.
    Edit {
        id: String,

        #[command(flatten)]
        fields: EditArgs,
    },
    /// Mark a pending task as completed.
    Complete { id: String },
    /// Delete a task, asking first unless --yes is given.
    Delete {
        id: String,

        #[arg(long)]
        yes: bool,
    },
    /// Print the completion statistics.
    Stats,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::List { .. } => "list",
            Self::Show { .. } => "show",
            Self::Add(_) => "add",
            Self::Edit { .. } => "edit",
            Self::Complete { .. } => "complete",
            Self::Delete { .. } => "delete",
            Self::Stats => "stats",
        }
    }
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct AddArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long, default_value = "")]
    pub description: String,

    #[arg(long)]
    pub due: String,

    #[arg(long, default_value = "Medium", value_parser = parse_priority)]
    pub priority: TaskPriority,

    /// Comma separated, e.g. "home, urgent".
    #[arg(long, default_value = "")]
    pub tags: String,
}

#[derive(Args, Debug, Clone, PartialEq, Eq, Default)]
pub struct EditArgs {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub due: Option<String>,

    #[arg(long, value_parser = parse_priority)]
    pub priority: Option<TaskPriority>,

    #[arg(long)]
    pub tags: Option<String>,
}

fn parse_filter(s: &str) -> Result<StatusFilter, String> {
    StatusFilter::parse(s).ok_or_else(|| format!("unknown status filter: {s} (all, pending, completed)"))
}

fn parse_sort(s: &str) -> Result<SortOrder, String> {
    SortOrder::parse(s).ok_or_else(|| {
        let known: Vec<_> = SortOrder::ALL.iter().map(|sort| sort.as_key()).collect();
        format!("unknown sort order: {s} ({})", known.join(", "))
    })
}

fn parse_priority(s: &str) -> Result<TaskPriority, String> {
    TaskPriority::parse(s).ok_or_else(|| format!("unknown priority: {s} (Low, Medium, High)"))
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

/// `--config`, then `$TASKLANE_CONFIG`, then the per-user config dir.
#[tracing::instrument(skip(override_path))]
pub fn resolve_config_path(override_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.trim().is_empty()
    {
        return Some(PathBuf::from(path));
    }

    let candidate = dirs::config_dir()?.join("tasklane").join("client.toml");
    if candidate.exists() {
        Some(candidate)
    } else {
        debug!(path = %candidate.display(), "no user config file");
        None
    }
}

#[tracing::instrument(skip_all)]
pub fn load_config(cli: &GlobalCli) -> anyhow::Result<ClientConfig> {
    let mut cfg = match resolve_config_path(cli.config.as_deref()) {
        Some(path) => ClientConfig::load_file(&path)?,
        None => {
            info!("using built-in config defaults");
            ClientConfig::default()
        }
    };

    cfg.apply_overrides(
        cli.overrides
            .iter()
            .map(|kv| (kv.key.clone(), kv.value.clone())),
    )?;

    if cfg.api.base_url.trim().is_empty() {
        debug!(base_url = DEFAULT_BASE_URL, "falling back to default backend");
        cfg.api.base_url = DEFAULT_BASE_URL.to_string();
    }

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn keyval_requires_an_equals_sign() {
        let kv: KeyVal = " display.locale = en-US ".parse().expect("parse");
        assert_eq!(kv.key, "display.locale");
        assert_eq!(kv.value, "en-US");
        assert!("display.locale".parse::<KeyVal>().is_err());
    }

    #[test]
    fn list_flags_parse_into_view_types() {
        let cli = GlobalCli::try_parse_from([
            "tasklane",
            "-vv",
            "list",
            "--status",
            "pending",
            "--sort",
            "due-date",
            "--search",
            "rent",
        ])
        .expect("parse");
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::List { status, search, sort } => {
                assert_eq!(status, StatusFilter::Pending);
                assert_eq!(sort, SortOrder::DueDate);
                assert_eq!(search.as_deref(), Some("rent"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn add_requires_title_and_due() {
        assert!(GlobalCli::try_parse_from(["tasklane", "add", "--title", "x"]).is_err());

        let cli = GlobalCli::try_parse_from([
            "tasklane",
            "add",
            "--title",
            "Pay rent",
            "--due",
            "2026-11-01T09:00",
            "--priority",
            "high",
            "--set",
            "display.locale=en-US",
        ])
        .expect("parse");
        assert_eq!(cli.overrides.len(), 1);
        match cli.command {
            Command::Add(args) => {
                assert_eq!(args.priority, TaskPriority::High);
                assert_eq!(args.tags, "");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn bad_sort_is_rejected() {
        assert!(GlobalCli::try_parse_from(["tasklane", "list", "--sort", "random"]).is_err());
    }

    #[test]
    fn explicit_config_file_and_overrides_are_applied() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[display]\nlocale = \"en-US\"").expect("write config");
        let path = file.path().to_string_lossy().to_string();

        let cli = GlobalCli::try_parse_from([
            "tasklane",
            "--config",
            path.as_str(),
            "--set",
            "timing.toast_duration_ms=10",
            "stats",
        ])
        .expect("parse");
        let cfg = load_config(&cli).expect("load");
        assert_eq!(cfg.display.locale, tasklane_core::Locale::EnUs);
        assert_eq!(cfg.timing.toast_duration_ms, 10);
        assert_eq!(cfg.api.base_url, DEFAULT_BASE_URL);
    }
}
