use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use roadmap_core::model::{LessonStatus, Progress, TapOutcome};
use services::AppServices;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidIndex { raw: String },
    InvalidProgress { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidIndex { raw } => write!(f, "invalid lesson index: {raw}"),
            ArgsError::InvalidProgress { raw } => write!(f, "invalid progress value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  roadmap [ui]          [--db <sqlite_url>] [--roadmap <file.json>]");
    eprintln!("  roadmap status        [--db <sqlite_url>] [--roadmap <file.json>]");
    eprintln!("  roadmap tap <index>   [--db <sqlite_url>] [--roadmap <file.json>]");
    eprintln!("  roadmap reset         [--db <sqlite_url>] [--roadmap <file.json>]");
    eprintln!("  roadmap seed <count>  [--db <sqlite_url>] [--roadmap <file.json>]");
    eprintln!();
    eprintln!("Lesson indexes are 0-based.");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite://<current dir>/roadmap.sqlite3");
    eprintln!("  --roadmap <built-in UI/UX Design Fundamentals>");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  ROADMAP_DB_URL, ROADMAP_FILE, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Progress(ProgressCommand),
}

/// Headless commands operating on the stored progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProgressCommand {
    Status,
    Tap(usize),
    Reset,
    Seed(u32),
}

impl Command {
    fn parse(name: &str, args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let command = match name {
            "ui" => return Ok(Self::Ui),
            "status" => ProgressCommand::Status,
            "reset" => ProgressCommand::Reset,
            "tap" => {
                let raw = require_value(args, "tap")?;
                let index = raw
                    .parse()
                    .map_err(|_| ArgsError::InvalidIndex { raw })?;
                ProgressCommand::Tap(index)
            }
            "seed" => {
                let raw = require_value(args, "seed")?;
                let count = raw
                    .parse()
                    .map_err(|_| ArgsError::InvalidProgress { raw })?;
                ProgressCommand::Seed(count)
            }
            other => return Err(ArgsError::UnknownArg(other.to_string())),
        };
        Ok(Self::Progress(command))
    }
}

struct Args {
    command: Command,
    db_url: String,
    roadmap: Option<PathBuf>,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Option<Self>, ArgsError> {
        let mut db_url = std::env::var("ROADMAP_DB_URL")
            .ok()
            .map_or_else(|| normalize_sqlite_url("roadmap.sqlite3".into()), normalize_sqlite_url);
        let mut roadmap = std::env::var_os("ROADMAP_FILE").map(PathBuf::from);
        let mut command = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--roadmap" => {
                    roadmap = Some(PathBuf::from(require_value(&mut args, "--roadmap")?));
                }
                "--help" | "-h" => return Ok(None),
                _ if command.is_none() && !arg.starts_with("--") => {
                    command = Some(Command::parse(&arg, &mut args)?);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Some(Self {
            // Default behavior: launching UI when no subcommand is provided.
            command: command.unwrap_or(Command::Ui),
            db_url,
            roadmap,
        }))
    }
}

/// Plain paths and relative `sqlite:` URLs become absolute `sqlite://` URLs.
/// `sqlite:file:` URLs carry their own options and are left alone.
fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") || raw.starts_with("sqlite:file:")
    {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" || db_url.starts_with("sqlite:file:") {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn status_marker(status: LessonStatus) -> &'static str {
    match status {
        LessonStatus::Completed => "[x]",
        LessonStatus::Current => "[>]",
        LessonStatus::Locked => "[ ]",
    }
}

fn print_status(
    out: &mut impl Write,
    services: &AppServices,
    progress: Progress,
) -> std::io::Result<()> {
    let roadmap = services.roadmap();
    let total = roadmap.lesson_count();
    writeln!(out, "{}", roadmap.title())?;
    writeln!(out, "{} of {total} lessons completed", progress.completed())?;
    for (index, lesson) in roadmap.lessons().iter().enumerate() {
        writeln!(
            out,
            "  {} {index}: {}",
            status_marker(progress.status_of(index)),
            lesson.title()
        )?;
    }
    Ok(())
}

/// Headless commands are one-shot, so a failed write fails the command.
async fn run_command(
    out: &mut impl Write,
    services: &AppServices,
    command: ProgressCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    let tracker = services.progress();
    match command {
        ProgressCommand::Status => {
            let progress = tracker.try_load().await?;
            print_status(out, services, progress)?;
        }
        ProgressCommand::Tap(index) => {
            let current = tracker.try_load().await?;
            let result = tracker.try_tap(index, current).await?;
            let roadmap = services.roadmap();
            let title = roadmap.lesson(index).map_or("", |lesson| lesson.title());
            match result.outcome {
                TapOutcome::Advanced { .. } => writeln!(out, "Lesson complete: {title}")?,
                TapOutcome::Reviewed { .. } => writeln!(out, "Reviewing: {title}")?,
                TapOutcome::Locked { .. } => writeln!(out, "Lesson {index} is locked")?,
                TapOutcome::OutOfRange { .. } => writeln!(out, "No lesson at index {index}")?,
            }
            print_status(out, services, result.progress)?;
        }
        ProgressCommand::Reset => {
            tracker.try_reset().await?;
            writeln!(out, "Progress reset")?;
        }
        ProgressCommand::Seed(count) => {
            let stored = tracker.try_persist(Progress::new(count)).await?;
            writeln!(out, "Progress set to {stored}")?;
        }
    }
    Ok(())
}

fn launch_ui(services: AppServices) {
    let app: Arc<dyn UiApp> = Arc::new(services);
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    // Explicitly disable it so the app doesn't behave like a modal window.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Learning Path")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let Some(args) = Args::parse(std::env::args().skip(1)).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?
    else {
        print_usage();
        return Ok(());
    };

    init_tracing();

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&args.db_url)?;
    let runtime = tokio::runtime::Runtime::new()?;
    let services = runtime.block_on(AppServices::new_sqlite(
        &args.db_url,
        args.roadmap.as_deref(),
    ))?;
    tracing::info!(db = %args.db_url, command = ?args.command, "starting");

    match args.command {
        // The desktop launcher drives its own event loop. `runtime` stays alive
        // until it returns so the storage pool keeps working.
        Command::Ui => {
            launch_ui(services);
            Ok(())
        }
        Command::Progress(command) => {
            let mut stdout = std::io::stdout().lock();
            runtime.block_on(run_command(&mut stdout, &services, command))
        }
    }
}

fn main() {
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadmap_core::model::Roadmap;
    use storage::repository::{KeyValueStore, Storage, StorageError};

    fn parse(args: &[&str]) -> Result<Option<Args>, ArgsError> {
        Args::parse(args.iter().map(|arg| (*arg).to_string()))
    }

    #[test]
    fn defaults_to_ui() {
        let args = parse(&["--db", "sqlite::memory:"]).unwrap().unwrap();
        assert_eq!(args.command, Command::Ui);
        assert_eq!(args.db_url, "sqlite::memory:");
    }

    #[test]
    fn parses_commands_with_values() {
        let args = parse(&["tap", "3", "--roadmap", "path.json"]).unwrap().unwrap();
        assert_eq!(args.command, Command::Progress(ProgressCommand::Tap(3)));
        assert_eq!(args.roadmap, Some(PathBuf::from("path.json")));

        let args = parse(&["seed", "5"]).unwrap().unwrap();
        assert_eq!(args.command, Command::Progress(ProgressCommand::Seed(5)));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            parse(&["tap", "x"]),
            Err(ArgsError::InvalidIndex { .. })
        ));
        assert!(matches!(
            parse(&["seed", "-1"]),
            Err(ArgsError::InvalidProgress { .. })
        ));
        assert!(matches!(
            parse(&["status", "extra"]),
            Err(ArgsError::UnknownArg(_))
        ));
        assert!(matches!(
            parse(&["--db"]),
            Err(ArgsError::MissingValue { flag: "--db" })
        ));
        assert!(parse(&["--help"]).unwrap().is_none());
    }

    #[test]
    fn normalizes_relative_sqlite_paths() {
        let url = normalize_sqlite_url("sqlite:data/roadmap.sqlite3".to_string());
        assert!(url.starts_with("sqlite:///") || url.starts_with("sqlite://"));
        assert!(url.ends_with("data/roadmap.sqlite3"));
    }

    #[test]
    fn keeps_sqlite_file_urls() {
        let raw = "sqlite:file:roadmap?mode=memory&cache=shared";
        assert_eq!(normalize_sqlite_url(raw.to_string()), raw);
        assert!(prepare_sqlite_file(raw).is_ok());
    }

    /// Reads succeed with nothing stored; every write fails.
    struct ReadOnlyStore;

    #[async_trait::async_trait]
    impl KeyValueStore for ReadOnlyStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Connection("read-only".to_string()))
        }

        async fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Connection("read-only".to_string()))
        }
    }

    async fn sqlite_services() -> AppServices {
        AppServices::new_sqlite("sqlite::memory:", None)
            .await
            .expect("open in-memory database")
    }

    async fn run(services: &AppServices, command: ProgressCommand) -> String {
        let mut out = Vec::new();
        run_command(&mut out, services, command)
            .await
            .expect("command succeeds");
        String::from_utf8(out).expect("utf8 output")
    }

    #[tokio::test]
    async fn status_lists_every_lesson() {
        let services = sqlite_services().await;
        let out = run(&services, ProgressCommand::Status).await;

        assert!(out.starts_with("UI/UX Design Fundamentals\n"));
        assert!(out.contains("0 of 7 lessons completed"));
        assert!(out.contains("[>] 0: Introduction to UI/UX Design"));
        assert!(out.contains("[ ] 6: Portfolio Projects"));
    }

    #[tokio::test]
    async fn seed_is_clamped_to_lesson_count() {
        let services = sqlite_services().await;
        let out = run(&services, ProgressCommand::Seed(40)).await;

        assert_eq!(out, "Progress set to 7\n");
        assert_eq!(services.progress().try_load().await.unwrap(), Progress::new(7));
    }

    #[tokio::test]
    async fn tap_advances_and_persists() {
        let services = sqlite_services().await;
        run(&services, ProgressCommand::Seed(2)).await;

        let out = run(&services, ProgressCommand::Tap(2)).await;
        assert!(out.starts_with("Lesson complete: Wireframing & Prototyping\n"));
        assert!(out.contains("3 of 7 lessons completed"));
        assert_eq!(services.progress().try_load().await.unwrap(), Progress::new(3));

        let out = run(&services, ProgressCommand::Tap(5)).await;
        assert!(out.starts_with("Lesson 5 is locked\n"));
        let out = run(&services, ProgressCommand::Tap(0)).await;
        assert!(out.starts_with("Reviewing: Introduction to UI/UX Design\n"));
        let out = run(&services, ProgressCommand::Tap(9)).await;
        assert!(out.starts_with("No lesson at index 9\n"));
        assert_eq!(services.progress().try_load().await.unwrap(), Progress::new(3));
    }

    #[tokio::test]
    async fn reset_clears_progress() {
        let services = sqlite_services().await;
        run(&services, ProgressCommand::Seed(4)).await;

        let out = run(&services, ProgressCommand::Reset).await;
        assert_eq!(out, "Progress reset\n");
        assert_eq!(services.progress().try_load().await.unwrap(), Progress::ZERO);
    }

    #[tokio::test]
    async fn failed_write_fails_the_command() {
        let storage = Storage {
            kv: Arc::new(ReadOnlyStore),
        };
        let services = AppServices::new(&storage, Roadmap::ui_ux_fundamentals());

        for command in [
            ProgressCommand::Tap(0),
            ProgressCommand::Seed(1),
            ProgressCommand::Reset,
        ] {
            let mut out = Vec::new();
            let result = run_command(&mut out, &services, command).await;
            assert!(result.is_err(), "{command:?} should fail");
            assert!(out.is_empty(), "{command:?} printed {out:?}");
        }

        // Taps that change nothing never write.
        let out = run(&services, ProgressCommand::Tap(3)).await;
        assert!(out.starts_with("Lesson 3 is locked\n"));
    }
}
