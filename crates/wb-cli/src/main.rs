mod server;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rmcp::{ServiceExt, transport::stdio};
use wb_core::sessions::{track_by_id, tracks_in};
use wb_core::time::format_date;
use wb_core::{
    CATALOG, Category, ChatSession, DailyLog, Emotion, Mood, Symptom, ToggleOutcome, format_time,
    parse_date, today,
};
use wb_store::ProfileStore;

#[derive(Parser)]
#[command(name = "wb", about = "Wellbeing companion: chat, cycle tracking and journaling")]
struct Cli {
    /// Profile to read and write (default: "default")
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP server on stdio transport
    Serve,

    /// Send a message and print the reply
    Chat {
        /// Message text
        text: String,
    },

    /// Show recent chat turns
    History {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// List knowledge-base topics
    Topics {
        /// Only topics whose title or text contains this term
        #[arg(long)]
        search: Option<String>,
    },

    /// Print one knowledge-base article
    Topic {
        /// Topic name, case-insensitive
        name: String,
    },

    /// Period tracking
    Period {
        #[command(subcommand)]
        action: PeriodAction,
    },

    /// Predict the next period start
    Predict,

    /// Record symptoms, mood and notes for a day
    Day {
        /// Date (YYYY-MM-DD or "today")
        date: String,

        /// Symptom to toggle; repeatable
        #[arg(long = "symptom")]
        symptoms: Vec<String>,

        /// Mood from 1 to 5
        #[arg(long)]
        mood: Option<u8>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Emotion journal
    Emotion {
        #[command(subcommand)]
        action: EmotionAction,
    },

    /// List audio sessions
    Sessions {
        /// focus, relax or sleep
        #[arg(long)]
        category: Option<String>,

        /// Show one track by id
        #[arg(long)]
        id: Option<u32>,
    },

    /// Show profile statistics
    Stats,

    /// Export the journal to a JSON file
    Export {
        /// Output file path
        path: PathBuf,
    },

    /// Replace the journal with a JSON export
    Import {
        /// Input file path
        path: PathBuf,
    },
}

#[derive(Subcommand)]
enum PeriodAction {
    /// Mark a start date, or close the open period with an end date
    Toggle {
        /// Date (YYYY-MM-DD or "today")
        date: String,
    },
    /// Record a finished period
    Log { start: String, end: String },
    /// Show the current period and history
    Status,
}

#[derive(Subcommand)]
enum EmotionAction {
    /// Record how a day felt
    Log {
        /// Date (YYYY-MM-DD or "today")
        date: String,
        /// happy, sad, neutral, excited, anxious, tired, calm or stressed
        emotion: String,
        #[arg(long, default_value = "")]
        note: String,
    },
    /// List journal entries, newest first
    List,
    /// Remove the entry for a date
    Delete {
        /// Date (YYYY-MM-DD or "today")
        date: String,
    },
}

fn open_store(cli: &Cli) -> Result<ProfileStore> {
    let base_dir = std::env::var("WB_DATA_DIR").ok().map(PathBuf::from);
    ProfileStore::open(cli.profile.as_deref(), base_dir.as_deref())
        .context("failed to open profile store")
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

/// `YYYY-MM-DD`, or `today` for the local date.
pub(crate) fn parse_day(s: &str) -> Result<NaiveDate> {
    if s.trim().eq_ignore_ascii_case("today") {
        return Ok(today());
    }
    Ok(parse_date(s)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Serve => cmd_serve(&cli).await,
        Commands::Chat { text } => cmd_chat(&cli, text),
        Commands::History { limit } => cmd_history(&cli, *limit),
        Commands::Topics { search } => cmd_topics(&cli, search.as_deref()),
        Commands::Topic { name } => cmd_topic(&cli, name),
        Commands::Period { action } => match action {
            PeriodAction::Toggle { date } => cmd_period_toggle(&cli, date),
            PeriodAction::Log { start, end } => cmd_period_log(&cli, start, end),
            PeriodAction::Status => cmd_period_status(&cli),
        },
        Commands::Predict => cmd_predict(&cli),
        Commands::Day {
            date,
            symptoms,
            mood,
            notes,
        } => cmd_day(&cli, date, symptoms, *mood, notes.as_deref()),
        Commands::Emotion { action } => match action {
            EmotionAction::Log {
                date,
                emotion,
                note,
            } => cmd_emotion_log(&cli, date, emotion, note),
            EmotionAction::List => cmd_emotion_list(&cli),
            EmotionAction::Delete { date } => cmd_emotion_delete(&cli, date),
        },
        Commands::Sessions { category, id } => cmd_sessions(category.as_deref(), *id),
        Commands::Stats => cmd_stats(&cli),
        Commands::Export { path } => cmd_export(&cli, path),
        Commands::Import { path } => cmd_import(&cli, path),
    }
}

async fn cmd_serve(cli: &Cli) -> Result<()> {
    let store = open_store(cli)?;
    tracing::info!("starting MCP server for profile '{}'", store.profile());

    let server = server::WbServer::new(store).map_err(|e| anyhow::anyhow!("{e}"))?;
    let service = server
        .serve(stdio())
        .await
        .context("failed to start MCP server")?;
    service.waiting().await?;
    Ok(())
}

fn cmd_chat(cli: &Cli, text: &str) -> Result<()> {
    let store = open_store(cli)?;
    let kb = store.knowledge().context("failed to load knowledge table")?;
    let mut session = ChatSession::new(kb);

    let Some((turn, source)) = session.send_traced(text) else {
        bail!("message is empty");
    };
    tracing::debug!(%source, "response matched");

    store
        .store()
        .append_turn(turn)
        .context("failed to record chat turn")?;

    println!("{}", turn.response_text);
    if cli.verbose {
        eprintln!("--- matched: {source} ---");
    }
    Ok(())
}

fn cmd_history(cli: &Cli, limit: usize) -> Result<()> {
    let store = open_store(cli)?;
    let turns = store
        .store()
        .recent_turns(limit)
        .context("failed to load chat history")?;

    if turns.is_empty() {
        println!("(no conversation yet)");
        return Ok(());
    }
    for turn in turns {
        println!("[{}]", turn.created_at);
        println!("you:   {}", turn.user_text);
        println!("buddy: {}", turn.response_text);
        println!();
    }
    Ok(())
}

fn cmd_topics(cli: &Cli, search: Option<&str>) -> Result<()> {
    let store = open_store(cli)?;
    let kb = store.knowledge().context("failed to load knowledge table")?;

    let entries = kb.search(search.unwrap_or(""));
    if entries.is_empty() {
        println!("(no matching topics)");
    }
    for entry in entries {
        println!("{}: {}", entry.topic, entry.preview());
    }
    Ok(())
}

fn cmd_topic(cli: &Cli, name: &str) -> Result<()> {
    let store = open_store(cli)?;
    let kb = store.knowledge().context("failed to load knowledge table")?;

    let Some(entry) = kb.find(name) else {
        bail!("unknown topic: {name}");
    };
    println!("{}\n", entry.topic);
    println!("{}", entry.content);
    Ok(())
}

fn cmd_period_toggle(cli: &Cli, date: &str) -> Result<()> {
    let date = parse_day(date)?;
    let store = open_store(cli)?;
    let outcome = store
        .update_journal(|j| j.tracker.toggle(date))
        .context("failed to update period")?;

    match outcome {
        ToggleOutcome::Started(d) => println!("period started {}", format_date(d)),
        ToggleOutcome::Restarted(d) => println!("period restarted {}", format_date(d)),
        ToggleOutcome::Closed(r) => println!(
            "period {} to {} recorded ({} days)",
            format_date(r.start()),
            format_date(r.end()),
            r.length_days()
        ),
    }
    Ok(())
}

fn cmd_period_log(cli: &Cli, start: &str, end: &str) -> Result<()> {
    let (start, end) = (parse_day(start)?, parse_day(end)?);
    let store = open_store(cli)?;
    let record = store
        .update_journal(|j| j.tracker.log_period(start, end))
        .context("failed to log period")?;

    println!(
        "logged {} to {} ({} days)",
        format_date(record.start()),
        format_date(record.end()),
        record.length_days()
    );
    Ok(())
}

fn cmd_period_status(cli: &Cli) -> Result<()> {
    let store = open_store(cli)?;
    let journal = store.load_journal().context("failed to load journal")?;
    let tracker = &journal.tracker;

    match (tracker.start(), tracker.end()) {
        (Some(start), None) => println!("current:  started {}", format_date(start)),
        (Some(start), Some(end)) => println!(
            "last:     {} to {} ({} days)",
            format_date(start),
            format_date(end),
            tracker.last_period_length().unwrap_or(0)
        ),
        _ => println!("current:  (none)"),
    }
    println!("history:  {}", tracker.history().len());
    for record in tracker.history() {
        println!(
            "  {} to {} ({} days)",
            format_date(record.start()),
            format_date(record.end()),
            record.length_days()
        );
    }
    Ok(())
}

fn cmd_predict(cli: &Cli) -> Result<()> {
    let store = open_store(cli)?;
    let journal = store.load_journal().context("failed to load journal")?;

    match journal.tracker.predict() {
        Some(p) => println!(
            "next period: {} (average cycle {} days)",
            format_date(p.next_date),
            p.average_interval_days
        ),
        None => println!("(no period data yet)"),
    }
    Ok(())
}

fn cmd_day(
    cli: &Cli,
    date: &str,
    symptoms: &[String],
    mood: Option<u8>,
    notes: Option<&str>,
) -> Result<()> {
    let date = parse_day(date)?;
    let symptoms = symptoms
        .iter()
        .map(|s| s.parse::<Symptom>())
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let mood = mood.map(Mood::new).transpose()?;

    let store = open_store(cli)?;
    let log = store
        .update_journal(|j| {
            let mut log = j
                .tracker
                .day(date)
                .cloned()
                .unwrap_or_else(|| DailyLog::new(date));
            for symptom in &symptoms {
                log.toggle_symptom(*symptom);
            }
            if let Some(mood) = mood {
                log.mood = mood;
            }
            if let Some(notes) = notes {
                log.notes = notes.trim().to_string();
            }
            j.tracker.log_day(log.clone());
            Ok::<_, wb_core::CoreError>(log)
        })
        .context("failed to save day log")?;

    println!("{}", format_date(log.date));
    println!("  symptoms: {}", display_or_none(&log.symptom_names()));
    println!("  mood:     {}/5", log.mood.value());
    println!("  notes:    {}", display_or_none(&log.notes));
    Ok(())
}

fn display_or_none(s: &str) -> &str {
    if s.is_empty() { "(none)" } else { s }
}

fn cmd_emotion_log(cli: &Cli, date: &str, emotion: &str, note: &str) -> Result<()> {
    let date = parse_day(date)?;
    let emotion: Emotion = emotion.parse()?;

    let store = open_store(cli)?;
    let entry = store
        .update_journal(|j| {
            Ok::<_, wb_core::CoreError>(j.emotions.record(date, emotion, note).clone())
        })
        .context("failed to save emotion")?;

    println!("{}: {}", format_date(entry.date), entry.emotion);
    Ok(())
}

fn cmd_emotion_list(cli: &Cli) -> Result<()> {
    let store = open_store(cli)?;
    let journal = store.load_journal().context("failed to load journal")?;

    let mut entries = journal.emotions.entries().to_vec();
    if entries.is_empty() {
        println!("(no entries)");
        return Ok(());
    }
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    for entry in entries {
        if entry.note.is_empty() {
            println!("{}  {}", format_date(entry.date), entry.emotion);
        } else {
            println!("{}  {}  {}", format_date(entry.date), entry.emotion, entry.note);
        }
    }
    Ok(())
}

fn cmd_emotion_delete(cli: &Cli, date: &str) -> Result<()> {
    let date = parse_day(date)?;

    let store = open_store(cli)?;
    let removed = store
        .update_journal(|j| Ok::<_, wb_core::CoreError>(j.emotions.remove(date)))
        .context("failed to save emotion journal")?;

    match removed {
        Some(entry) => println!("deleted {}: {}", format_date(entry.date), entry.emotion),
        None => bail!("no entry for {}", format_date(date)),
    }
    Ok(())
}

fn cmd_sessions(category: Option<&str>, id: Option<u32>) -> Result<()> {
    if let Some(id) = id {
        let Some(track) = track_by_id(id) else {
            bail!("no session with id {id}");
        };
        println!("{} ({})", track.title, track.category);
        println!("  {}", track.description);
        println!("  {} | {}", track.frequency, format_time(track.duration_secs));
        return Ok(());
    }

    let tracks = match category {
        Some(c) => tracks_in(c.parse::<Category>()?),
        None => CATALOG.iter().collect(),
    };
    for track in tracks {
        println!(
            "#{} {:<16} {:<6} {:>6}  {}",
            track.id,
            track.title,
            track.category.as_str(),
            format_time(track.duration_secs),
            track.frequency
        );
    }
    Ok(())
}

fn cmd_stats(cli: &Cli) -> Result<()> {
    let store = open_store(cli)?;
    let journal = store.load_journal().context("failed to load journal")?;
    let turns = store
        .store()
        .turn_count()
        .context("failed to count chat turns")?;

    println!("profile:   {}", store.profile());
    println!("cycles:    {}", journal.tracker.history().len());
    println!("day logs:  {}", journal.tracker.logs().len());
    println!("emotions:  {}", journal.emotions.len());
    println!("turns:     {turns}");
    Ok(())
}

fn cmd_export(cli: &Cli, path: &Path) -> Result<()> {
    let store = open_store(cli)?;
    store
        .store()
        .export_json_file(path)
        .context("failed to export journal")?;

    println!("exported to {}", path.display());
    Ok(())
}

fn cmd_import(cli: &Cli, path: &Path) -> Result<()> {
    let store = open_store(cli)?;
    store
        .store()
        .import_json_file(path)
        .context("failed to import JSON")?;

    let journal = store
        .load_journal()
        .context("failed to load journal after import")?;
    println!(
        "imported from {}. cycles={}, day logs={}, emotions={}",
        path.display(),
        journal.tracker.history().len(),
        journal.tracker.logs().len(),
        journal.emotions.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_day() {
        assert_eq!(
            parse_day("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(parse_day("2024-02-30").is_err());
        assert!(parse_day("yesterday").is_err());
    }

    #[test]
    fn test_parse_day_today_is_local() {
        let before = chrono::Local::now().date_naive();
        let got = parse_day("TODAY").unwrap();
        let after = chrono::Local::now().date_naive();
        assert!(got == before || got == after, "{got} not local today");
    }

    #[test]
    fn test_cli_parses_nested_subcommands() {
        let cli = Cli::try_parse_from([
            "wb", "--profile", "p", "period", "log", "2024-01-01", "2024-01-05",
        ])
        .unwrap();
        assert_eq!(cli.profile.as_deref(), Some("p"));
        assert!(matches!(
            cli.command,
            Commands::Period {
                action: PeriodAction::Log { .. }
            }
        ));

        let cli = Cli::try_parse_from([
            "wb", "day", "today", "--symptom", "cramps", "--symptom", "fatigue",
        ])
        .unwrap();
        match cli.command {
            Commands::Day { symptoms, mood, .. } => {
                assert_eq!(symptoms, vec!["cramps", "fatigue"]);
                assert_eq!(mood, None);
            }
            _ => panic!("expected day command"),
        }
    }
}
