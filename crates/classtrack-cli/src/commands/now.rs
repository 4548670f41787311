use std::path::PathBuf;

use clap::Args;
use classtrack_core::timeline::parse_clock_time;
use classtrack_core::{Config, Event};

#[derive(Args)]
pub struct NowArgs {
    /// Snapshot file (JSON array of timetable entries)
    pub snapshot: PathBuf,
    /// Staff/room directory JSON, overrides the configured one
    #[arg(long)]
    pub directory: Option<PathBuf>,
    /// Time to query (e.g. "10:15" or "2:30 PM"); defaults to now
    #[arg(long)]
    pub at: Option<String>,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

fn describe(event: Option<&Event>) -> String {
    match event {
        Some(event) => {
            let mut text = format!(
                "{} ({}-{})",
                event.label(),
                event.start().format("%H:%M"),
                event.end().format("%H:%M")
            );
            if let Some(secondary) = event.secondary_label() {
                text.push_str(&format!(" | {secondary}"));
            }
            text
        }
        None => "-".to_string(),
    }
}

pub fn run(args: NowArgs) -> Result<(), Box<dyn std::error::Error>> {
    let at = match args.at.as_deref() {
        Some(text) => parse_clock_time("at", text)?,
        None => chrono::Local::now().time(),
    };

    let config = Config::load_or_default();
    let timetable = super::load_timetable(&args.snapshot, args.directory.as_ref(), &config)?;
    let found = timetable.lookup(at);

    if args.json {
        let output = serde_json::json!({
            "at": at.format("%H:%M").to_string(),
            "current": found.current,
            "next": found.next,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("now:  {}", describe(found.current));
        println!("next: {}", describe(found.next));
    }
    Ok(())
}
