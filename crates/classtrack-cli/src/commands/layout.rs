use std::path::PathBuf;

use clap::Args;
use classtrack_core::{Config, LaneWidth};

#[derive(Args)]
pub struct LayoutArgs {
    /// Snapshot file (JSON array of timetable entries)
    pub snapshot: PathBuf,
    /// Staff/room directory JSON, overrides the configured one
    #[arg(long)]
    pub directory: Option<PathBuf>,
    /// Give every event the day's widest column split
    #[arg(long)]
    pub uniform: bool,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: LayoutArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let timetable = super::load_timetable(&args.snapshot, args.directory.as_ref(), &config)?;
    let layout = timetable.layout();

    let width = if args.uniform {
        LaneWidth::Uniform
    } else {
        config.timeline.lane_width
    };
    let window = config.window()?;
    let rects = layout.rects(&window, &config.timeline_rect(), &config.padding, width);

    if args.json {
        let output = serde_json::json!({
            "component_count": layout.component_count(),
            "max_lane_count": layout.max_lane_count(),
            "all_day": timetable.all_day,
            "events": rects,
            "rejected": timetable.rejected,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if timetable.is_empty() {
        println!("no classes");
        return Ok(());
    }
    for label in &timetable.all_day {
        println!("all day      {label}");
    }
    for placed in &rects {
        let entry = placed.entry;
        let event = &entry.event;
        let secondary = event
            .secondary_label()
            .map(|s| format!(" | {s}"))
            .unwrap_or_default();
        println!(
            "{}-{}  lane {}/{}  {}{}  [x={:.1} y={:.1} w={:.1} h={:.1}]",
            event.start().format("%H:%M"),
            event.end().format("%H:%M"),
            entry.lane + 1,
            entry.lane_count,
            event.label(),
            secondary,
            placed.rect.x,
            placed.rect.y,
            placed.rect.width,
            placed.rect.height,
        );
    }
    let hidden = layout.len() - rects.len();
    if hidden > 0 {
        println!(
            "({hidden} outside {}-{})",
            window.start().format("%H:%M"),
            window.end().format("%H:%M")
        );
    }
    Ok(())
}
