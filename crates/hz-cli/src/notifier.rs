//! Delivering announcements to the terminal.

use colored::{ColoredString, Colorize};

use hz_mechanics::{Announcement, Journal, Notifier, OutcomeTier, ResolutionResult};

/// Prints announcements as they arrive, or collects them for JSON output.
pub enum CliNotifier {
    /// Human-readable, colored text.
    Terminal,
    /// Collected and printed as one JSON array by [`CliNotifier::finish`].
    Json(Journal),
}

impl CliNotifier {
    pub fn new(json: bool) -> Self {
        if json {
            Self::Json(Journal::new())
        } else {
            Self::Terminal
        }
    }

    /// Flush anything held back. An empty journal prints nothing.
    pub fn finish(self) -> Result<(), String> {
        if let Self::Json(journal) = self {
            if journal.is_empty() {
                return Ok(());
            }
            let json = serde_json::to_string_pretty(&journal).map_err(|e| e.to_string())?;
            println!("{json}");
        }
        Ok(())
    }
}

impl Notifier for CliNotifier {
    fn announce(&mut self, announcement: &Announcement) {
        match self {
            Self::Json(journal) => journal.announce(announcement),
            Self::Terminal => print_announcement(announcement),
        }
    }
}

fn tier(outcome: OutcomeTier) -> ColoredString {
    let label = outcome.to_string();
    match outcome {
        OutcomeTier::Botch => label.red().bold(),
        OutcomeTier::Fail => label.red(),
        OutcomeTier::Partial => label.yellow(),
        OutcomeTier::Success => label.green().bold(),
    }
}

fn faces(pool: &[u8]) -> String {
    if pool.is_empty() {
        return "(none)".dimmed().to_string();
    }
    pool.iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_roll(result: &ResolutionResult) {
    println!(
        "  action ({}d6):  {}",
        result.action_rolls.len(),
        faces(result.action_rolls.faces())
    );
    println!(
        "  danger ({}d6):  {}",
        result.danger_rolls.len(),
        faces(result.danger_rolls.faces())
    );
    println!("  cancelled:   {}", faces(result.cancelled.faces()));
    println!("  remaining:   {}", faces(result.remaining_action.faces()));
    if result.boons > 0 {
        println!("  {}", format!("boon x{}", result.boons).magenta().bold());
    }
    match result.highest_remaining_action {
        Some(high) => println!("  {} (highest = {high})", tier(result.outcome)),
        None => println!("  {}", tier(result.outcome)),
    }
}

fn print_announcement(announcement: &Announcement) {
    match announcement {
        Announcement::Roll { character, result } => {
            println!("  {} rolls", character.bold());
            print_roll(result);
        }
        Announcement::Retirement { character, result } => {
            println!("  {} rolls to retire", character.bold());
            print_roll(&result.roll);
            let verdict = result.verdict.to_string();
            if result.verdict.is_catastrophe() {
                println!("  {} {}", character, verdict.red().bold());
            } else {
                println!("  {character} {verdict}");
            }
        }
        Announcement::GearRoll { character, report } => {
            let line = report.to_string();
            let line = if report.success { line.green() } else { line.red() };
            println!("  {} gear roll: {line}", character.bold());
        }
        Announcement::Ledger { character, event } => {
            if event.is_grave() {
                println!("  {} {}", character.bold(), event.to_string().red().bold());
            } else {
                println!("  {} {event}", character.bold());
            }
        }
        Announcement::Warning {
            character,
            rejection,
        } => {
            eprintln!("{} {character}: {rejection}", "warning:".yellow().bold());
        }
    }
}
