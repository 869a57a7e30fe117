//! `salon` CLI - check appointment availability and record bookings from the
//! command line.
//!
//! ## Usage
//!
//! ```sh
//! # Hourly slots for a service on a date
//! salon -c salon.toml -b bookings.json slots --date 2026-03-16 --service trim
//!
//! # Same, as JSON for a web client
//! salon -c salon.toml -b bookings.json slots --date today --service trim --json
//!
//! # Two-week calendar overview
//! salon -c salon.toml -b bookings.json days --from today --days 14 --service trim
//!
//! # Effective opening hours for a date
//! salon -c salon.toml hours --date 2026-03-18
//!
//! # Claim a slot (rewrites bookings.json)
//! salon -c salon.toml -b bookings.json book --date 2026-03-16 --time 15:00 --service trim
//! ```

mod config;
mod logging;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use salon_slots::clock;
use salon_slots::{
    find_available_days, get_available_slots, resolve_hours, BookingRequest, ResolvedHours,
    ScheduleSource,
};

use crate::config::Salon;

#[derive(Parser)]
#[command(
    name = "salon",
    version,
    about = "Salon appointment availability and booking CLI"
)]
struct Cli {
    /// Salon configuration file (TOML)
    #[arg(short, long)]
    config: PathBuf,

    /// Bookings file (JSON array); created by `book` if missing
    #[arg(short, long)]
    bookings: Option<PathBuf>,

    /// Log debug output to stderr (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List candidate slots for a service on a date
    Slots {
        /// Date as YYYY-MM-DD, or "today" in the salon's timezone
        #[arg(short, long)]
        date: String,
        /// Service id
        #[arg(short, long)]
        service: String,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Summarize availability for a run of consecutive days
    Days {
        /// First date as YYYY-MM-DD, or "today"
        #[arg(short, long, default_value = "today")]
        from: String,
        /// Number of days to cover
        #[arg(short = 'n', long, default_value_t = 14)]
        days: u32,
        /// Service id
        #[arg(short, long)]
        service: String,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show the effective opening hours for a date
    Hours {
        /// Date as YYYY-MM-DD, or "today"
        #[arg(short, long)]
        date: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Book a slot and append it to the bookings file
    Book {
        /// Date as YYYY-MM-DD, or "today"
        #[arg(short, long)]
        date: String,
        /// Start time as HH:MM
        #[arg(short, long)]
        time: String,
        /// Service id
        #[arg(short, long)]
        service: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let salon = Salon::load(&cli.config, cli.bookings.as_deref())?;
    tracing::debug!(salon = %salon.name, timezone = %salon.timezone, "salon ready");

    match cli.command {
        Commands::Slots {
            date,
            service,
            json,
        } => {
            let date = resolve_date(&date, salon.timezone);
            let slots = get_available_slots(&date, &service, &salon.schedule, &salon.policy)
                .context("Failed to compute slots")?;
            tracing::debug!(%date, %service, count = slots.len(), "computed slots");

            if json {
                println!("{}", serde_json::to_string_pretty(&slots)?);
            } else if slots.is_empty() {
                println!("No slots for {} on {}", service, date);
            } else {
                for slot in &slots {
                    let state = if slot.available { "available" } else { "booked" };
                    println!("{}  {}", clock::format_time(slot.time), state);
                }
            }
        }
        Commands::Days {
            from,
            days,
            service,
            json,
        } => {
            let from = resolve_date(&from, salon.timezone);
            let summaries =
                find_available_days(&from, days, &service, &salon.schedule, &salon.policy)
                    .context("Failed to summarize days")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                for day in &summaries {
                    let status = match (day.open, day.closed_reason.as_deref()) {
                        (true, _) => {
                            format!("{}/{} available", day.available_slots, day.total_slots)
                        }
                        (false, Some(reason)) => format!("closed ({})", reason),
                        (false, None) => "closed".to_string(),
                    };
                    println!("{} {}  {}", clock::format_date(day.date), weekday(day.date), status);
                }
            }
        }
        Commands::Hours { date, json } => {
            let raw = resolve_date(&date, salon.timezone);
            let date = clock::parse_date(&raw).context("Failed to read date")?;
            let special = salon
                .schedule
                .find_special_date(date)
                .context("Failed to look up special dates")?;
            let resolved = resolve_hours(
                date,
                special.as_ref(),
                &salon.schedule.business_hours,
                &salon.policy,
            );

            if json {
                println!("{}", serde_json::to_string_pretty(&resolved)?);
            } else {
                println!("{}: {}", clock::format_date(date), describe_hours(&resolved));
            }
        }
        Commands::Book {
            date,
            time,
            service,
        } => {
            let path = cli
                .bookings
                .as_deref()
                .context("`book` needs --bookings to record the appointment")?;
            let request = BookingRequest {
                date: resolve_date(&date, salon.timezone),
                time,
                service_id: service,
            };
            // Reload under the lock; the copy loaded above may already be stale.
            let booking = config::book_and_save(&cli.config, path, &request)?;
            tracing::info!(
                date = %booking.date,
                time = %clock::format_time(booking.time),
                service = %booking.service_type,
                "booking recorded"
            );
            println!(
                "Booked {} on {} at {} (pending)",
                booking.service_type,
                clock::format_date(booking.date),
                clock::format_time(booking.time)
            );
        }
    }

    Ok(())
}

/// Replace "today" with the current date in the salon's timezone. Anything
/// else passes through for the library to validate.
fn resolve_date(raw: &str, timezone: Tz) -> String {
    if raw.trim().eq_ignore_ascii_case("today") {
        let today = Utc::now().with_timezone(&timezone).date_naive();
        clock::format_date(today)
    } else {
        raw.to_string()
    }
}

fn weekday(date: NaiveDate) -> String {
    date.weekday().to_string()
}

fn describe_hours(resolved: &ResolvedHours) -> String {
    match resolved {
        ResolvedHours::Closed { reason: Some(reason) } => format!("closed ({})", reason),
        ResolvedHours::Closed { reason: None } => "closed".to_string(),
        ResolvedHours::Open(window) => {
            let mut text = format!(
                "open {}-{}",
                clock::format_time(window.open),
                clock::format_time(window.close)
            );
            if let Some(brk) = window.break_window {
                text.push_str(&format!(
                    " (break {}-{})",
                    clock::format_time(brk.start),
                    clock::format_time(brk.end)
                ));
            }
            text
        }
    }
}
