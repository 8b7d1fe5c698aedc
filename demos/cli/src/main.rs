use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use flight_core::{
    parse_instant, startup_banner, GeneratedCodes, StatusBand, TickOutcome, TrackerConfig,
    TrackingSession, FLIGHT,
};
use flight_ticket::{calendar_url, render_ticket, CalendarEvent, TicketParams, TICKET_FILE_NAME};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "flight-cli",
    about = "Mô phỏng theo dõi chuyến bay AA 8247 trên terminal."
)]
struct Args {
    /// Khoảng cách giữa hai bước mô phỏng (ms).
    #[arg(long, default_value_t = 2_000)]
    tick_ms: u32,

    /// Thư mục ghi file e-ticket. Bỏ trống thì không ghi.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Mốc thời gian RFC 3339 thay cho giờ hiện tại khi đánh giá trạng thái.
    #[arg(long)]
    now: Option<String>,

    /// In trạng thái dạng JSON rồi thoát, không chạy mô phỏng.
    #[arg(long)]
    json: bool,

    /// Bật log debug.
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let default_filter = format!("flight_cli={level},flight_core={level}");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false))
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = TrackerConfig {
        tick_interval_ms: args.tick_ms,
        ..TrackerConfig::default()
    };
    config.validate()?;

    let now = match args.now.as_deref() {
        Some(value) => parse_instant(value)?,
        None => chrono::Utc::now(),
    };

    let codes = GeneratedCodes::generate(config.code_length);
    let band = StatusBand::evaluate(now, FLIGHT.departure_instant());

    if args.json {
        let snapshot = serde_json::json!({
            "flight": FLIGHT,
            "codes": codes,
            "band": band,
            "updates": band.updates(),
        });
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    for line in startup_banner() {
        println!("{line}");
    }
    println!(
        "Confirmation: {}\nBooking reference: {}",
        codes.confirmation_code, codes.booking_reference
    );
    for update in band.updates() {
        let marker = if update.active { "*" } else { " " };
        println!("[{marker}] {:<16} {}", update.item.element_id(), update.text);
    }

    run_tracking(&config);

    if let Some(dir) = args.output.as_ref() {
        let path = dir.join(TICKET_FILE_NAME);
        let html = render_ticket(&TicketParams::from(&codes));
        std::fs::write(&path, html)
            .with_context(|| format!("Không ghi được e-ticket {:?}", path))?;
        info!(path = %path.display(), "e-ticket written");
    }

    println!(
        "Calendar: {}",
        calendar_url(&CalendarEvent::for_flight(&codes.confirmation_code))
    );

    Ok(())
}

fn run_tracking(config: &TrackerConfig) {
    let mut session = TrackingSession::new();
    session.start();
    let pause = Duration::from_millis(u64::from(config.tick_interval_ms));

    loop {
        thread::sleep(pause);
        let (update, done) = match session.tick() {
            TickOutcome::Advanced(update) => (update, false),
            TickOutcome::Completed(update) => (update, true),
            TickOutcome::Idle => break,
        };

        debug!(tone = ?update.tone, "tracking tick");
        let gate = update
            .gate
            .map(|gate| format!(" | Gate {gate}"))
            .unwrap_or_default();
        println!(
            "{:>3}% {:<14} {}{gate}",
            update.progress_percent, update.label, update.message
        );

        if done {
            break;
        }
    }
}
