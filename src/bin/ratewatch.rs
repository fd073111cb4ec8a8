//! ratewatch CLI — run the reporting loop or fire one-shot reports
//!
//! ## Example Usage
//!
//! ```bash
//! # Run the scheduled loop (daily report, retry pass, keep-alive)
//! RATEWATCH_TOKEN=... RATEWATCH_CHAT_ID=... ratewatch run
//!
//! # Send today's report once
//! ratewatch daily
//!
//! # Send the monthly reports for an explicit month
//! ratewatch monthly --year 2025 --month 8
//!
//! # Resend a pending failed report
//! ratewatch retry
//! ```

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::cell::RefCell;
use std::thread;
use std::time::Duration;

use ratewatch::config::BotConfig;
use ratewatch::net::{CbrFeed, VkTeamsSender};
use ratewatch::report::ReportService;
use ratewatch::resolver::RateResolver;
use ratewatch::retry::RetryStore;
use ratewatch::schedule::{DailyAt, EveryMinutes, Scheduler};

/// ratewatch: daily USD rate reporting bot
#[derive(Parser)]
#[command(name = "ratewatch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Daily USD exchange-rate reporting bot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the scheduled reporting loop
    Run,
    /// Send today's report once and exit
    Daily,
    /// Send the monthly reports for an explicit month
    Monthly {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
    },
    /// Attempt to resend a pending failed report
    Retry,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = BotConfig::from_env().context("invalid configuration")?;

    let feed = CbrFeed::new(&config.base_url, &config.report.currency_code)?;
    let sender = VkTeamsSender::new(&config.api_url, &config.token, &config.chat_id)?;
    let retry = RetryStore::new(&config.retry_file);
    let resolver = RateResolver::with_min_year(feed, config.min_year);
    let mut service = ReportService::new(resolver, sender, retry, config.report.clone());

    match cli.command {
        Commands::Daily => {
            let sent = service.daily_report(Utc::now().date_naive());
            log::info!("daily report delivered: {}", sent);
        }
        Commands::Monthly { year, month } => {
            let today = Utc::now().date_naive();
            if !service.monthly_report(year, month, today) {
                anyhow::bail!("monthly reports for {}-{:02} not fully delivered", year, month);
            }
        }
        Commands::Retry => {
            let resent = service.retry_pending();
            log::info!("pending report resent: {}", resent);
        }
        Commands::Run => run_loop(service, &config),
    }
    Ok(())
}

fn run_loop(service: ReportService<CbrFeed, VkTeamsSender>, config: &BotConfig) -> ! {
    let service = RefCell::new(service);
    let mut scheduler = Scheduler::new();

    scheduler.add(DailyAt::new(config.report_time), |now| {
        service.borrow_mut().daily_report(now.date_naive());
    });
    scheduler.add(DailyAt::new(config.retry_time), |_| {
        service.borrow().retry_pending();
    });
    scheduler.add(EveryMinutes::new(config.keep_alive_minutes), |_| {
        log::info!("keep-alive: service running");
    });

    log::info!(
        "ratewatch loop started (report {}, retry {})",
        config.report_time,
        config.retry_time
    );
    loop {
        scheduler.tick(Utc::now());
        thread::sleep(Duration::from_secs(60));
    }
}
