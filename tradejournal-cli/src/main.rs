//! TradeJournal CLI — dashboard metrics over exported trade journals.
//!
//! Commands:
//! - `report` — compute the dashboard for a trade file (optionally filtered)
//! - `daily` — print the daily and cumulative pnl series
//! - `export` — write report.json, daily.csv and trades.csv artifacts
//! - `overview` — admin-only per-user summary table

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use tradejournal_analytics::{
    admin_overview, load_journals, load_trades, save_artifacts, AnalyticsConfig,
    DashboardMetrics, MetricsContext, UserSummary,
};
use tradejournal_core::{
    AccessPolicy, DateRange, NewsFilter, NewsImpact, Principal, ReferenceClock, Trade, UserId,
};

#[derive(Parser)]
#[command(
    name = "tradejournal",
    about = "TradeJournal CLI — trading journal dashboard metrics"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides).
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute dashboard metrics for a trade file.
    Report(ReportArgs),
    /// Print the daily and cumulative pnl series.
    Daily {
        #[arg(long)]
        trades: PathBuf,

        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        to: Option<String>,
    },
    /// Write report and CSV artifacts under <output-dir>/<dataset-hash>/.
    Export {
        #[arg(long)]
        trades: PathBuf,

        /// Output directory for artifacts.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,

        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        to: Option<String>,

        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Per-user summary across a multi-user file. Requires admin.
    Overview {
        #[arg(long)]
        trades: PathBuf,

        /// Email of the requesting principal.
        #[arg(long)]
        as_email: String,

        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args)]
struct ReportArgs {
    /// Trade file (.json or .csv).
    #[arg(long)]
    trades: PathBuf,

    /// Only this user's trades (files with a userId column). Requires --as-email.
    #[arg(long)]
    user: Option<String>,

    /// Email of the requesting principal. Admins may view any user.
    #[arg(long)]
    as_email: Option<String>,

    /// User id of the requesting principal. Defaults to the email.
    #[arg(long)]
    as_user: Option<String>,

    /// First day to include (YYYY-MM-DD).
    #[arg(long)]
    from: Option<String>,

    /// Last day to include (YYYY-MM-DD).
    #[arg(long)]
    to: Option<String>,

    /// News impact filter, comma separated: red,orange,yellow,grey,no-news.
    #[arg(long, value_delimiter = ',')]
    news: Vec<String>,

    /// Analytics config TOML.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the full report as JSON instead of the summary.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Report(args) => run_report(args),
        Commands::Daily { trades, from, to } => run_daily(&trades, from, to),
        Commands::Export {
            trades,
            output_dir,
            from,
            to,
            config,
        } => run_export(&trades, &output_dir, from, to, config),
        Commands::Overview {
            trades,
            as_email,
            config,
        } => run_overview(&trades, &as_email, config),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<PathBuf>) -> Result<AnalyticsConfig> {
    match path {
        Some(p) => AnalyticsConfig::from_file(&p)
            .with_context(|| format!("Failed to load config {}", p.display())),
        None => Ok(AnalyticsConfig::default()),
    }
}

fn parse_day(raw: Option<String>) -> Result<Option<NaiveDate>> {
    raw.as_deref()
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .context("dates must be YYYY-MM-DD")
}

fn date_range(from: Option<String>, to: Option<String>) -> Result<DateRange> {
    let start = parse_day(from)?;
    let end = parse_day(to)?;
    if let (Some(s), Some(e)) = (start, end) {
        if s > e {
            bail!("--from {s} is after --to {e}");
        }
    }
    Ok(DateRange::between(start, end))
}

fn news_filter(raw: &[String]) -> Result<NewsFilter> {
    let mut impacts = Vec::with_capacity(raw.len());
    for item in raw.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
        match NewsImpact::parse(item) {
            Some(impact) => impacts.push(impact),
            None => bail!(
                "unknown news impact '{item}'. Valid: red, orange, yellow, grey, no-news"
            ),
        }
    }
    Ok(NewsFilter::new(impacts))
}

fn select_trades(
    path: &Path,
    user: Option<&UserId>,
    range: &DateRange,
    clock: &ReferenceClock,
) -> Result<Vec<Trade>> {
    let trades = match user {
        Some(u) => {
            let mut journals = load_journals(path, clock)
                .with_context(|| format!("Failed to load trades from {}", path.display()))?;
            journals.remove(u).unwrap_or_default()
        }
        None => load_trades(path, clock)
            .with_context(|| format!("Failed to load trades from {}", path.display()))?,
    };
    let selected = range.apply(&trades, clock);
    tracing::info!(
        loaded = trades.len(),
        selected = selected.len(),
        "trades selected"
    );
    Ok(selected)
}

/// Resolve `--user` against the requesting principal: self or admin only.
fn authorize_user_view(
    policy: &AccessPolicy,
    user: &str,
    as_email: Option<&str>,
    as_user: Option<&str>,
) -> Result<UserId> {
    let Some(email) = as_email else {
        bail!("--user requires --as-email");
    };
    let principal = Principal::new(as_user.unwrap_or(email), email);
    let target = UserId::new(user);
    policy.authorize_view(&principal, &target)?;
    Ok(target)
}

fn run_report(args: ReportArgs) -> Result<()> {
    let config = load_config(args.config)?;
    let target = args
        .user
        .as_deref()
        .map(|u| {
            authorize_user_view(
                &config.access,
                u,
                args.as_email.as_deref(),
                args.as_user.as_deref(),
            )
        })
        .transpose()?;
    let ctx = MetricsContext::new(ReferenceClock::system(), config);
    let range = date_range(args.from, args.to)?;
    let filter = news_filter(&args.news)?;

    let selected = select_trades(&args.trades, target.as_ref(), &range, &ctx.clock)?;
    let trades = filter.apply(&selected);
    let report = DashboardMetrics::compute(&trades, &ctx);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }
    Ok(())
}

fn run_daily(trades_path: &Path, from: Option<String>, to: Option<String>) -> Result<()> {
    let ctx = MetricsContext::system();
    let range = date_range(from, to)?;
    let trades = select_trades(trades_path, None, &range, &ctx.clock)?;
    let report = DashboardMetrics::compute(&trades, &ctx);

    if report.daily_pnl.is_empty() {
        println!("No trades in range.");
        return Ok(());
    }

    println!("{:<12} {:>8} {:>12} {:>14}", "Date", "Trades", "P&L", "Cumulative");
    println!("{}", "-".repeat(49));
    // cumulative_pnl carries a leading "start" point
    for (day, point) in report.daily_pnl.iter().zip(report.cumulative_pnl.iter().skip(1)) {
        println!(
            "{:<12} {:>8} {:>12.2} {:>14.2}",
            day.date, day.trade_count, day.pnl, point.cumulative
        );
    }
    println!();
    println!(
        "Winning days:   {}/{} ({:.1}%)",
        report.days.winning_days, report.days.total_days, report.days.win_day_percentage
    );
    println!("Avg daily P&L:  {:.2}", report.days.average_daily_pnl);
    Ok(())
}

fn run_export(
    trades_path: &Path,
    output_dir: &Path,
    from: Option<String>,
    to: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let ctx = MetricsContext::new(ReferenceClock::system(), config);
    let range = date_range(from, to)?;
    let trades = select_trades(trades_path, None, &range, &ctx.clock)?;
    let report = DashboardMetrics::compute(&trades, &ctx);

    print_summary(&report);
    let dir = save_artifacts(&report, &trades, output_dir)?;
    println!("Artifacts saved to: {}", dir.display());
    Ok(())
}

fn run_overview(trades_path: &Path, as_email: &str, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path)?;
    let policy = config.access.clone();
    let ctx = MetricsContext::new(ReferenceClock::system(), config);
    let principal = Principal::new(as_email, as_email);

    let journals = load_journals(trades_path, &ctx.clock)
        .with_context(|| format!("Failed to load trades from {}", trades_path.display()))?;
    let rows = admin_overview(&principal, &policy, &journals, &ctx)?;
    print_overview(&rows);
    Ok(())
}

fn print_summary(report: &DashboardMetrics) {
    println!();
    println!("=== Dashboard ===");
    println!("Dataset:        {}", report.dataset_hash.short());
    println!("Trades:         {}", report.trade_count);
    println!();
    println!("--- Performance ---");
    println!("Net P&L:        {:.2}", report.net_pnl);
    println!("Win Rate:       {:.1}%", report.win_rate);
    println!("Profit Factor:  {}", report.profit_factor);
    println!("Avg Win:        {:.2}", report.average_win);
    println!("Avg Loss:       {:.2}", report.average_loss);
    println!("Avg R:R:        {:.2}", report.average_reward_to_risk);
    println!();
    println!("--- Risk ---");
    println!("Max Drawdown:   {:.2}%", report.max_drawdown);
    println!("Volatility:     {:.2}%", report.volatility);
    println!("Sharpe:         {:.3}", report.sharpe_ratio);
    println!(
        "Win Streak:     {} (max {})",
        report.streaks.current_win, report.streaks.max_win
    );
    println!(
        "Loss Streak:    {} (max {})",
        report.streaks.current_loss, report.streaks.max_loss
    );
    println!();
    println!("--- Timing ---");
    println!(
        "Avg Hold:       {:.2}{}",
        report.average_holding_time.average,
        report.average_holding_time.unit.suffix()
    );
    println!(
        "Best Session:   {}",
        report.best_time_to_enter.as_deref().unwrap_or("-")
    );
    println!(
        "Best Weekday:   {}",
        report.best_day_of_week.as_deref().unwrap_or("-")
    );
    println!(
        "Winning Days:   {}/{} ({:.1}%)",
        report.days.winning_days, report.days.total_days, report.days.win_day_percentage
    );
    if !report.session_pnl.is_empty() {
        println!();
        println!("--- Sessions ---");
        for s in &report.session_pnl {
            println!("{:<10} {:>5} trades {:>12.2}", s.label, s.trade_count, s.pnl);
        }
    }
    println!();
}

fn print_overview(rows: &[UserSummary]) {
    if rows.is_empty() {
        println!("No journals found.");
        return;
    }
    println!(
        "{:<20} {:>7} {:>12} {:>8} {:>8} {:>10} {:>8}",
        "User", "Trades", "Net P&L", "Win %", "PF", "Max DD %", "Sharpe"
    );
    println!("{}", "-".repeat(79));
    for r in rows {
        println!(
            "{:<20} {:>7} {:>12.2} {:>8.1} {:>8} {:>10.2} {:>8.3}",
            r.user.as_str(),
            r.trade_count,
            r.net_pnl,
            r.win_rate,
            r.profit_factor.to_string(),
            r.max_drawdown,
            r.sharpe_ratio
        );
    }
}
