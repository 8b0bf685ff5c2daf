use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use tracing::Level;

use site_monitor::{
    config::{
        CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH, DEFAULT_STATE_DIR, STATE_DIR_ENV, WEBHOOK_ENV,
    },
    fetch::{ContentFetcher, HttpFetcher},
    fingerprint::{fingerprint, preview},
    load_sites,
    state::sanitize_key,
    utils::{head_lines, truncate},
    DefaultMonitor, FileStateStore, MonitorSettings, SiteConfig, SiteOutcome, SkipReason,
    StateStore,
};

/// Website Change Monitor
///
/// 抓取配置的页面，计算内容指纹，变化时发送 Discord 通知
#[derive(Parser)]
#[command(name = "site-monitor")]
#[command(author, version = env!("APP_VERSION"), about)]
struct Cli {
    /// 站点列表（JSON 数组）
    #[arg(long = "config", env = CONFIG_PATH_ENV, default_value = DEFAULT_CONFIG_PATH, global = true)]
    config_path: PathBuf,

    /// 状态文件目录
    #[arg(long, env = STATE_DIR_ENV, default_value = DEFAULT_STATE_DIR, global = true)]
    state_dir: PathBuf,

    /// Discord Webhook 地址
    #[arg(long, env = WEBHOOK_ENV, hide_env_values = true, global = true)]
    webhook_url: Option<String>,

    /// 输出诊断日志（默认只输出 error）
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// 检查所有站点（默认）
    Run,

    /// 显示各站点已保存的状态
    Status,

    /// 抓取单个页面并打印提取的文本和指纹（不读写状态，不通知）
    Fetch {
        url: String,

        #[arg(short, long, default_value = "body")]
        selector: String,

        /// 打印完整文本
        #[arg(long)]
        full: bool,
    },
}

const RULE: &str = "--------------------------------------------------";

// ═══════════════════════════════════════════════════════════════════
// 监控运行
// ═══════════════════════════════════════════════════════════════════

fn run_monitor(cli: &Cli) -> Result<()> {
    let settings = MonitorSettings::new(
        cli.webhook_url.clone(),
        Some(cli.config_path.clone()),
        Some(cli.state_dir.clone()),
    )?;
    settings.prepare_state_dir()?;
    let sites = load_sites(&settings.config_path)?;
    let monitor = DefaultMonitor::from_settings(&settings)?;

    println!(
        "Starting monitoring check at {}",
        Utc::now().to_rfc3339().cyan()
    );
    println!("Monitoring {} site(s)", sites.len());
    println!("{}", RULE);

    let summary = monitor.run_with(&sites, print_outcome);

    println!("{}", RULE);
    println!("{}", "Monitoring check completed".green());

    let changed = format!("{}/{}", summary.changed(), summary.total());
    println!(
        "Changes detected: {}",
        if summary.changed() > 0 {
            changed.yellow().bold()
        } else {
            changed.normal()
        }
    );
    if summary.skipped() + summary.failed() > 0 {
        println!(
            "   Skipped: {}  Failed: {}",
            summary.skipped(),
            summary.failed()
        );
    }

    Ok(())
}

fn print_outcome(site: &SiteConfig, outcome: &SiteOutcome) {
    let name = site.name.as_str();

    match outcome {
        SiteOutcome::Skipped(SkipReason::NoUrl) => {
            eprintln!("{}", format!("⚠ Skipping {}: No URL specified", name).yellow());
        }
        SiteOutcome::Skipped(SkipReason::FetchFailed(e)) => {
            eprintln!(
                "{}",
                format!("⚠ Failed to fetch content from {}: {}", name, e).yellow()
            );
        }
        SiteOutcome::FirstSeen {
            recovered_corrupt, ..
        } => {
            if *recovered_corrupt {
                eprintln!(
                    "{}",
                    format!("⚠ Ignoring corrupt state for {}, treating as first check", name)
                        .yellow()
                );
            }
            println!("📝 First check for {} - saving initial state", name.cyan());
        }
        SiteOutcome::Unchanged { .. } => {
            println!("{} No changes in {}", "✓".green(), name);
        }
        SiteOutcome::Changed { notified, .. } => {
            println!("{}", format!("🔔 Change detected in {}!", name).yellow().bold());
            if *notified {
                println!("   {} Notification sent", "✓".green());
            } else {
                eprintln!("   {} Notification failed", "✗".red());
            }
        }
        SiteOutcome::Failed(e) => {
            eprintln!("{}", format!("✗ Error checking {}: {}", name, e).red());
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// 状态显示
// ═══════════════════════════════════════════════════════════════════

fn show_status(cli: &Cli) -> Result<()> {
    let sites = load_sites(&cli.config_path)?;
    let store = FileStateStore::new(&cli.state_dir);

    println!("📁 State Dir: {}", cli.state_dir.display().to_string().green());
    println!();

    for site in &sites {
        match store.read(&site.name) {
            Some(state) => {
                let marker = if state.previous_hash.is_some() {
                    "changed".yellow()
                } else {
                    "stable".green()
                };
                println!("  {} {} [{}]", "•".green(), site.name.cyan(), marker);
                println!("     Hash: {}", preview(&state.hash));
                println!("     Last checked: {}", state.last_checked.to_rfc3339());
                if let Some(prev) = &state.previous_hash {
                    println!("     Previous: {}", preview(prev));
                }
            }
            None => {
                println!(
                    "  {} {} {}",
                    "○".white(),
                    site.name.cyan(),
                    "(not checked yet)".dimmed()
                );
            }
        }
    }

    // 不再出现在配置中的状态文件
    let tracked: Vec<String> = sites.iter().map(|s| sanitize_key(&s.name)).collect();
    let orphans: Vec<_> = store
        .list()
        .into_iter()
        .filter(|(key, _)| !tracked.contains(key))
        .collect();

    if !orphans.is_empty() {
        println!();
        println!("{}", "⚠️  State without a configured site:".yellow());
        for (key, state) in orphans {
            println!("  {} {} ({})", "−".blue(), key, truncate(&state.url, 60));
        }
    }

    println!();
    println!("Total: {} site(s)", sites.len());

    Ok(())
}

// ═══════════════════════════════════════════════════════════════════
// 单页预览
// ═══════════════════════════════════════════════════════════════════

fn preview_fetch(url: &str, selector: &str, full: bool) -> Result<()> {
    let fetcher = HttpFetcher::new()?;
    let text = fetcher.fetch(url, selector)?;

    println!("🌐 {} ({})", url.cyan(), selector.yellow());
    println!("{}", RULE);
    if full {
        println!("{}", text);
    } else {
        let (head, rest) = head_lines(&text, 20);
        println!("{}", head);
        if rest > 0 {
            println!("{}", format!("... {} more line(s), use --full", rest).dimmed());
        }
    }
    println!("{}", RULE);
    println!("🔑 Fingerprint: {}", fingerprint(&text).green());

    Ok(())
}

// ═══════════════════════════════════════════════════════════════════
// Main
// ═══════════════════════════════════════════════════════════════════

fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::INFO } else { Level::ERROR })
        .init();

    let result = match &cli.command {
        None | Some(Commands::Run) => run_monitor(&cli),
        Some(Commands::Status) => show_status(&cli),
        Some(Commands::Fetch {
            url,
            selector,
            full,
        }) => preview_fetch(url, selector, *full),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Fatal error:".red().bold(), e);
        std::process::exit(1);
    }
}
