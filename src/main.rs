mod cli;

use anyhow::Result;
use chrono::{Local, Utc};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

use cli::{Cli, Commands, ConfigAction};
use project_organizer::config::{Config, OutputFormat};
use project_organizer::models::FileEntry;
use project_organizer::operations::{
    collect_stats, write_available_organizations, write_find_report, write_make_report,
    write_stats_report, FindOptions, MakeRequest, ProjectFinder, ProjectManager, StatsOutcome,
};
use project_organizer::scanner::FileWalker;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 日志写到 stderr，stdout 只留给报告
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    // 加载配置
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_config_path()?,
    };
    let mut config = Config::load_or_create(&config_path)?;

    // 根据命令执行相应操作
    match cli.command {
        Commands::Make {
            organization,
            name,
            workspace,
            no_project_file,
            date,
        } => {
            let mut manager = ProjectManager::new(config.project_root()?);
            if workspace {
                manager = manager.with_workspace_root(config.workspace_root()?);
            }

            let request = MakeRequest {
                organization,
                name,
                date: date.unwrap_or_else(|| Local::now().date_naive()),
                project_file: !no_project_file,
            };
            let outcome = manager.make(&request, Utc::now()).await?;
            write_make_report(&mut io::stdout().lock(), &request, &outcome)?;
        }
        Commands::Find {
            query,
            extension,
            format,
        } => {
            let root = config.project_root()?;
            let walker = FileWalker::from_config(&config).with_cancellation(cancel_on_ctrl_c());
            let finder = ProjectFinder::new(walker).with_concurrency(config.scan.concurrent_scans);

            let spinner = extension
                .as_ref()
                .map(|ext| create_spinner(format!("扫描包含 {} 的项目...", ext)));
            let results = finder
                .find(&root, &query, &FindOptions { extension })
                .await;
            if let Some(spinner) = spinner {
                spinner.finish_and_clear();
            }
            let results = results?;

            match format.unwrap_or(config.display.format) {
                OutputFormat::Table => write_find_report(
                    &mut io::stdout().lock(),
                    &query,
                    &results,
                    config.display.column_gap,
                )?,
                OutputFormat::Json => print_json(&results)?,
            }
        }
        Commands::Stats {
            organization,
            format,
        } => {
            let root = config.project_root()?;
            match collect_stats(&root, organization.as_deref()).await? {
                StatsOutcome::Report(report) => match format.unwrap_or(config.display.format) {
                    OutputFormat::Table => write_stats_report(&mut io::stdout().lock(), &report)?,
                    OutputFormat::Json => print_json(&report)?,
                },
                StatsOutcome::UnknownOrganization { name, available } => {
                    let mut out = io::stdout().lock();
                    writeln!(out, "The organization \"{}\" does not exist", name)?;
                    writeln!(out)?;
                    write_available_organizations(&mut out, &available)?;
                }
            }
        }
        Commands::Scan {
            path,
            ignore,
            empty_only,
            format,
        } => {
            let mut ignore_paths: Vec<PathBuf> =
                config.ignore.paths.iter().map(PathBuf::from).collect();
            ignore_paths.extend(ignore);

            let walker = FileWalker::from_config(&config).with_cancellation(cancel_on_ctrl_c());
            let spinner = create_spinner(format!("扫描: {}", path.display()));
            let mut observer = |entry: &FileEntry| {
                spinner.inc(1);
                spinner.set_message(entry.path.display().to_string());
            };
            let entries = walker.scan(&path, &ignore_paths, Some(&mut observer)).await;
            spinner.finish_and_clear();

            let entries: Vec<FileEntry> = entries?
                .into_iter()
                .filter(|entry| !empty_only || (entry.is_directory && entry.is_empty))
                .collect();

            match format.unwrap_or(config.display.format) {
                OutputFormat::Table => write_entries(&mut io::stdout().lock(), &entries)?,
                OutputFormat::Json => print_json(&entries)?,
            }
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                println!("# {}", config_path.display());
                print!("{}", toml::to_string_pretty(&config)?);
            }
            ConfigAction::Reset => {
                Config::default().save_to_file(&config_path)?;
                println!("配置已重置: {}", config_path.display());
            }
            ConfigAction::Ignore { name } => {
                if config.add_ignored_file_name(&name) {
                    config.save_to_file(&config_path)?;
                    println!("已添加忽略文件名: {}", name);
                } else {
                    println!("已在忽略列表中: {}", name);
                }
            }
            ConfigAction::Unignore { name } => {
                if config.remove_ignored_file_name(&name) {
                    config.save_to_file(&config_path)?;
                    println!("已移除忽略文件名: {}", name);
                } else {
                    println!("不在忽略列表中: {}", name);
                }
            }
        },
    }

    Ok(())
}

/// 按下 Ctrl-C 时取消正在进行的扫描
fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let child = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("收到中断信号，正在取消扫描");
            child.cancel();
        }
    });
    token
}

/// 创建进度条
fn create_spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .template("{spinner:.green} [{elapsed_precise}] {pos} {msg}")
    {
        pb.set_style(style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]));
    }
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn write_entries<W: Write>(out: &mut W, entries: &[FileEntry]) -> io::Result<()> {
    for entry in entries {
        let marker = if entry.is_directory { 'd' } else { 'f' };
        let empty = if entry.is_directory && entry.is_empty {
            " (empty)"
        } else {
            ""
        };
        writeln!(out, "{} {}{}", marker, entry.path.display(), empty)?;
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}
