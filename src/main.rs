// ==========================================
// 批次发货缺口分析 - 命令行入口
// ==========================================
// 子命令: reconcile / allocate / report / mail / run-all
// 退出码: 0 成功, 1 失败（错误输出到 stderr 并记录日志）
// ==========================================

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use despatch_shortfall::api::{AllocationApi, MailApi, PipelineApi, ReconcileApi, ReportApi};
use despatch_shortfall::config::ConfigManager;
use despatch_shortfall::logging;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode as ProcessExitCode;

#[derive(Parser)]
#[command(name = "despatch-shortfall")]
#[command(version, about = "Batch delivery failure analysis by storage area")]
#[command(after_help = "Environment:\n  RUST_LOG   Log filter (default: info)")]
struct Cli {
    /// JSON 配置文件（缺省使用内置默认值）
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// 以 JSON 输出阶段结果与日志
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 需求/发货对账，写出各交货类型缺口汇总
    Reconcile,
    /// 按库区优先级分配缺口
    Allocate {
        #[arg(long = "delivery-type")]
        delivery_types: Vec<String>,
    },
    /// 按库区汇总并生成图表序列
    Report {
        #[arg(long = "delivery-type")]
        delivery_types: Vec<String>,
    },
    /// 投递报表邮件
    Mail {
        #[arg(long)]
        report_date: String,
    },
    /// 依次执行全部阶段
    RunAll {
        /// 缺省为当天（dd/mm/yyyy）
        #[arg(long)]
        report_date: Option<String>,
    },
}

fn main() -> ProcessExitCode {
    let cli = Cli::parse();
    logging::init(cli.json);

    tracing::info!("==================================================");
    tracing::info!(
        "{} v{}",
        despatch_shortfall::APP_NAME,
        despatch_shortfall::VERSION
    );
    tracing::info!("==================================================");

    match run(cli) {
        Ok(()) => ProcessExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %format!("{:#}", err), "执行失败");
            eprintln!("error: {:#}", err);
            ProcessExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let manager = ConfigManager::load(cli.config.as_deref()).context("加载配置失败")?;
    let snapshot = manager.get_config_snapshot()?;
    tracing::info!(source = ?manager.source(), snapshot = %snapshot, "配置已加载");
    let config = manager.into_config();
    let json = cli.json;

    match cli.command {
        Commands::Reconcile => {
            let response = ReconcileApi::new(config)
                .run()
                .context("reconcile 阶段失败")?;
            for a in &response.artifacts {
                let line = format!(
                    "{}: {} materials, total diff {} -> {}",
                    a.delivery_type,
                    a.materials,
                    a.total_diff,
                    a.path.display()
                );
                println_text(json, &line);
            }
            emit_json(json, &response)
        }
        Commands::Allocate { delivery_types } => {
            let response = AllocationApi::new(config)
                .run(&delivery_types)
                .context("allocate 阶段失败")?;
            for a in &response.artifacts {
                let line = format!(
                    "{}: {} rows, allocated {}, NoStock {} -> {}",
                    a.delivery_type,
                    a.rows,
                    a.allocated_total,
                    a.no_stock_total,
                    a.path.display()
                );
                println_text(json, &line);
            }
            emit_json(json, &response)
        }
        Commands::Report { delivery_types } => {
            let artifacts = ReportApi::new(config)
                .run(&delivery_types)
                .context("report 阶段失败")?;
            for a in &artifacts {
                println_text(json, &a.series.title);
                for (label, _) in a.series.labelled_values() {
                    println_text(json, &format!("  {}", label));
                }
            }
            emit_json(json, &artifacts)
        }
        Commands::Mail { report_date } => {
            let outcome = MailApi::new(config)
                .run(&report_date)
                .context("mail 阶段失败")?;
            let line = format!("{:?}", outcome);
            println_text(json, &line);
            emit_json(json, &outcome)
        }
        Commands::RunAll { report_date } => {
            let report_date = report_date
                .unwrap_or_else(|| chrono::Local::now().format("%d/%m/%Y").to_string());
            let response = PipelineApi::new(config)
                .run_all(&report_date)
                .context("run-all 失败")?;
            let line = format!(
                "completed: {} summaries, {} allocation tables, {} charts",
                response.reconcile.artifacts.len(),
                response.allocation.artifacts.len(),
                response.reports.len()
            );
            println_text(json, &line);
            emit_json(json, &response)
        }
    }
}

fn println_text(json: bool, line: &str) {
    if !json {
        println!("{}", line);
    }
}

fn emit_json<T: Serialize>(json: bool, value: &T) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}
