use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use project_organizer::config::OutputFormat;

#[derive(Parser)]
#[command(name = "project")]
#[command(about = "按组织管理项目目录：创建、搜索和统计")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 配置文件路径
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// 详细输出
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 创建新项目
    Make {
        /// 组织名
        organization: String,

        /// 项目名，例如 "tax returns"
        name: String,

        /// 同时在工作区根目录下创建同名目录
        #[arg(short, long)]
        workspace: bool,

        /// 不写入 project.toml
        #[arg(short = 'n', long)]
        no_project_file: bool,

        /// 目录名使用的日期 (YYYY-MM-DD)，默认今天
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// 按名称搜索项目
    Find {
        /// 搜索词，空字符串匹配所有项目
        query: String,

        /// 只保留包含此扩展名文件的项目，例如 .blend
        #[arg(short, long)]
        extension: Option<String>,

        /// 输出格式
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// 按创建年份统计项目数量
    Stats {
        /// 只统计此组织
        organization: Option<String>,

        /// 输出格式
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// 递归列出目录中的所有条目
    Scan {
        /// 要扫描的目录
        path: PathBuf,

        /// 忽略的路径（可多次指定）
        #[arg(short, long)]
        ignore: Vec<PathBuf>,

        /// 只列出空目录
        #[arg(long)]
        empty_only: bool,

        /// 输出格式
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// 管理配置
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// 显示当前配置
    Show,

    /// 重置为默认配置
    Reset,

    /// 添加总是忽略的文件名
    Ignore {
        /// 文件名，例如 desktop.ini
        name: String,
    },

    /// 移除总是忽略的文件名
    Unignore {
        /// 文件名
        name: String,
    },
}
