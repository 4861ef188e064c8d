//! WaterFlow CLI 工具
//!
//! 交互式命令行界面

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use waterflow::cli::{execute_command, CommandCompleter, CommandResult, Session};
use waterflow::config::{
    AnalysisConfig, DEFAULT_DATA_FILE, DEFAULT_PRIORITY_PENALTY, MAX_PRIORITY_PENALTY,
};

#[derive(Parser, Debug)]
#[command(name = "waterflow-cli")]
#[command(about = "WaterFlow 水资源分配交互式命令行")]
struct Args {
    /// 数据文件路径
    #[arg(short, long, default_value = DEFAULT_DATA_FILE)]
    data_file: PathBuf,

    /// 优先级惩罚权重
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_PRIORITY_PENALTY,
        value_parser = clap::value_parser!(i64).range(0..=MAX_PRIORITY_PENALTY)
    )]
    priority_penalty: i64,

    /// 启动时立即加载数据文件
    #[arg(short, long)]
    load: bool,

    /// 执行单条命令后退出
    #[arg(short = 'e', long)]
    execute: Option<String>,
}

fn history_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".waterflow_history"))
}

fn print_result(result: CommandResult) -> bool {
    match result {
        CommandResult::Exit => return true,
        CommandResult::Continue => {}
        CommandResult::Message(m) => print!("{}", m),
        CommandResult::Error(e) => println!("{} {}", "错误:".red().bold(), e),
    }
    false
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();
    let config = AnalysisConfig::new()
        .with_data_file(args.data_file)
        .with_priority_penalty(args.priority_penalty);
    let mut session = Session::new(config);

    // 单条命令模式
    if let Some(command) = args.execute {
        if args.load {
            print_result(execute_command("load", &mut session));
        }
        print_result(execute_command(&command, &mut session));
        return Ok(());
    }

    println!("WaterFlow - 水资源分配规划 (MCMF) v{}", waterflow::VERSION);
    println!("==============================================");
    println!("数据文件: {}", session.config().data_file.display());
    println!("\n输入 'help' 查看命令列表，'quit' 退出\n");

    let mut editor: Editor<CommandCompleter, DefaultHistory> = Editor::new()?;
    editor.set_helper(Some(CommandCompleter::new()));

    let history = history_path();
    if let Some(path) = &history {
        // 首次运行时历史文件不存在
        let _ = editor.load_history(path);
    }

    if args.load {
        print_result(execute_command("load", &mut session));
    }

    loop {
        if let (Some(helper), Some(dataset)) = (editor.helper_mut(), session.dataset()) {
            helper.set_place_names(dataset.places().iter().map(|p| p.name.clone()).collect());
        }

        match editor.readline("waterflow> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line);
                if print_result(execute_command(line, &mut session)) {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    if let Some(path) = &history {
        if let Err(e) = editor.save_history(path) {
            tracing::warn!(error = %e, "保存命令历史失败");
        }
    }

    println!("再见！");
    Ok(())
}
