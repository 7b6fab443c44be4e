use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "sudoku-client")]
#[command(about = "Terminal client for a remote sudoku solver service")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,

    #[arg(long, global = true, help = "Session file shared between invocations")]
    pub session: Option<String>,

    #[arg(long, global = true, help = "Optional TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, global = true, help = "Solver request timeout in seconds")]
    pub timeout_secs: Option<u64>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// 清空 session 並記住服務位址
    Start {
        #[arg(long)]
        url: Option<String>,
    },
    /// 送出盤面求解
    Solve {
        #[arg(long = "row", value_name = "DIGITS", conflicts_with = "grid")]
        rows: Vec<String>,

        #[arg(long, value_name = "81 CHARS")]
        grid: Option<String>,
    },
    /// 顯示已儲存的解答
    Solved,
    Reset,
    Show,
}
