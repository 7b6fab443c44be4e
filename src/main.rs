use clap::Parser;
use sudoku_client::config::Command;
use sudoku_client::utils::{logger, validation::validate_url};
use sudoku_client::{
    CliConfig, ClientController, ClientSettings, FileStore, HttpSolver, RecordingNavigator,
    Result, SudokuError, TextForm,
};
use tokio_util::sync::CancellationToken;

type Controller = ClientController<FileStore, TextForm, RecordingNavigator, HttpSolver>;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let settings = match ClientSettings::from_cli(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(e.exit_code());
        }
    };

    // 初始化日誌
    match (&settings.log_level, cli.verbose) {
        _ if cli.log_json => logger::init_json_logger(),
        (Some(level), false) => logger::init_logger_with_level(level),
        _ => logger::init_cli_logger(cli.verbose),
    }
    tracing::debug!("CLI config: {:?}", cli);
    tracing::debug!("Resolved settings: {:?}", settings);

    if let Err(e) = run(cli.command, &settings).await {
        tracing::error!("❌ {} (exit code {})", e, e.exit_code());
        eprintln!("❌ {}", e);
        std::process::exit(e.exit_code());
    }
}

fn controller(settings: &ClientSettings, form: TextForm) -> Controller {
    ClientController::new(
        FileStore::new(&settings.session_path),
        form,
        RecordingNavigator::new(),
        HttpSolver::new(settings.timeout),
    )
}

fn form_from_args(rows: &[String], grid: Option<&str>) -> Result<TextForm> {
    match grid {
        Some(grid) => {
            let cells: Vec<String> = grid
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| c.to_string())
                .collect();
            TextForm::from_cells(&cells)
        }
        None if !rows.is_empty() => TextForm::from_lines(rows),
        None => Err(SudokuError::Config {
            message: "provide the puzzle with nine --row values or one --grid".to_string(),
        }),
    }
}

async fn run(command: Command, settings: &ClientSettings) -> Result<()> {
    match command {
        Command::Start { url } => {
            let url = url
                .or_else(|| settings.base_url.clone())
                .ok_or_else(|| SudokuError::Config {
                    message: "no --url given and no service.base_url configured".to_string(),
                })?;
            validate_url("url", &url)?;

            controller(settings, TextForm::new()).start(&url)?;
            println!("✅ Session started for {}", url);
        }
        Command::Solve { rows, grid } => {
            let ctrl = controller(settings, form_from_args(&rows, grid.as_deref())?);

            let cancel = CancellationToken::new();
            let on_interrupt = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    on_interrupt.cancel();
                }
            });

            let output = ctrl.solve_with_cancel(&cancel).await?;
            if let Some(navigation) = ctrl.navigator().last() {
                println!("➡️  {}", navigation.target());
            }
            println!("{}", output);
        }
        Command::Solved => {
            let mut ctrl = controller(settings, TextForm::new());
            ctrl.solved()?;
            print!("{}", ctrl.form().render());
        }
        Command::Reset => {
            let ctrl = controller(settings, TextForm::new());
            ctrl.reset()?;
            match ctrl.navigator().last() {
                Some(navigation) => println!("➡️  {}", navigation.target()),
                None => println!("No service URL stored"),
            }
        }
        Command::Show => {
            let ctrl = controller(settings, TextForm::new());
            println!("Service URL: {}", ctrl.get_url()?.unwrap_or_default());
            match ctrl.get_input_sudoku()? {
                Some(grid) => println!("Input sudoku:\n{}", grid),
                None => println!("Input sudoku: <none>"),
            }
            match ctrl.get_output_sudoku()? {
                Some(grid) => println!("Output sudoku:\n{}", grid),
                None => println!("Output sudoku: <none>"),
            }
        }
    }

    Ok(())
}
