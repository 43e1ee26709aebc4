use clap::Parser;
use gpu_value::app::shell::run_shell;
use gpu_value::core::ConfigProvider;
use gpu_value::utils::error::ErrorSeverity;
use gpu_value::utils::{logger, validation::Validate};
use gpu_value::{
    BenchmarkCatalog, CliConfig, Command, DisplayOptions, GpuValueError, LocalStorage,
    PersistenceAdapter, ValueApp,
};
use std::io::Write;

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose, config.log_json);
    tracing::debug!("CLI config: {:?}", config);

    let exit_code = match run(&config) {
        Ok(()) => 0,
        Err(e) => report(&e),
    };
    std::process::exit(exit_code);
}

fn run(config: &CliConfig) -> anyhow::Result<()> {
    let settings = config.settings()?;
    settings.validate()?;

    let catalog = match settings.catalog_path() {
        Some(path) => BenchmarkCatalog::from_path(path)?,
        None => BenchmarkCatalog::load(),
    };

    let storage = LocalStorage::new(settings.data_dir());
    let persistence = PersistenceAdapter::with_key(storage, settings.storage_key());
    let display = DisplayOptions::from_config(&settings);
    let mut app = ValueApp::mount(catalog, persistence, display);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &config.command {
        Command::Models { query } => {
            write!(out, "{}", app.render_models(query.as_deref().unwrap_or("")))?;
        }
        Command::Add { model, price } => {
            app.on_model_selected(model)?;
            app.on_price_changed(price);
            let entry = app.on_add_clicked().map_err(GpuValueError::from)?;
            writeln!(out, "{}", app.render_entry(&entry))?;
            write!(out, "{}", app.render_table())?;
        }
        Command::Remove { id } => match app.on_remove_clicked(id)? {
            Some(entry) => {
                writeln!(out, "Removed {}", entry.name)?;
                write!(out, "{}", app.render_table())?;
            }
            None => {
                tracing::warn!("No entry matched '{}'", id);
                writeln!(out, "No GPU with id '{}', nothing removed", id)?;
            }
        },
        Command::List => {
            write!(out, "{}", app.render_table())?;
        }
        Command::Export { format, output } => match output {
            Some(path) => {
                let file = std::fs::File::create(path)?;
                gpu_value::app::view::export(app.rows(), *format, file)?;
                tracing::info!("Exported {} rows to {}", app.rows().len(), path.display());
            }
            None => gpu_value::app::view::export(app.rows(), *format, &mut out)?,
        },
        Command::Shell => {
            let stdin = std::io::stdin();
            run_shell(&mut app, stdin.lock(), &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}

/// Prints the failure and maps its severity to an exit code.
fn report(error: &anyhow::Error) -> i32 {
    let Some(e) = error.downcast_ref::<GpuValueError>() else {
        tracing::error!("❌ {:#}", error);
        eprintln!("❌ {:#}", error);
        return 1;
    };

    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
