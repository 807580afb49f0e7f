use clap::Parser;
use rstat::utils::error::{ErrorSeverity, RstatError};
use rstat::utils::{logger, validation::Validate};
use rstat::{render_report, CliConfig, HttpStatusFetcher, StatusChecker};
use std::io::Write;

fn exit_with(e: &RstatError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::Medium | ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let settings = match cli.settings() {
        Ok(settings) => settings,
        Err(e) => exit_with(&e),
    };
    if let Err(e) = settings.validate() {
        exit_with(&e);
    }

    let fetcher = match HttpStatusFetcher::from_config(&settings) {
        Ok(fetcher) => fetcher,
        Err(e) => exit_with(&e),
    };
    tracing::debug!("Using status endpoint {}", fetcher.endpoint());

    let checker = StatusChecker::new(fetcher, settings);
    let report = match checker.run().await {
        Ok(report) => report,
        Err(e) => exit_with(&e),
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let rendered = render_report(&report, cli.render_options(), &mut out)
        .and_then(|()| out.flush().map_err(RstatError::from));
    if let Err(e) = rendered {
        exit_with(&e);
    }
}
