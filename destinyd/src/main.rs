use destinyd::{cli, load_config, params_json, select_configured_params, ui};
use std::process;
use tracing::error;

fn main() {
    // Parse command line arguments
    let args = cli::parse_args();

    // Initialize logging
    init_logging(&args);

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => fail(&e.to_string()),
    };

    let params = match select_configured_params(&config) {
        Ok(params) => params,
        Err(e) => fail(&format!("Failed to select chain parameters: {}", e)),
    };

    if args.print_params {
        match params_json(params) {
            Ok(json) => println!("{}", json),
            Err(e) => fail(&e.to_string()),
        }
        return;
    }

    ui::print_banner(env!("CARGO_PKG_VERSION"), &params.network().to_string());
    ui::print_params_summary(params);
    println!();
    ui::print_status("✓", &format!("Chain parameters selected for {}", params.network()), ui::StatusType::Success);
}

fn fail(message: &str) -> ! {
    ui::print_status("✗", message, ui::StatusType::Error);
    error!("{}", message);
    process::exit(1);
}

fn init_logging(args: &cli::Args) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt().with_env_filter(filter).with_target(true).with_thread_ids(true).init();
}
