mod cmd;
mod flags;
mod options;
mod output;

use tracing_subscriber::{prelude::*, EnvFilter};

fn main() {
    configure_tracing();
    let flags = flags::parse_flags();
    tracing::debug!(?flags, "parsed flags");

    // Failures are reported on the terminal only, the wrapper itself always exits 0.
    match cmd::run_amass_enum(&flags) {
        Ok(report) => println!("{}", report.message()),
        Err(err) => {
            println!("An error occurred: {}", err);
            for cause in err.iter().skip(1) {
                println!("Caused by: {}", cause);
            }
        }
    }
}

fn configure_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
