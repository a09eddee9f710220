mod args;
mod election;

use clap::Parser;
use log::{debug, error, LevelFilter};
use snafu::ErrorCompat;

use crate::args::Args;

fn main() {
    let args = Args::parse();

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if args.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();
    debug!("args: {:?}", args);

    match election::run_election(&args) {
        Ok(result) => {
            println!("{}", result.winner);
        }
        Err(e) => {
            error!("Error occured {:?}", e);
            eprintln!("{}", e.user_message());
            if let Some(bt) = ErrorCompat::backtrace(&e) {
                debug!("trace: {}", bt);
            }
            std::process::exit(e.exit_code());
        }
    }
}
