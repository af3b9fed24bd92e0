use clap::Parser;
use sitechoice::app::cli::CliArgs;

fn main() {
    env_logger::init();
    log::debug!("cwd: {:?}", std::env::current_dir());
    let args = CliArgs::parse();
    log::info!("starting sitechoice at {}", chrono::Local::now().to_rfc3339());
    match args.run() {
        Ok(_) => {}
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    }
}
