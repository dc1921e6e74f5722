// src/main.rs

use edithook::options::RunOptions;
use edithook::{cli, logging, run};

#[tokio::main]
async fn main() {
    match run_main().await {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("edithook error: {err:?}");
            std::process::exit(1);
        }
    }
}

async fn run_main() -> anyhow::Result<i32> {
    let args = cli::parse();
    let verbose = args
        .run_flags()
        .is_some_and(|flags| RunOptions::from_env().with_flags(flags).verbose);
    logging::init_logging(args.log_level, verbose)?;
    run(args).await
}
