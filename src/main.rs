// LineTalk - single-connection line relay
use clap::Parser;
use linetalk::cli::{execute_command, Args};

fn main() {
    let args = Args::parse();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: Failed to start runtime: {}", e);
            std::process::exit(1);
        }
    };

    let result = runtime.block_on(execute_command(args));

    // A console read may still be parked in the blocking pool after Ctrl-C;
    // do not wait for the operator to press Enter.
    runtime.shutdown_background();

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
