use std::env;
use std::process;

use mlp_trainer::config::{run, RunConfig, USAGE};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{USAGE}");
        return;
    }

    let config = match RunConfig::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}\n\n{USAGE}");
            process::exit(1);
        }
    };

    if let Err(e) = run(&config, &mut std::io::stdout().lock()) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
