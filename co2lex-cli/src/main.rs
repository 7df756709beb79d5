use std::process;

use co2lex_cli::{run, Config, RunResult};

fn main() {
    env_logger::init();

    let config = match Config::new() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{}", error);
            process::exit(2);
        }
    };

    if run(config) != RunResult::Ok {
        process::exit(1);
    }
}
