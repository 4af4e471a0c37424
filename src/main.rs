#![deny(clippy::all)]
use std::process::exit;

use clap::Parser;
use colored::Colorize;
use forum_parser::cli::{self, Cli, CliError, Mode};
use forum_parser::{ForumConfig, HttpFetcher};

fn main() {
    let args: Cli = Cli::parse();

    env_logger::builder().format_timestamp(None).init();

    if let Err(error) = try_main(&args) {
        eprintln!("{} {}", "ERROR:".bold().red(), error);
        exit(2);
    }
}

fn try_main(args: &Cli) -> Result<(), CliError> {
    let mode = args.mode()?;

    // Every request goes to the reader mirror once it answered the status check
    let config = ForumConfig::default().reader()?;
    let fetcher = HttpFetcher::new(&config)?;
    fetcher.check_status()?;

    let page = match cli::run(&mode, &config, &fetcher)? {
        Some(page) => page,
        None => {
            print_not_found(&mode);
            return Ok(());
        }
    };

    match &args.json {
        Some(path) => {
            cli::write_json(&page, path)?;
            println!(
                "{} '{}' {}",
                "JSON file".bold(),
                path.display().to_string().bold().blue(),
                "was successfully created.".bold()
            );
        }
        None => println!("{}", cli::to_pretty_json(&page)?),
    }

    Ok(())
}

fn print_not_found(mode: &Mode) {
    if let Mode::Post(post_id) = mode {
        eprintln!(
            "{} {} {}",
            "Post".bold().yellow(),
            post_id.bold().blue(),
            "was not found.".bold().yellow()
        );
    }
}
