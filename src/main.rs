use anyhow::{anyhow, Result};
use clap::{App, Arg, ArgMatches, SubCommand};
use dripfeed::build::{publish, report};
use dripfeed::config::Config;
use std::path::PathBuf;

fn main() {
    env_logger::init();

    let matches = App::new("dripfeed")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Publishes the next blog post from the topics list")
        .arg(
            Arg::with_name("project")
                .long("project")
                .takes_value(true)
                .value_name("DIR")
                .help("The project directory (defaults to the current directory)"),
        )
        .subcommand(
            SubCommand::with_name("publish")
                .about("Publishes the next unpublished topic (the default)"),
        )
        .subcommand(
            SubCommand::with_name("analytics")
                .about("Injects the Google Analytics snippet into the site's pages")
                .arg(
                    Arg::with_name("id")
                        .long("id")
                        .takes_value(true)
                        .value_name("MEASUREMENT_ID")
                        .help("The GA4 measurement ID (defaults to `analytics_id` from dripfeed.yaml)"),
                ),
        )
        .get_matches();

    if let Err(e) = run(&matches) {
        eprintln!("[error] {:#}", e);
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<()> {
    let project = match matches.value_of("project") {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir()?,
    };
    let config = Config::from_directory(&project)?;

    match matches.subcommand() {
        ("analytics", Some(sub)) => run_analytics(&config, sub),
        _ => run_publish(&config),
    }
}

fn run_publish(config: &Config) -> Result<()> {
    let today = chrono::Local::now().naive_local().date();
    let outcome = publish(config, today)?;
    println!("{}", report(config, &outcome));
    Ok(())
}

fn run_analytics(config: &Config, matches: &ArgMatches) -> Result<()> {
    let id = match matches.value_of("id") {
        Some(id) => id.to_owned(),
        None => config.analytics_id.clone().ok_or_else(|| {
            anyhow!("no measurement ID: pass `--id` or set `analytics_id` in dripfeed.yaml")
        })?,
    };

    let changed = dripfeed::analytics::inject_all(&config.root_directory, &config.blog_directory, &id)?;
    for path in &changed {
        println!("Injected GA into: {}", path.display());
    }
    println!("Done. Files updated: {}", changed.len());
    Ok(())
}
