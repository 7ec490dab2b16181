use argh::FromArgs;
use anyhow::Context;
use city_weather::{CityWeather, Config};
use std::env;
use std::path::PathBuf;

#[derive(FromArgs)]
/// Classify sunny and rainy days for a list of cities.
struct Args {
    /// path to a TOML configuration file
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// city to include; repeat to list several. Replaces the configured cities.
    #[argh(option)]
    city: Vec<String>,

    /// number of past days to fetch
    #[argh(option)]
    days_before: Option<u32>,

    /// number of future days to fetch
    #[argh(option)]
    days_after: Option<u32>,

    /// skip a city/day whose weather fetch fails instead of aborting
    #[argh(switch)]
    continue_on_error: bool,

    /// log filter used when RUST_LOG is unset
    #[argh(option, default = "String::from(\"info\")")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args: Args = argh::from_env();

    let env = env_logger::Env::default().default_filter_or(args.log_level.as_str());
    env_logger::init_from_env(env);

    if let Err(e) = run(args).await {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    let config = apply_overrides(config, &args);
    log::debug!("Using {:?}", config);

    let client = CityWeather::new(config)?;
    let daily = client
        .daily_summary()
        .call()
        .await?
        .frame
        .collect()
        .context("Failed to build the daily table")?;

    configure_polars_display();
    println!("{}", daily);
    Ok(())
}

fn apply_overrides(mut config: Config, args: &Args) -> Config {
    if !args.city.is_empty() {
        config.cities = args.city.clone();
    }
    if let Some(days) = args.days_before {
        config.window.days_before = days;
    }
    if let Some(days) = args.days_after {
        config.window.days_after = days;
    }
    if args.continue_on_error {
        config.continue_on_error = true;
    }
    config
}

fn configure_polars_display() {
    // show every column and row
    env::set_var("POLARS_FMT_MAX_COLS", "-1");
    env::set_var("POLARS_FMT_MAX_ROWS", "-1");
}
