use std::process::ExitCode;
use std::time::Duration;

use chrono::{Datelike, Local, NaiveDate};
use clap::{ArgAction, Parser, Subcommand};
use medimate::{
    Call, ClientConfig, ConfigError, CulturalContext, ENV_API_KEY, HalalValidationRequest,
    MalaysianState, MediMate, MediMateError, SupportedLanguage, TranslationRequest,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Query the MediMate Malaysia healthcare API.
///
/// Results are printed as JSON. The API key is read from --api-key,
/// MEDIMATE_API_KEY or a .env file.
///
/// Examples:
///   medimate prayer-times KUL
///   medimate --language ms translate "Take twice daily" --to zh
///   medimate validate-medication "Paracetamol 500mg" --manufacturer Duopharma
#[derive(Debug, Parser)]
#[command(name = "medimate")]
#[command(version)]
#[command(about = "Query the MediMate Malaysia healthcare API")]
struct Cli {
    /// API key (mk_live_... or mk_test_...).
    #[arg(long, env = "MEDIMATE_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// API root URL.
    #[arg(long, env = "MEDIMATE_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, value_name = "SECS", global = true)]
    timeout: Option<u64>,

    /// Malaysian state code sent with every request (KUL, SGR, JHR, ...).
    #[arg(long, value_parser = parse_state, global = true)]
    state: Option<MalaysianState>,

    /// Preferred language sent with every request (ms, en, zh, ta).
    #[arg(long, value_parser = parse_language, global = true)]
    language: Option<SupportedLanguage>,

    /// Require halal-compliant recommendations.
    #[arg(long, global = true)]
    halal: bool,

    /// Do not mark requests as prayer-time aware.
    #[arg(long, global = true)]
    no_prayer_times: bool,

    /// Use the blocking transport instead of the async one.
    #[arg(long, global = true)]
    blocking: bool,

    /// Log request bodies and client internals.
    #[arg(long, global = true)]
    debug: bool,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check API health.
    Health,

    /// Show the cultural context the API resolved for this client.
    Context,

    /// Prayer times for a state.
    PrayerTimes {
        #[arg(value_parser = parse_state)]
        state: MalaysianState,

        /// Day to look up (YYYY-MM-DD); defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Current prayer and scheduling status for a state.
    PrayerStatus {
        #[arg(value_parser = parse_state)]
        state: MalaysianState,
    },

    /// Translate healthcare text.
    Translate {
        text: String,

        /// Target language.
        #[arg(long, value_parser = parse_language)]
        to: SupportedLanguage,

        /// Source language.
        #[arg(long, value_parser = parse_language, default_value = "en")]
        from: SupportedLanguage,
    },

    /// Check a medication's halal status.
    ValidateMedication {
        name: String,

        #[arg(long)]
        manufacturer: Option<String>,

        /// Active ingredient; repeat for several.
        #[arg(long = "ingredient", value_name = "INGREDIENT")]
        ingredients: Vec<String>,
    },

    /// List supported languages.
    Languages,

    /// Cultural and religious events for a year.
    Events {
        /// Defaults to the current year.
        year: Option<i32>,

        /// Only events observed in this state.
        #[arg(long = "in", value_name = "STATE", value_parser = parse_state)]
        in_state: Option<MalaysianState>,

        /// Only events of this religion.
        #[arg(long)]
        religion: Option<String>,
    },

    /// Ramadan dates and healthcare considerations.
    Ramadan {
        /// Defaults to the current year.
        year: Option<i32>,

        /// Localize for this state.
        #[arg(long = "in", value_name = "STATE", value_parser = parse_state)]
        in_state: Option<MalaysianState>,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] MediMateError),

    #[error("failed to start async runtime: {0}")]
    Runtime(std::io::Error),

    #[error("failed to render response: {0}")]
    Render(#[from] serde_json::Error),
}

fn parse_state(raw: &str) -> Result<MalaysianState, String> {
    raw.parse().map_err(|_| {
        format!("unknown state {raw:?}; expected one of KUL, SGR, JHR, PNG, PRK, PHG, TRG, KTN, PLS, KDH, MLK, NSN, SWK, SBH, LBN, PJY")
    })
}

fn parse_language(raw: &str) -> Result<SupportedLanguage, String> {
    raw.parse()
        .map_err(|_| format!("unknown language {raw:?}; expected one of ms, en, zh, ta"))
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.debug);

    match run(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            if let CliError::Api(api) = &err {
                if let Some(wait) = api.retry_after() {
                    eprintln!("hint: retry in {} seconds", wait.as_secs());
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8, debug: bool) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) if debug => "info,medimate=debug".to_string(),
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,medimate=info".to_string(),
            _ => "info,medimate=debug".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn build_client(cli: &Cli) -> Result<MediMate, CliError> {
    let api_key = cli
        .api_key
        .clone()
        .ok_or(ConfigError::MissingSetting { name: ENV_API_KEY })?;

    let mut cultural = CulturalContext::default().prayer_time_aware(!cli.no_prayer_times);
    cultural.state = cli.state;
    if let Some(language) = cli.language {
        cultural.language = Some(language);
    }
    cultural.halal_requirements = cli.halal;

    let mut builder = ClientConfig::builder(api_key)
        .debug(cli.debug)
        .cultural_context(cultural);
    if let Some(base_url) = &cli.base_url {
        builder = builder.base_url(base_url.as_str());
    }
    if let Some(secs) = cli.timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    Ok(MediMate::with_config(builder.build()?)?)
}

/// How calls are sent: on this thread, or on a runtime built for the purpose.
enum Transport {
    Blocking,
    Async(tokio::runtime::Runtime),
}

impl Transport {
    fn new(blocking: bool) -> Result<Self, CliError> {
        if blocking {
            debug!("Using blocking transport");
            return Ok(Self::Blocking);
        }
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(CliError::Runtime)?;
        debug!("Using async transport");
        Ok(Self::Async(runtime))
    }

    fn render<T>(&self, call: Call<'_, T>) -> Result<String, CliError>
    where
        T: DeserializeOwned + Serialize,
    {
        let value = match self {
            Self::Blocking => call.send_blocking()?,
            Self::Async(runtime) => runtime.block_on(call.send())?,
        };
        Ok(serde_json::to_string_pretty(&value)?)
    }
}

fn run(cli: &Cli) -> Result<String, CliError> {
    let client = build_client(cli)?;
    let transport = Transport::new(cli.blocking)?;
    let cultural = client.cultural();
    let this_year = Local::now().year();

    let output = match &cli.command {
        Command::Health => transport.render(client.health()),
        Command::Context => transport.render(client.context()),
        Command::PrayerTimes { state, date } => {
            transport.render(cultural.prayer_times(*state, *date))
        }
        Command::PrayerStatus { state } => {
            transport.render(cultural.current_prayer_status(*state))
        }
        Command::Translate { text, to, from } => transport.render(
            cultural.translate(&TranslationRequest::new(text.as_str(), *to).from_language(*from)),
        ),
        Command::ValidateMedication {
            name,
            manufacturer,
            ingredients,
        } => {
            let mut request = HalalValidationRequest::new(name.as_str());
            if let Some(manufacturer) = manufacturer {
                request = request.manufacturer(manufacturer.as_str());
            }
            if !ingredients.is_empty() {
                request = request.active_ingredients(ingredients.iter().map(String::as_str));
            }
            transport.render(cultural.validate_medication(&request))
        }
        Command::Languages => transport.render(cultural.supported_languages()),
        Command::Events {
            year,
            in_state,
            religion,
        } => transport.render(cultural.cultural_events(
            year.unwrap_or(this_year),
            *in_state,
            religion.as_deref(),
        )),
        Command::Ramadan { year, in_state } => {
            transport.render(cultural.ramadan_info(year.unwrap_or(this_year), *in_state))
        }
    };

    client.close();
    output
}
