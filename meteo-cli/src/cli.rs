use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use inquire::{Select, Text};
use meteo_core::{
    Config, ForecastRequest, GeocodingQuery, Geolocation, OpenMeteoClient, SavedLocation,
    convert_weather_code,
    forecast::{DailyVariable, HourlyVariable, PastDays, TemperatureUnit, WindSpeedUnit},
};
use std::fmt;
use tracing::debug;

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "meteo", version, about = "Open-Meteo forecasts from the terminal")]
pub struct Cli {
    /// Log requests and responses to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the forecast for a place, coordinates, or the configured default location.
    Forecast {
        /// Place name to look up; the first match is used.
        place: Option<String>,

        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Hourly variables, comma separated (e.g. temperature_2m,precipitation).
        #[arg(long, value_delimiter = ',', value_parser = parse_token::<HourlyVariable>)]
        hourly: Vec<HourlyVariable>,

        /// Daily variables, comma separated (e.g. temperature_2m_max,sunrise).
        #[arg(long, value_delimiter = ',', value_parser = parse_token::<DailyVariable>)]
        daily: Vec<DailyVariable>,

        /// Include 0, 1 or 2 past days.
        #[arg(long, visible_alias = "days-past", value_parser = parse_token::<PastDays>)]
        past_days: Option<PastDays>,

        #[arg(long, requires = "end_date")]
        start_date: Option<NaiveDate>,

        #[arg(long, requires = "start_date")]
        end_date: Option<NaiveDate>,

        /// IANA timezone name; defaults to the location's own timezone.
        #[arg(long, default_value = "auto")]
        timezone: String,

        #[arg(long, value_parser = parse_token::<TemperatureUnit>)]
        temperature_unit: Option<TemperatureUnit>,

        /// Shorthand for --temperature-unit fahrenheit.
        #[arg(long, conflicts_with = "temperature_unit")]
        fahrenheit: bool,

        #[arg(long, value_parser = parse_token::<WindSpeedUnit>)]
        windspeed_unit: Option<WindSpeedUnit>,

        /// Skip the current-conditions snapshot.
        #[arg(long)]
        no_current: bool,
    },

    /// Search places by name.
    Geocode {
        name: String,

        /// Maximum number of results.
        #[arg(long)]
        count: Option<u32>,

        /// Language for result names, e.g. "en" or "de".
        #[arg(long)]
        language: Option<String>,
    },

    /// Describe a WMO weather code.
    Code {
        #[arg(allow_negative_numbers = true)]
        code: i64,
    },

    /// Interactively pick a default location, units and language.
    Configure,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Forecast {
                place,
                lat,
                lon,
                hourly,
                daily,
                past_days,
                start_date,
                end_date,
                timezone,
                temperature_unit,
                fahrenheit,
                windspeed_unit,
                no_current,
            } => {
                let (config, client) = load_config_and_client()?;
                let location = match (lat, lon, place) {
                    (Some(latitude), Some(longitude), _) => SavedLocation {
                        name: format!("{latitude}, {longitude}"),
                        latitude,
                        longitude,
                    },
                    (_, _, Some(place)) => resolve_place(&client, &config, &place).await?,
                    _ => config.require_default_location()?.clone(),
                };
                debug!(?location, "resolved location");

                let mut request = ForecastRequest::new(location.latitude, location.longitude)
                    .hourly(hourly)
                    .daily(daily)
                    .current_weather(!no_current)
                    .timezone(timezone);
                let temperature_unit =
                    if fahrenheit { Some(TemperatureUnit::Fahrenheit) } else { temperature_unit };
                request.temperature_unit = temperature_unit.or(config.temperature_unit);
                request.windspeed_unit = windspeed_unit.or(config.windspeed_unit);
                request.past_days = past_days;
                request.start_date = start_date;
                request.end_date = end_date;

                let forecast = client
                    .forecast(&request)
                    .await
                    .with_context(|| format!("Failed to fetch forecast for {}", location.name))?;

                print!("{}", output::render_forecast(&location.name, &forecast));
            }
            Command::Geocode { name, count, language } => {
                let (config, client) = load_config_and_client()?;
                let query = GeocodingQuery {
                    name,
                    count,
                    language: language.or_else(|| config.language.clone()),
                };

                let response = client
                    .query_geocoding(query)
                    .await
                    .context("Failed to search places")?;

                print!("{}", output::render_places(&response.results));
            }
            Command::Code { code } => match convert_weather_code(code) {
                Some(label) => println!("{code}: {label}"),
                None => println!("{code}: unknown weather code"),
            },
            Command::Configure => {
                let (mut config, client) = load_config_and_client()?;
                configure(&client, &mut config).await?;
                config.save()?;
                println!("Saved configuration to {}", Config::config_file_path()?.display());
            }
        }

        Ok(())
    }
}

fn load_config_and_client() -> Result<(Config, OpenMeteoClient)> {
    let config = Config::load()?;
    let client =
        OpenMeteoClient::from_config(&config).context("Failed to initialise HTTP client")?;
    Ok((config, client))
}

async fn resolve_place(client: &OpenMeteoClient, config: &Config, place: &str) -> Result<SavedLocation> {
    let query = GeocodingQuery {
        name: place.to_string(),
        count: Some(1),
        language: config.language.clone(),
    };

    let response = client
        .query_geocoding(query)
        .await
        .with_context(|| format!("Failed to look up '{place}'"))?;

    match response.results.first() {
        Some(hit) => Ok(SavedLocation::from(hit)),
        None => bail!("No place found matching '{place}'."),
    }
}

struct PlaceChoice(Geolocation);

impl fmt::Display for PlaceChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2}, {:.2})", self.0.display_name(), self.0.latitude, self.0.longitude)
    }
}

async fn configure(client: &OpenMeteoClient, config: &mut Config) -> Result<()> {
    let language = Text::new("Language for place names (leave empty for English):")
        .with_default(config.language.as_deref().unwrap_or(""))
        .prompt()?;
    config.language = Some(language.trim().to_string()).filter(|l| !l.is_empty());

    let place = Text::new("Default location:").prompt()?;
    let query = GeocodingQuery {
        name: place.trim().to_string(),
        count: Some(10),
        language: config.language.clone(),
    };
    let response = client.query_geocoding(query).await.context("Failed to search places")?;
    if response.results.is_empty() {
        bail!("No place found matching '{}'.", place.trim());
    }

    let choices = response.results.into_iter().map(PlaceChoice).collect::<Vec<_>>();
    let PlaceChoice(chosen) = Select::new("Pick the matching place:", choices).prompt()?;
    config.set_default_location(SavedLocation::from(&chosen));

    let unit = Select::new("Temperature unit:", TemperatureUnit::all().to_vec()).prompt()?;
    config.temperature_unit = Some(unit);

    let unit = Select::new("Wind speed unit:", WindSpeedUnit::all().to_vec()).prompt()?;
    config.windspeed_unit = Some(unit);

    Ok(())
}

fn parse_token<T>(value: &str) -> Result<T, String>
where
    T: for<'a> TryFrom<&'a str, Error = anyhow::Error>,
{
    T::try_from(value).map_err(|e| e.to_string())
}
