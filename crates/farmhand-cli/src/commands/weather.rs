use farmhand_core::WeatherClient;

use crate::commands::common::{join_words, CommandContext};
use crate::error::CliError;

pub async fn run_weather(location: &[String], context: &CommandContext) -> Result<(), CliError> {
    let config = context.client_config();
    if config.weather_api_key().is_none() {
        return Err(CliError::MissingWeatherKey(context.profile_name.clone()));
    }
    let client = WeatherClient::new(&config)?;
    let location = join_words(location);

    let entries = client.today_forecast(&location).await?;
    if context.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    if entries.is_empty() {
        println!("No weather data available for today.");
        return Ok(());
    }

    println!("Today's forecast for {location}");
    for entry in &entries {
        let humidity = entry
            .main
            .humidity
            .map(|humidity| format!("  humidity {humidity:.0}%"))
            .unwrap_or_default();
        println!(
            "{}  {:>5.1}°C  {}{humidity}",
            entry.time(),
            entry.main.temp,
            entry.description()
        );
    }
    Ok(())
}
