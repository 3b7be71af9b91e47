use farmhand_core::config::normalize_base_url;
use farmhand_core::util::normalize_text_option;

use crate::cli::ConfigCommands;
use crate::config_profiles::{CliProfile, CliProfilesConfig, API_URL_ENV, WEATHER_KEY_ENV};
use crate::error::CliError;

pub fn run_config(
    command: ConfigCommands,
    global_profile: Option<&str>,
    json: bool,
) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            api_base_url,
            weather_api_key,
            weather_base_url,
            request_timeout_secs,
            no_activate,
        } => run_config_init(
            global_profile,
            ProfileUpdate {
                api_base_url,
                weather_api_key,
                weather_base_url,
                request_timeout_secs,
            },
            no_activate,
        ),
        ConfigCommands::Show => run_config_show(global_profile, json),
    }
}

/// Values passed to `config init`; `None` keeps what the profile has.
#[derive(Debug, Default)]
pub struct ProfileUpdate {
    pub api_base_url: Option<String>,
    pub weather_api_key: Option<String>,
    pub weather_base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

pub fn run_config_init(
    profile_name: Option<&str>,
    update: ProfileUpdate,
    no_activate: bool,
) -> Result<(), CliError> {
    let mut config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(profile_name);
    let env_api_base_url = normalize_text_option(std::env::var(API_URL_ENV).ok());
    let env_weather_api_key = normalize_text_option(std::env::var(WEATHER_KEY_ENV).ok());

    let profile = config.profile_mut_or_default(&profile_name);
    apply_profile_update(profile, update, env_api_base_url, env_weather_api_key)?;
    if profile.api_base_url.is_none() {
        return Err(CliError::MissingApiUrl(profile_name));
    }

    if !no_activate || config.active_profile.is_none() {
        config.active_profile = Some(profile_name.clone());
    }

    let path = config.save().map_err(CliError::Config)?;
    tracing::info!(profile = %profile_name, "Saved CLI profile");
    println!("Saved profile '{profile_name}' to {}", path.display());
    Ok(())
}

/// Merges `update` into `profile`: explicit flags, then environment, then
/// the stored value.
pub fn apply_profile_update(
    profile: &mut CliProfile,
    update: ProfileUpdate,
    env_api_base_url: Option<String>,
    env_weather_api_key: Option<String>,
) -> Result<(), CliError> {
    let api_base_url = normalize_text_option(update.api_base_url)
        .or(env_api_base_url)
        .or_else(|| profile.api_base_url.take());
    profile.api_base_url = api_base_url
        .map(|url| normalize_base_url(&url, "api_base_url"))
        .transpose()?;

    let weather_base_url =
        normalize_text_option(update.weather_base_url).or_else(|| profile.weather_base_url.take());
    profile.weather_base_url = weather_base_url
        .map(|url| normalize_base_url(&url, "weather_base_url"))
        .transpose()?;

    profile.weather_api_key = normalize_text_option(update.weather_api_key)
        .or(env_weather_api_key)
        .or_else(|| profile.weather_api_key.take());
    if update.request_timeout_secs.is_some() {
        profile.request_timeout_secs = update.request_timeout_secs;
    }
    Ok(())
}

fn run_config_show(profile_name: Option<&str>, json: bool) -> Result<(), CliError> {
    let config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(profile_name);
    let Some(profile) = config.profile(&profile_name) else {
        println!("Profile '{profile_name}' is not configured.");
        return Ok(());
    };

    let resolved = profile.client_config();
    let key_state = if resolved.weather_api_key().is_some() {
        "set"
    } else {
        "not set"
    };
    if json {
        let payload = serde_json::json!({
            "profile": profile_name,
            "active": config.active_profile.as_deref() == Some(profile_name.as_str()),
            "api_base_url": resolved.api_base_url,
            "weather_base_url": resolved.weather_base_url().ok(),
            "weather_api_key": key_state,
            "request_timeout_secs": resolved.request_timeout_secs,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("Profile:          {profile_name}");
    println!(
        "API base URL:     {}",
        resolved.api_base_url.as_deref().unwrap_or("(not set)")
    );
    println!(
        "Weather base URL: {}",
        resolved.weather_base_url().unwrap_or_default()
    );
    println!("Weather API key:  {key_state}");
    match resolved.request_timeout() {
        Some(timeout) => println!("Request timeout:  {}s", timeout.as_secs()),
        None => println!("Request timeout:  none"),
    }
    Ok(())
}
