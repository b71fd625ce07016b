use serde::{Deserialize, Serialize};

use crate::domain::envelope::DEFAULT_MIN_SENTINEL;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub input: InputSettings,
    pub downsampling: DownsamplingSettings,
    pub chart: ChartSettings,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
    pub max_upload_bytes: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
            max_upload_bytes: 16 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct InputSettings {
    pub delimiter: String,
    pub drop_header: bool,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            delimiter: ";".to_string(),
            drop_header: true,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DownsamplingSettings {
    /// Row count above which the envelope is computed
    pub threshold: usize,
    pub target_points: usize,
    pub min_sentinel: i64,
}

impl Default for DownsamplingSettings {
    fn default() -> Self {
        Self {
            threshold: 5 * 120,
            target_points: 75,
            min_sentinel: DEFAULT_MIN_SENTINEL,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ChartSettings {
    pub max_series: SeriesStyle,
    pub min_series: SeriesStyle,
    pub time_format: String,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            max_series: SeriesStyle {
                id: "bpm".to_string(),
                name: "BPM".to_string(),
                color: Some("hsl(75, 100%, 50%)".to_string()),
            },
            min_series: SeriesStyle {
                id: "bpm_min".to_string(),
                name: "BPM (min)".to_string(),
                color: Some("hsl(200, 100%, 50%)".to_string()),
            },
            time_format: "dd.LL.yyyy HH:mm:ss".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SeriesStyle {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
}

/// Built-in defaults, then `config/bpm.*` if present, then `BPM__*` env vars.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    load_app_config_from("config/bpm")
}

pub fn load_app_config_from(path: &str) -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::Config::try_from(&AppConfig::default())?)
        .add_source(config::File::with_name(path).required(false))
        .add_source(config::Environment::with_prefix("BPM").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
