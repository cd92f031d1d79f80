use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_SERVICE_URL: &str = "https://services2.arcgis.com/zr3KAIbsRSUyARHG/ArcGIS/rest/services/CA_Tsunami_Hazard_Area/FeatureServer";

fn default_output() -> PathBuf {
    PathBuf::from("tsunami_zones.geojson")
}
fn default_verbose() -> bool {
    false
}

#[derive(Debug, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub input: Option<PathBuf>,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
    #[serde(default)]
    pub popups: bool,
    #[serde(default)]
    pub service: Option<ServiceConfig>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            input: None,
            output: default_output(),
            verbose: default_verbose(),
            popups: false,
            service: None,
        }
    }
}

fn default_service_url() -> String {
    DEFAULT_SERVICE_URL.to_string()
}

fn default_layer() -> u32 {
    0
}

/// Southern California coastal counties
fn default_counties() -> Vec<String> {
    [
        "Santa Barbara",
        "Ventura",
        "Los Angeles",
        "Orange",
        "San Diego",
        "San Luis Obispo",
        "Imperial",
    ]
    .iter()
    .map(|c| c.to_string())
    .collect()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_secs() -> u64 {
    10
}

/// Where and how to query the tsunami hazard layer
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    #[serde(default = "default_service_url")]
    pub url: String,
    #[serde(default = "default_layer")]
    pub layer: u32,
    #[serde(default = "default_counties")]
    pub counties: Vec<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            url: default_service_url(),
            layer: default_layer(),
            counties: default_counties(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_delay_secs: default_retry_delay_secs(),
        }
    }
}

impl FileConfig {
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("tsunamizones.toml"));
    paths.push(PathBuf::from(".tsunamizones.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("tsunamizones").join("config.toml"));
        paths.push(config_dir.join("tsunamizones.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".tsunamizones.toml"));
    }

    paths
}
