use esp_idf_svc::nvs::NvsPartitionId;
use log::*;
use steering_core::config::ServerConfig;

use crate::storage::Storage;

/// NVS key holding an optional JSON override of [`ServerConfig`].
const CONFIG_KEY: &str = "config";

/// Load the server configuration from NVS.
/// Falls back to the defaults if nothing is stored or the stored value is unusable.
pub fn load_server_config<T: NvsPartitionId>(storage: &Storage<T>) -> ServerConfig {
    match storage.get_str::<256>(CONFIG_KEY) {
        Ok(Some(json)) => match ServerConfig::from_json(&json) {
            Ok(config) => {
                info!("Loaded config from NVS: {:?}", config);
                config
            }
            Err(e) => {
                warn!("Stored config is invalid, using defaults: {}", e);
                ServerConfig::default()
            }
        },
        Ok(None) => ServerConfig::default(),
        Err(e) => {
            warn!("Could not read config from NVS, using defaults: {:?}", e);
            ServerConfig::default()
        }
    }
}
