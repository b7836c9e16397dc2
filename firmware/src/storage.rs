use anyhow::Result;
use esp_idf_svc::nvs::{EspNvs, EspNvsPartition, NvsPartitionId};

pub struct Storage<T: NvsPartitionId> {
    nvs: EspNvs<T>,
}

const SETTINGS_NAMESPACE: &str = "steering";

impl<T: NvsPartitionId> Storage<T> {
    pub fn new(nvs_partition: EspNvsPartition<T>) -> Result<Self> {
        let nvs = EspNvs::new(nvs_partition, SETTINGS_NAMESPACE, true)?;
        Ok(Self { nvs })
    }

    pub fn get_str<const N: usize>(&self, key: &str) -> Result<Option<String>> {
        let mut buf = [0u8; N];
        let result = self.nvs.get_str(key, &mut buf)?;

        Ok(result.map(|s| s.to_string()))
    }
}
