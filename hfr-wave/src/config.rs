//! Store constants and pipeline defaults.
//!
//! The quality flag, wave mode and fallback site come straight from the
//! wave database conventions; their wider meaning is not documented there,
//! so they stay as named values that deployments can override.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Value of `hfrWaveData.mwht_flag` for rows that passed quality control.
pub const QUALITY_FLAG: i64 = 1;

/// Value of `hfrWaveFilesMetadata.TableWaveMode` for the wave table used.
pub const WAVE_MODE: i64 = 2;

/// Site shown when the user has not picked one.
pub const FALLBACK_SITE_ID: i64 = 28;

/// Length of the default trailing query window.
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

/// Auto-refresh period for the dashboard.
pub const REFRESH_INTERVAL_SECS: u64 = 60;

/// First day the date picker allows.
pub fn earliest_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2017, 6, 1).unwrap_or(NaiveDate::MIN)
}

/// Last day a query bound may name.
pub fn latest_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(9999, 12, 31).unwrap_or(NaiveDate::MAX)
}

/// Pipeline settings shared by the data access layer and the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveConfig {
    pub quality_flag: i64,
    pub wave_mode: i64,
    pub fallback_site_id: i64,
    pub window_days: i64,
    pub refresh_interval_secs: u64,
    pub earliest_date: NaiveDate,
}

impl Default for WaveConfig {
    fn default() -> Self {
        WaveConfig {
            quality_flag: QUALITY_FLAG,
            wave_mode: WAVE_MODE,
            fallback_site_id: FALLBACK_SITE_ID,
            window_days: DEFAULT_WINDOW_DAYS,
            refresh_interval_secs: REFRESH_INTERVAL_SECS,
            earliest_date: earliest_date(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WaveConfig::default();
        assert_eq!(config.quality_flag, 1);
        assert_eq!(config.wave_mode, 2);
        assert_eq!(config.fallback_site_id, 28);
        assert_eq!(config.window_days, 7);
        assert_eq!(config.refresh_interval_secs, 60);
        assert_eq!(config.earliest_date.to_string(), "2017-06-01");
    }

    #[test]
    fn test_config_roundtrip() {
        let config = WaveConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: WaveConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }
}
