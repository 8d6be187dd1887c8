use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One weather reading. Wind is in m/s, rain rate in mm.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub temp: Option<f32>,
    #[serde(default)]
    pub rh: Option<f32>,
    #[serde(default)]
    pub pres: Option<f32>,
    #[serde(default)]
    pub wspd: Option<f32>,
    #[serde(default)]
    pub wspdx: Option<f32>,
    #[serde(default)]
    pub wdir: Option<f32>,
    #[serde(default)]
    pub srad: Option<f32>,
    #[serde(default)]
    pub td: Option<f32>,
    #[serde(default)]
    pub wchill: Option<f32>,
    #[serde(default)]
    pub rr: Option<f32>,
}

impl Observation {
    pub fn empty(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            temp: None,
            rh: None,
            pres: None,
            wspd: None,
            wspdx: None,
            wdir: None,
            srad: None,
            td: None,
            wchill: None,
            rr: None,
        }
    }
}

/// Device status reported alongside an [`Observation`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceHealth {
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub vb1: Option<f32>,
    #[serde(default)]
    pub vb2: Option<f32>,
    #[serde(default)]
    pub curr: Option<f32>,
    #[serde(default)]
    pub bp1: Option<f32>,
    #[serde(default)]
    pub bp2: Option<f32>,
    #[serde(default)]
    pub cm: Option<String>,
    #[serde(default)]
    pub ss: Option<i32>,
    #[serde(default)]
    pub temp_arq: Option<f32>,
    #[serde(default)]
    pub rh_arq: Option<f32>,
    #[serde(default)]
    pub fpm: Option<String>,
    /// Raw telegram as received.
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub error_msg: String,
    #[serde(default)]
    pub minutes_difference: i64,
    #[serde(default)]
    pub data_count: u8,
    #[serde(default)]
    pub data_status: String,
}

impl DeviceHealth {
    pub fn empty(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            vb1: None,
            vb2: None,
            curr: None,
            bp1: None,
            bp2: None,
            cm: None,
            ss: None,
            temp_arq: None,
            rh_arq: None,
            fpm: None,
            message: String::new(),
            error_msg: String::new(),
            minutes_difference: 0,
            data_count: 0,
            data_status: String::new(),
        }
    }
}
