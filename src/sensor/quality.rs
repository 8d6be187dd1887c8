//! Completeness scoring for decoded observations.

use crate::models::weather::Observation;

/// Number of tracked observation fields.
pub const TRACKED_FIELDS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quality {
    pub data_count: u8,
    pub data_status: String,
}

/// Scores temp, rh, pres, wspd, wspdx, wdir, srad, td, wchill, rr in that order.
pub fn assess(obs: &Observation) -> Quality {
    let fields: [Option<f32>; TRACKED_FIELDS] = [
        obs.temp, obs.rh, obs.pres, obs.wspd, obs.wspdx, obs.wdir, obs.srad, obs.td, obs.wchill,
        obs.rr,
    ];

    let data_status: String = fields
        .iter()
        .map(|f| if f.is_some() { '1' } else { '0' })
        .collect();
    let data_count = fields.iter().filter(|f| f.is_some()).count() as u8;

    Quality {
        data_count,
        data_status,
    }
}
