use serde::{Deserialize, Serialize};

use super::weather::{DeviceHealth, Observation};

/// Webhook body posted by the SMS gateway.
#[derive(Debug, Deserialize, Serialize)]
pub struct SmsRequest {
    /// Sender phone number, used to resolve the station.
    pub from: String,
    pub message: String,
}

/// Body accepted by the simulator endpoint.
#[derive(Debug, Deserialize, Serialize)]
pub struct SimulateRequest {
    pub variant: u8,
    pub observation: Observation,
    pub health: DeviceHealth,
}
