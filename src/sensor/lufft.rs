//! Lufft weather-station telegram codec.
//!
//! A telegram is a `+`-delimited string relayed inside an SMS body:
//!
//! ```text
//! 0+31.5+78.2+1008.3+10.8+15.1+0+182+523.0+22.1+30.5+1.5+13.1+...+230615/143000+0
//! ```
//!
//! The first token is a sequence marker and carries no data. The number of
//! remaining tokens selects one of four layouts ([`LufftVariant`]); each
//! layout is a fixed table of token slots walked identically by [`decode`] and
//! [`encode`].

use chrono::{DateTime, Utc};
use tracing::debug;

use super::quality;
use super::timestamp::{check_plausibility, format_dashed, format_slashed, parse_timestamp};
use super::value::{
    parse_float, parse_float_scaled, parse_int, parse_text, round2, RAIN_FACTOR, WIND_FACTOR,
};
use super::{DecodeError, EncodeError};
use crate::models::weather::{DeviceHealth, Observation};

const SEQUENCE_MARKER: &str = "0";
const PLACEHOLDER: &str = "0";
const VB1_SUFFIX: char = '#';

/// Substrings the decoder treats as token boundaries or gateway artifacts.
const RESERVED: [&str; 3] = ["+", ">", "%20"];

/// Telegram layout, identified by token count after the leading marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LufftVariant {
    /// Reduced health block.
    V19,
    /// Reduced health block with a filler token after the wind gust.
    V20,
    /// Full health block.
    V23,
    /// Full health block with a filler token after the wind gust.
    V24,
}

impl LufftVariant {
    pub const ALL: [LufftVariant; 4] = [Self::V19, Self::V20, Self::V23, Self::V24];

    pub fn from_token_count(n: usize) -> Option<Self> {
        match n {
            19 => Some(Self::V19),
            20 => Some(Self::V20),
            23 => Some(Self::V23),
            24 => Some(Self::V24),
            _ => None,
        }
    }

    pub fn token_count(self) -> usize {
        self.layout().len()
    }

    fn layout(self) -> &'static [Slot] {
        match self {
            Self::V19 => &LAYOUT_19,
            Self::V20 => &LAYOUT_20,
            Self::V23 => &LAYOUT_23,
            Self::V24 => &LAYOUT_24,
        }
    }

    /// Strips the wire decoration from the Vb1 token.
    fn strip_vb1(self, token: &str) -> &str {
        match self {
            Self::V19 => token.strip_suffix(VB1_SUFFIX).unwrap_or(token),
            Self::V20 => {
                let mut chars = token.chars();
                chars.next_back();
                chars.as_str()
            }
            Self::V23 | Self::V24 => token,
        }
    }

    fn decorate_vb1(self, value: String) -> String {
        match self {
            Self::V19 | Self::V20 => format!("{value}{VB1_SUFFIX}"),
            Self::V23 | Self::V24 => value,
        }
    }

    fn format_timestamp(self, ts: DateTime<Utc>) -> String {
        match self {
            Self::V19 | Self::V20 => format_dashed(ts),
            Self::V23 | Self::V24 => format_slashed(ts),
        }
    }
}

impl std::fmt::Display for LufftVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token_count())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ObsField {
    Temp,
    Rh,
    Pres,
    Wspd,
    Wspdx,
    Wdir,
    Srad,
    Td,
    Wchill,
    Rr,
}

impl ObsField {
    fn slot(self, obs: &mut Observation) -> &mut Option<f32> {
        match self {
            Self::Temp => &mut obs.temp,
            Self::Rh => &mut obs.rh,
            Self::Pres => &mut obs.pres,
            Self::Wspd => &mut obs.wspd,
            Self::Wspdx => &mut obs.wspdx,
            Self::Wdir => &mut obs.wdir,
            Self::Srad => &mut obs.srad,
            Self::Td => &mut obs.td,
            Self::Wchill => &mut obs.wchill,
            Self::Rr => &mut obs.rr,
        }
    }

    fn get(self, obs: &Observation) -> Option<f32> {
        match self {
            Self::Temp => obs.temp,
            Self::Rh => obs.rh,
            Self::Pres => obs.pres,
            Self::Wspd => obs.wspd,
            Self::Wspdx => obs.wspdx,
            Self::Wdir => obs.wdir,
            Self::Srad => obs.srad,
            Self::Td => obs.td,
            Self::Wchill => obs.wchill,
            Self::Rr => obs.rr,
        }
    }

    fn decode(self, token: &str) -> Option<f32> {
        match self {
            // Real pressure readings may coincide with the sentinel.
            Self::Pres => parse_float(token, true),
            Self::Wspd | Self::Wspdx => parse_float_scaled(token, false, WIND_FACTOR),
            Self::Rr => parse_float_scaled(token, false, RAIN_FACTOR),
            _ => parse_float(token, false),
        }
    }

    fn encode(self, value: f32) -> String {
        let wire = match self {
            Self::Wspd | Self::Wspdx => value * 3.6,
            Self::Rr => value / RAIN_FACTOR,
            _ => value,
        };
        round2(wire).to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HealthField {
    Vb1,
    Vb2,
    Curr,
    Bp1,
    Bp2,
    Cm,
    Ss,
    TempArq,
    RhArq,
    Fpm,
}

impl HealthField {
    fn decode(self, variant: LufftVariant, token: &str, health: &mut DeviceHealth) {
        match self {
            Self::Vb1 => health.vb1 = parse_float(variant.strip_vb1(token), false),
            Self::Vb2 => health.vb2 = parse_float(token, false),
            Self::Curr => health.curr = parse_float(token, false),
            Self::Bp1 => health.bp1 = parse_float(token, false),
            Self::Bp2 => health.bp2 = parse_float(token, false),
            Self::Cm => health.cm = parse_text(token),
            Self::Ss => health.ss = parse_int(token),
            Self::TempArq => health.temp_arq = parse_float(token, false),
            Self::RhArq => health.rh_arq = parse_float(token, false),
            Self::Fpm => health.fpm = parse_text(token),
        }
    }

    fn encode(
        self,
        variant: LufftVariant,
        health: &DeviceHealth,
    ) -> Result<String, EncodeError> {
        let float = |v: Option<f32>| v.map(|v| round2(v).to_string()).unwrap_or_default();
        let token = match self {
            Self::Vb1 => variant.decorate_vb1(float(health.vb1)),
            Self::Vb2 => float(health.vb2),
            Self::Curr => float(health.curr),
            Self::Bp1 => float(health.bp1),
            Self::Bp2 => float(health.bp2),
            Self::Cm => text("cm", health.cm.as_deref())?,
            Self::Ss => health.ss.map(|v| v.to_string()).unwrap_or_default(),
            Self::TempArq => float(health.temp_arq),
            Self::RhArq => float(health.rh_arq),
            Self::Fpm => text("fpm", health.fpm.as_deref())?,
        };
        Ok(token)
    }
}

fn text(field: &'static str, value: Option<&str>) -> Result<String, EncodeError> {
    let value = value.unwrap_or_default();
    if RESERVED.iter().any(|r| value.contains(*r)) {
        return Err(EncodeError::DelimiterInText {
            field,
            value: value.to_string(),
        });
    }
    Ok(value.to_string())
}

/// One token position in a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Obs(ObsField),
    Health(HealthField),
    /// Extra token in V20/V24 with no mapped meaning.
    Filler,
    /// Token between the health block and the timestamp.
    Unused,
    Timestamp,
    /// Trailing sequence marker.
    Trailer,
}

use HealthField::{Bp1, Bp2, Cm, Curr, Fpm, RhArq, Ss, TempArq, Vb1, Vb2};
use ObsField::{Pres, Rh, Rr, Srad, Td, Temp, Wchill, Wdir, Wspd, Wspdx};
use Slot::{Filler, Health as H, Obs as O, Timestamp, Trailer, Unused};

#[rustfmt::skip]
const LAYOUT_19: [Slot; 19] = [
    O(Temp), O(Rh), O(Pres), O(Wspd), O(Wspdx), O(Wdir), O(Srad), O(Td), O(Wchill), O(Rr),
    H(TempArq), H(RhArq), H(Ss), H(Vb1), H(Bp1), H(Fpm),
    Unused, Timestamp, Trailer,
];

#[rustfmt::skip]
const LAYOUT_20: [Slot; 20] = [
    O(Temp), O(Rh), O(Pres), O(Wspd), O(Wspdx), Filler, O(Wdir), O(Srad), O(Td), O(Wchill), O(Rr),
    H(Ss), H(Vb1), H(Bp1), H(TempArq), H(RhArq), H(Fpm),
    Unused, Timestamp, Trailer,
];

#[rustfmt::skip]
const LAYOUT_23: [Slot; 23] = [
    O(Temp), O(Rh), O(Pres), O(Wspd), O(Wspdx), O(Wdir), O(Srad), O(Td), O(Wchill), O(Rr),
    H(Vb1), H(Vb2), H(Curr), H(Bp1), H(Bp2), H(Cm), H(Ss), H(TempArq), H(RhArq), H(Fpm),
    Unused, Timestamp, Trailer,
];

#[rustfmt::skip]
const LAYOUT_24: [Slot; 24] = [
    O(Temp), O(Rh), O(Pres), O(Wspd), O(Wspdx), Filler, O(Wdir), O(Srad), O(Td), O(Wchill), O(Rr),
    H(Vb1), H(Vb2), H(Curr), H(Bp1), H(Bp2), H(Cm), H(Ss), H(TempArq), H(RhArq), H(Fpm),
    Unused, Timestamp, Trailer,
];

/// Removes gateway artifacts and splits into tokens, dropping the leading marker.
fn tokenize(raw: &str) -> Vec<String> {
    let cleaned = raw.replace('>', "").replace("%20", "+");
    cleaned
        .trim()
        .split('+')
        .skip(1)
        .map(str::to_string)
        .collect()
}

/// Decodes a telegram received at `now`.
///
/// Individual malformed fields decode as absent. The only failure is a token
/// count that matches no known layout.
pub fn decode(raw: &str, now: DateTime<Utc>) -> Result<(Observation, DeviceHealth), DecodeError> {
    let tokens = tokenize(raw);
    let variant = LufftVariant::from_token_count(tokens.len())
        .ok_or(DecodeError::InvalidString { tokens: tokens.len() })?;
    debug!(%variant, "Decoding Lufft telegram");

    let mut obs = Observation::empty(now);
    let mut health = DeviceHealth::empty(now);
    let mut ts_token: &str = "";

    for (slot, token) in variant.layout().iter().zip(&tokens) {
        match *slot {
            Slot::Obs(field) => *field.slot(&mut obs) = field.decode(token),
            Slot::Health(field) => field.decode(variant, token, &mut health),
            Slot::Timestamp => ts_token = token.as_str(),
            Slot::Filler | Slot::Unused | Slot::Trailer => {}
        }
    }

    let plausibility = check_plausibility(parse_timestamp(ts_token), ts_token, now);
    obs.timestamp = plausibility.timestamp;
    health.timestamp = plausibility.timestamp;
    health.minutes_difference = plausibility.minutes_difference;
    health.error_msg = plausibility.error_msg;

    let q = quality::assess(&obs);
    health.data_count = q.data_count;
    health.data_status = q.data_status;
    health.message = raw.to_string();

    Ok((obs, health))
}

/// Renders a record pair as a `variant` telegram. The timestamp is taken from
/// the observation.
///
/// Values are written at 2-decimal precision on the wire scale, so only
/// records [`decode`] can produce come back unchanged; an arbitrary rain rate
/// may drift by 0.01 after rescaling.
///
/// Fails when a text field contains `+`, `>` or `%20`.
pub fn encode(
    obs: &Observation,
    health: &DeviceHealth,
    variant: LufftVariant,
) -> Result<String, EncodeError> {
    let mut tokens = Vec::with_capacity(variant.token_count() + 1);
    tokens.push(SEQUENCE_MARKER.to_string());

    for slot in variant.layout() {
        let token = match *slot {
            Slot::Obs(field) => field.get(obs).map(|v| field.encode(v)).unwrap_or_default(),
            Slot::Health(field) => field.encode(variant, health)?,
            Slot::Filler | Slot::Unused => PLACEHOLDER.to_string(),
            Slot::Timestamp => variant.format_timestamp(obs.timestamp),
            Slot::Trailer => SEQUENCE_MARKER.to_string(),
        };
        tokens.push(token);
    }

    Ok(tokens.join("+"))
}
