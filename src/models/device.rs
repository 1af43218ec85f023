use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::DeviceError;

/// On/off state of a device in the realtime store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum SwitchState {
    On,
    Off,
}

impl SwitchState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwitchState::On => "ON",
            SwitchState::Off => "OFF",
        }
    }
}

impl FromStr for SwitchState {
    type Err = DeviceError;

    fn from_str(input: &str) -> Result<SwitchState, Self::Err> {
        match input {
            "ON" => Ok(SwitchState::On),
            "OFF" => Ok(SwitchState::Off),
            _ => Err(DeviceError::InvalidState),
        }
    }
}

impl fmt::Display for SwitchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
