use crate::domain::{AdminState, Device, OperatingState};
use std::fmt::{Display, Formatter};

#[derive(Debug, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny(DenyReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    Locked,
    Disabled,
}

impl Display for DenyReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DenyReason::Locked => f.write_str("admin locked state"),
            DenyReason::Disabled => f.write_str("disabled op state"),
        }
    }
}

/// Admin lock blocks every dispatch, a disabled operating state only blocks writes.
pub fn authorize(device: &Device, for_write: bool) -> Access {
    if device.admin_state == AdminState::Locked {
        return Access::Deny(DenyReason::Locked);
    }

    if for_write && device.operating_state == OperatingState::Disabled {
        return Access::Deny(DenyReason::Disabled);
    }

    Access::Allow
}
