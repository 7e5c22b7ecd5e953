use crate::client::ClientResult;
use crate::error::ClientError;
use crate::model::{DeviceType, RegisteredDevice};

/// Phone device ids are reported with a fixed prefix that streaming calls reject
const PHONE_ID_PREFIX_LEN: usize = 2;

/// Account credentials remembered for re-authentication
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Folds a login result so that an existing session counts as success.
pub fn accept_existing_session(result: ClientResult<bool>) -> ClientResult<bool> {
    match result {
        Err(ClientError::AlreadyLoggedIn) => {
            tracing::debug!("Client already logged in");
            Ok(true)
        }
        other => other,
    }
}

/// Picks the device id used for streaming.
///
/// A phone wins over an iOS device. Phone ids lose their 2-character prefix,
/// iOS ids are used as-is. Returns `None` when neither kind is registered.
pub fn resolve_device_id(devices: &[RegisteredDevice]) -> Option<String> {
    if let Some(phone) = devices.iter().find(|d| d.device_type == DeviceType::Phone) {
        let id: String = phone.id.chars().skip(PHONE_ID_PREFIX_LEN).collect();
        tracing::debug!(device_id = %id, "Using phone device");
        return Some(id);
    }

    if let Some(ios) = devices.iter().find(|d| d.device_type == DeviceType::Ios) {
        tracing::debug!(device_id = %ios.id, "Using iOS device");
        return Some(ios.id.clone());
    }

    tracing::debug!(available_devices = devices.len(), "No phone or iOS device registered");
    None
}
