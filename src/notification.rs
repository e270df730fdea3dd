//! Message contract between the caller and the traversal controller.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ControllerError, GatewayError};
use crate::file_info::IndexedName;
use crate::transport::ConnectionParams;

pub const FTP_IMG_CALL_LIST: &str = "FTP_IMG_CALL_LIST";
pub const FTP_IMG_CALL_BASE64: &str = "FTP_IMG_CALL_BASE64";
pub const FTP_IMG_CALL_NEXT_DIR: &str = "FTP_IMG_CALL_NEXT_DIR";

/// Busta di una riga JSON in ingresso
#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub notification: String,
    #[serde(default)]
    pub payload: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRequest {
    #[serde(flatten)]
    pub connection: ConnectionParams,
    #[serde(default)]
    pub default_dir_path: Option<String>,
    #[serde(default)]
    pub finish_all_img_in_current_directory: Option<bool>,
    #[serde(default, alias = "authorizedDirectoryNames")]
    pub dir_paths_authorized: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveRequest {
    #[serde(flatten)]
    pub connection: ConnectionParams,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub default_dir_path: Option<String>,
    #[serde(default)]
    pub finish_all_img_in_current_directory: Option<bool>,
}

impl ListRequest {
    /// Missing or `null` reads as false.
    pub fn finish(&self) -> bool {
        self.finish_all_img_in_current_directory.unwrap_or(false)
    }

    pub fn authorized_directories(&self) -> Result<&[String], ControllerError> {
        self.dir_paths_authorized
            .as_deref()
            .ok_or(ControllerError::MissingAuthorization)
    }
}

impl RetrieveRequest {
    pub fn finish(&self) -> bool {
        self.finish_all_img_in_current_directory.unwrap_or(false)
    }

    pub fn file_name(&self) -> Result<&str, ControllerError> {
        self.file_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or(ControllerError::MissingField("fileName"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    List(ListRequest),
    Retrieve(RetrieveRequest),
    NextDir,
}

impl Inbound {
    /// Parses one envelope. Unknown notification names are rejected.
    pub fn from_envelope(envelope: Envelope) -> Result<Self, GatewayError> {
        match envelope.notification.as_str() {
            FTP_IMG_CALL_LIST => Ok(Self::List(serde_json::from_value(envelope.payload)?)),
            FTP_IMG_CALL_BASE64 => Ok(Self::Retrieve(serde_json::from_value(envelope.payload)?)),
            FTP_IMG_CALL_NEXT_DIR => Ok(Self::NextDir),
            _ => Err(GatewayError::UnknownNotification(envelope.notification)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::List(_) => FTP_IMG_CALL_LIST,
            Self::Retrieve(_) => FTP_IMG_CALL_BASE64,
            Self::NextDir => FTP_IMG_CALL_NEXT_DIR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedImage {
    pub data: String,
    pub mime_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "notification", content = "payload")]
pub enum Outbound {
    #[serde(rename = "FTP_IMG_LIST_NAME")]
    ListName(Vec<IndexedName>),
    #[serde(rename = "FTP_IMG_BASE64")]
    Base64(EncodedImage),
    #[serde(rename = "RESET")]
    Reset,
}
