//! Inbound payment notification (IPN) parsing.

use std::collections::BTreeMap;

use crate::domain::foundation::RemoteTxId;

use super::errors::GatewayError;

/// Raw, untrusted callback parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IpnRequest {
    params: BTreeMap<String, String>,
}

impl IpnRequest {
    pub fn new(params: BTreeMap<String, String>) -> Self {
        Self { params }
    }

    /// Parses a raw query string; the last occurrence of a key wins.
    pub fn from_query(query: &str) -> Self {
        let params = url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        Self { params }
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

impl FromIterator<(String, String)> for IpnRequest {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            params: iter.into_iter().collect(),
        }
    }
}

/// Payment status reported by the processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IpnStatus {
    Cancelled,
    Complete,
    /// Anything else is acknowledged and ignored.
    Other(String),
}

impl IpnStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "cancelled" => IpnStatus::Cancelled,
            "complete" => IpnStatus::Complete,
            other => IpnStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            IpnStatus::Cancelled => "cancelled",
            IpnStatus::Complete => "complete",
            IpnStatus::Other(s) => s,
        }
    }
}

/// Callback with all required fields present.
///
/// The secret has not been checked yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpnNotification {
    pub offered_secret: String,
    pub status: IpnStatus,
    pub tx: RemoteTxId,
}

impl IpnNotification {
    /// Checks field presence.
    ///
    /// # Errors
    ///
    /// - `EmptyCallback` when no parameters were sent
    /// - `MissingParameter` when `ipn_secret`, `status` or `tx` is absent
    ///   (a blank `tx` counts as absent)
    pub fn parse(request: &IpnRequest) -> Result<Self, GatewayError> {
        if request.is_empty() {
            return Err(GatewayError::EmptyCallback);
        }

        let offered_secret = request
            .get("ipn_secret")
            .ok_or(GatewayError::MissingParameter("ipn_secret"))?;
        let status = request
            .get("status")
            .ok_or(GatewayError::MissingParameter("status"))?;
        let tx = request
            .get("tx")
            .ok_or(GatewayError::MissingParameter("tx"))
            .and_then(|tx| {
                RemoteTxId::new(tx).map_err(|_| GatewayError::MissingParameter("tx"))
            })?;

        Ok(Self {
            offered_secret: offered_secret.to_string(),
            status: IpnStatus::parse(status),
            tx,
        })
    }
}
