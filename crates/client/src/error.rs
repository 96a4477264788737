use sweetshop_core::{ItemId, ShopError};

/// Transport-level failure talking to the inventory service.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum RemoteError {
    #[error("network error: {0}")]
    Unreachable(String),
    #[error("request timed out")]
    TimedOut,
    #[error("API error ({status}): {reason}")]
    Rejected { status: u16, reason: String },
    #[error("parse error: {0}")]
    Parse(String),
    /// The id cannot be placed in a request path.
    #[error("invalid item id: {0:?}")]
    InvalidItemId(String),
}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            RemoteError::TimedOut
        } else if e.is_decode() {
            RemoteError::Parse(e.to_string())
        } else {
            RemoteError::Unreachable(e.to_string())
        }
    }
}

impl From<RemoteError> for ShopError {
    fn from(e: RemoteError) -> Self {
        match e {
            RemoteError::Unreachable(_) => ShopError::Unreachable,
            RemoteError::TimedOut => ShopError::TimedOut,
            RemoteError::Rejected { reason, .. } => ShopError::Rejected { reason },
            RemoteError::Parse(msg) => ShopError::rejected(format!("Unexpected response from the server: {msg}")),
            RemoteError::InvalidItemId(id) => ShopError::NotFound(ItemId::new(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_keeps_only_the_reason_for_users() {
        let err: ShopError = RemoteError::Rejected {
            status: 400,
            reason: "Not enough stock".into(),
        }
        .into();
        assert_eq!(err, ShopError::rejected("Not enough stock"));
    }

    #[test]
    fn transport_failures_map_to_generic_messages() {
        assert_eq!(ShopError::from(RemoteError::Unreachable("refused".into())), ShopError::Unreachable);
        assert_eq!(ShopError::from(RemoteError::TimedOut), ShopError::TimedOut);
    }

    #[test]
    fn unaddressable_id_is_not_found() {
        assert_eq!(
            ShopError::from(RemoteError::InvalidItemId("..".into())),
            ShopError::NotFound(ItemId::new(".."))
        );
    }
}
