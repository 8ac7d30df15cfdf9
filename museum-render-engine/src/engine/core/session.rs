use bevy::prelude::*;

/// Wallet session as reported by the host page's wallet provider.
/// Only the address is used, to request ownership-aware catalog data.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletSession {
    pub logged_in: bool,
    pub addr: Option<String>,
}

impl WalletSession {
    /// Address to scope catalog requests to. `logged_in` is informational;
    /// a non-empty address is all that is needed.
    pub fn wallet(&self) -> Option<&str> {
        self.addr.as_deref().filter(|addr| !addr.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wallet_reads_only_the_address() {
        let mut session = WalletSession::default();
        assert_eq!(session.wallet(), None);

        session.addr = Some("0x01".into());
        assert_eq!(session.wallet(), Some("0x01"));

        session.logged_in = true;
        assert_eq!(session.wallet(), Some("0x01"));

        session.addr = Some(String::new());
        assert_eq!(session.wallet(), None);
    }
}
