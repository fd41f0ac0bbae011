use super::{LeagueStore, StoreError};
use crate::credentials::AuthGate;
use crate::league::LeagueData;

/// Store wrapper that lets anyone read but only authorized callers write.
pub struct AuthorizedStore<S, G> {
    store: S,
    gate: G,
}

impl<S: LeagueStore, G: AuthGate> AuthorizedStore<S, G> {
    pub fn new(store: S, gate: G) -> Self {
        Self { store, gate }
    }

    pub fn is_authorized(&self) -> bool {
        self.gate.is_authorized()
    }
}

impl<S: LeagueStore, G: AuthGate> LeagueStore for AuthorizedStore<S, G> {
    fn read(&self) -> Result<LeagueData, StoreError> {
        self.store.read()
    }

    fn write(&self, data: &LeagueData) -> Result<(), StoreError> {
        if !self.gate.is_authorized() {
            return Err(StoreError::Unauthorized);
        }
        self.store.write(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    struct Fixed(bool);

    impl AuthGate for Fixed {
        fn is_authorized(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_write_rejected_without_session() {
        let store = AuthorizedStore::new(MemoryStore::new(), Fixed(false));
        let mut data = LeagueData::default();
        data.config.league_name = "Mine".to_string();

        assert!(matches!(store.write(&data), Err(StoreError::Unauthorized)));
        assert_eq!(store.read().unwrap(), LeagueData::default());
    }

    #[test]
    fn test_write_allowed_with_session() {
        let store = AuthorizedStore::new(MemoryStore::new(), Fixed(true));
        let mut data = LeagueData::default();
        data.config.league_name = "Mine".to_string();

        store.write(&data).unwrap();
        assert_eq!(store.read().unwrap().config.league_name, "Mine");
    }
}
