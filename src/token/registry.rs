//! Login options offered to the account UI.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};
use utoipa::ToSchema;

use super::state::ServiceListener;

#[derive(ToSchema, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct LoginService {
    pub id: String,
    pub label: String,
}

/// Registry keyed by service id; registering an existing id overwrites it.
#[derive(Debug, Default)]
pub struct LoginServiceRegistry {
    services: RwLock<BTreeMap<String, String>>,
}

impl LoginServiceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_service(&self, id: &str, label: &str) {
        self.services
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.to_string(), label.to_string());
    }

    pub fn deregister_service(&self, id: &str) {
        self.services
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);
    }

    #[must_use]
    pub fn services(&self) -> Vec<LoginService> {
        self.services
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(id, label)| LoginService {
                id: id.clone(),
                label: label.clone(),
            })
            .collect()
    }
}

impl ServiceListener for LoginServiceRegistry {
    fn registered(&self, id: &str, label: &str) {
        self.register_service(id, label);
    }

    fn deregistered(&self, id: &str) {
        self.deregister_service(id);
    }
}
