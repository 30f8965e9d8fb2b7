use connectors::memory::MemoryCatalog;
use engine_core::{service::QueryService, settings::ProvisionSettings};
use model::{core::identifiers::ContainerRef, filter::Filter};
use std::sync::Arc;

pub const DATABASE_LINK: &str = "dbs/b5NCAA==/";
pub const USERS_LINK: &str = "dbs/b5NCAA==/colls/b5NCAIu9NwA=/";
pub const ORDERS_LINK: &str = "dbs/b5NCAA==/colls/b5NCAJu7NwB=/";

/// Prefix of every compiled query with a predicate.
pub const BQ: &str = "SELECT * FROM root r WHERE ";

pub fn users() -> ContainerRef {
    ContainerRef::collection(USERS_LINK)
}

pub fn orders() -> ContainerRef {
    ContainerRef::collection(ORDERS_LINK)
}

pub fn database() -> ContainerRef {
    ContainerRef::database(DATABASE_LINK)
}

pub fn filter(json: serde_json::Value) -> Filter {
    Filter::try_from(json).expect("valid filter root")
}

/// In-memory catalog with the users and orders collections.
pub fn catalog() -> Arc<MemoryCatalog> {
    Arc::new(MemoryCatalog::with_collections([USERS_LINK, ORDERS_LINK]))
}

pub fn service(catalog: &Arc<MemoryCatalog>) -> QueryService<MemoryCatalog> {
    QueryService::with_catalog(Arc::clone(catalog), ProvisionSettings::default())
}

/// Compiles without provisioning and returns the query text.
pub fn compile_text(json: serde_json::Value) -> String {
    planner::compile(&filter(json))
        .expect("filter compiles")
        .text()
        .to_string()
}
