use crate::config::EnvConfig;
use liblimno::{Record, SampleStore};
use std::sync::Arc;
use tracing::{debug, trace};

pub struct SharedState<R> {
    pub store: SampleStore<R>,
    pub config: EnvConfig,
}

impl<R: Record> SharedState<R> {
    pub fn new(config: EnvConfig) -> Self {
        trace!("Creating shared app state");
        let schema = R::SCHEMA;
        debug!(%schema, "Seeding sample store");
        Self {
            store: SampleStore::new(),
            config,
        }
    }

    #[cfg(test)]
    pub fn test() -> Self {
        debug!("Creating test shared app state");
        Self::new(EnvConfig {
            listen: crate::config::ListenConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            schema: R::SCHEMA,
            static_dir: ".".into(),
        })
    }
}

pub type AppState<R> = Arc<SharedState<R>>;
