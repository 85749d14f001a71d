use std::sync::Arc;

use super::closer::Closer;
use crate::{
    config::Config,
    observers::{Observe, ObserverSet},
};

/// Builder for constructing a [`Closer`] with optional observers.
pub struct CloserBuilder {
    cfg: Config,
    observers: Vec<Arc<dyn Observe>>,
}

impl CloserBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            observers: Vec::new(),
        }
    }

    /// Sets observers for instrumentation.
    ///
    /// Observers see every registration transition and run synchronously around
    /// each action of the chain.
    pub fn with_observers(mut self, observers: Vec<Arc<dyn Observe>>) -> Self {
        self.observers = observers;
        self
    }

    /// Adds the built-in `tracing` writer.
    #[cfg(feature = "logging")]
    pub fn with_log_writer(mut self) -> Self {
        self.observers.push(Arc::new(crate::observers::LogWriter::new()));
        self
    }

    /// Builds the closer.
    pub fn build(self) -> Closer {
        Closer::from_parts(self.cfg, ObserverSet::new(self.observers))
    }
}
