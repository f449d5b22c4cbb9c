use std::{mem, sync::Arc};

use anyhow::Context;
use parking_lot::Mutex;
use tracing::Subscriber;
use tracing_error::ErrorLayer;
use tracing_subscriber::{filter::Targets, prelude::*, registry::LookupSpan, reload, Layer};

use crate::{
    config::TracingConfig,
    error::{GenericErrorCode, MapToErr, Result},
};

/// Handle over the fleet log filter, used to change it at runtime.
///
/// Clones share the same filter.
#[derive(Clone)]
pub struct TracingContext {
    configured: Arc<str>,
    active: Arc<Mutex<String>>,
    apply: Arc<dyn Fn(Targets) -> Result<()> + Send + Sync>,
}

impl TracingContext {
    /// The filter from [TracingConfig]
    pub fn configured_filter(&self) -> &str {
        &self.configured
    }

    /// The filter currently applied
    pub fn active_filter(&self) -> String {
        self.active.lock().clone()
    }

    /// Applies a new [Targets] filter, returning the previous one.
    ///
    /// An unparseable filter is a `BadRequest` and leaves the active filter untouched.
    pub fn update_active_filter(&self, filter: impl Into<String>) -> Result<String> {
        let filter = filter.into();
        let targets = filter
            .parse::<Targets>()
            .map_to_err(GenericErrorCode::BadRequest, "Couldn't parse the filter")?;

        let mut active = self.active.lock();
        (self.apply)(targets)?;
        tracing::info!("Tracing filter updated to '{filter}'");
        Ok(mem::replace(&mut *active, filter))
    }

    /// Goes back to the configured filter, returning the previous one
    pub fn reset_filter(&self) -> Result<String> {
        self.update_active_filter(self.configured.to_string())
    }
}

impl TracingConfig {
    /// Builds the compact fmt layer filtered by this config, along with the [TracingContext] able to change its filter
    pub fn layer<S>(&self) -> anyhow::Result<(impl Layer<S>, TracingContext)>
    where
        S: Subscriber,
        for<'span> S: LookupSpan<'span>,
    {
        let targets = self
            .filter
            .parse::<Targets>()
            .with_context(|| format!("Couldn't parse tracing filter '{}'", self.filter))?;

        let (layer, handle) = reload::Layer::new(tracing_subscriber::fmt::layer().compact().with_filter(targets));

        let context = TracingContext {
            configured: self.filter.as_str().into(),
            active: Arc::new(Mutex::new(self.filter.clone())),
            apply: Arc::new(move |targets: Targets| {
                handle
                    .modify(|layer| *layer.filter_mut() = targets)
                    .map_to_internal_err("Couldn't update tracing filter")
            }),
        };

        Ok((ErrorLayer::default().and_then(layer), context))
    }

    /// Installs the global subscriber for this config.
    ///
    /// Fails if the filter can't be parsed or a global subscriber is already set.
    pub fn init(&self) -> anyhow::Result<TracingContext> {
        let (layer, context) = self.layer()?;
        tracing_subscriber::registry()
            .with(layer)
            .try_init()
            .context("A global tracing subscriber is already set")?;
        Ok(context)
    }
}
