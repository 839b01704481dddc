//! Gateway application state.

use std::sync::Arc;

use cirrus_control::InstanceControl;

use crate::config::GatewayConfig;

/// Shared application state available to all request handlers.
pub struct AppState<C>
where
    C: InstanceControl,
{
    /// The lifecycle controller.
    pub control: Arc<C>,
    /// Gateway configuration.
    pub config: GatewayConfig,
}

impl<C> AppState<C>
where
    C: InstanceControl,
{
    /// Create a new gateway state.
    #[must_use]
    pub fn new(control: Arc<C>, config: GatewayConfig) -> Self {
        Self { control, config }
    }
}

impl<C> Clone for AppState<C>
where
    C: InstanceControl,
{
    fn clone(&self) -> Self {
        Self {
            control: Arc::clone(&self.control),
            config: self.config.clone(),
        }
    }
}
