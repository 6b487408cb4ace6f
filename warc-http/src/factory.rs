use async_trait::async_trait;
use warc_core::service::{PredictionService, ServiceConfig, ServiceError, ServiceFactory};

use crate::client::HttpPredictionService;

/// [`ServiceFactory`] for the plain HTTP backend.
///
/// Register it with a [`warc_core::ServiceRegistry`] to make the `"http"`
/// backend available:
///
/// ```rust,no_run
/// use warc_core::ServiceRegistry;
/// use warc_http::HttpServiceFactory;
///
/// let mut registry = ServiceRegistry::new();
/// registry.register(Box::new(HttpServiceFactory));
/// ```
pub struct HttpServiceFactory;

#[async_trait]
impl ServiceFactory for HttpServiceFactory {
    fn backend_name(&self) -> &'static str {
        "http"
    }

    async fn create(
        &self,
        config: &ServiceConfig,
    ) -> Result<Box<dyn PredictionService>, ServiceError> {
        let service = HttpPredictionService::new(config.timeout)?;
        Ok(Box::new(service))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use warc_core::service::{ServiceConfig, ServiceFactory, ServiceRegistry};

    use super::HttpServiceFactory;

    #[test]
    fn backend_name_is_http() {
        assert_eq!(HttpServiceFactory.backend_name(), "http");
    }

    #[tokio::test]
    async fn registry_resolves_default_config_to_http() {
        let mut registry = ServiceRegistry::new();
        registry.register(Box::new(HttpServiceFactory));

        let result = registry.create(&ServiceConfig::default()).await;

        assert!(result.is_ok());
        assert_eq!(registry.available_backends(), vec!["http"]);
    }
}
