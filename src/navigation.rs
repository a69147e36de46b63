//! Builds navigation hrefs that carry the current query string across routes.
//!
//! Each [`NavigationStrategy`] rewrites the query parameters in turn; the
//! default chain resets the page and then drops the parameters the target
//! route ignores.

use std::sync::Arc;

use crate::models::config::{AppConfig, NavigationConfig};
use crate::query::{PageUrl, QueryParams};
use crate::settings;

/// Route change being resolved.
pub struct NavigationContext<'a> {
    pub current_path: &'a str,
    pub target_path: &'a str,
    pub config: &'a NavigationConfig,
}

/// Transformation of the query parameters applied while building an href.
pub trait NavigationStrategy: Send + Sync {
    fn apply(&self, context: &NavigationContext<'_>, params: QueryParams) -> QueryParams;
}

impl<F> NavigationStrategy for F
where
    F: Fn(&NavigationContext<'_>, QueryParams) -> QueryParams + Send + Sync,
{
    fn apply(&self, context: &NavigationContext<'_>, params: QueryParams) -> QueryParams {
        self(context, params)
    }
}

/// Sends the user back to the first page when the route changes.
#[derive(Clone, Copy, Debug, Default)]
pub struct PageResetStrategy;

impl NavigationStrategy for PageResetStrategy {
    fn apply(&self, context: &NavigationContext<'_>, mut params: QueryParams) -> QueryParams {
        if context.config.reset_page_on_navigate && context.current_path != context.target_path {
            params.set("page", "1");
        }
        params
    }
}

/// Drops the parameters configured as ignored for the target route.
#[derive(Clone, Copy, Debug, Default)]
pub struct IgnoredParamsStrategy;

impl NavigationStrategy for IgnoredParamsStrategy {
    fn apply(&self, context: &NavigationContext<'_>, mut params: QueryParams) -> QueryParams {
        for name in context.config.ignored_for(context.target_path) {
            params.remove(name);
        }
        params
    }
}

pub struct NavigationBuilder {
    config: Arc<AppConfig>,
    strategies: Vec<Box<dyn NavigationStrategy>>,
}

impl NavigationBuilder {
    /// Builder with the page reset and ignored parameter strategies.
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self::with_strategies(
            config,
            vec![Box::new(PageResetStrategy), Box::new(IgnoredParamsStrategy)],
        )
    }

    pub fn from_current() -> Self {
        Self::new(settings::current())
    }

    pub fn with_strategies(
        config: Arc<AppConfig>,
        strategies: Vec<Box<dyn NavigationStrategy>>,
    ) -> Self {
        Self { config, strategies }
    }

    /// Appends a strategy run after the existing ones.
    pub fn push(mut self, strategy: impl NavigationStrategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    /// Href for `target_path` given the page currently displayed.
    pub fn build(&self, target_path: &str, current: &PageUrl) -> String {
        if target_path == "/" {
            return "/".to_string();
        }

        let context = NavigationContext {
            current_path: current.path(),
            target_path,
            config: &self.config.navigation,
        };
        let params = self
            .strategies
            .iter()
            .fold(current.query().clone(), |params, strategy| {
                strategy.apply(&context, params)
            });

        if params.is_empty() {
            target_path.to_string()
        } else {
            format!("{target_path}?{}", params.encode())
        }
    }
}
