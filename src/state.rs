use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    config::Config,
    loader::{MockPostSource, PostSource},
    page::{CommentSettings, PostPage},
};

/// The page is shared by every request but only ever touched under the
/// lock, so user actions apply one at a time in arrival order.
pub type SharedPage = Arc<Mutex<PostPage>>;

#[derive(Clone)]
pub struct AppState {
    pub page: SharedPage,
    pub source: Arc<dyn PostSource>,
    pub config: Config,
}

impl AppState {
    /// State backed by the mock loader, configured from `config`.
    pub fn new(config: Config) -> Self {
        let source = Arc::new(MockPostSource::new(config.upvote_seed_max));
        Self::with_source(config, source)
    }

    pub fn with_source(config: Config, source: Arc<dyn PostSource>) -> Self {
        let page = PostPage::new(CommentSettings::from(&config));
        Self {
            page: Arc::new(Mutex::new(page)),
            source,
            config,
        }
    }
}
