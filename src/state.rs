use crate::config::AppConfig;
use crate::db;
use crate::report::chart::{ChartRenderer, SvgChart};
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
    pub charts: Arc<dyn ChartRenderer>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = db::connect(&config).await?;
        db::migrate(&db).await?;

        let charts = Arc::new(SvgChart::default()) as Arc<dyn ChartRenderer>;

        Ok(Self::from_parts(db, config, charts))
    }

    pub fn from_parts(
        db: SqlitePool,
        config: Arc<AppConfig>,
        charts: Arc<dyn ChartRenderer>,
    ) -> Self {
        Self { db, config, charts }
    }

    /// In-memory store and a chart renderer that skips plotting.
    #[cfg(test)]
    pub async fn fake() -> Self {
        use crate::report::calories::CalorieSeries;
        use crate::report::chart::RenderedChart;

        struct FakeChart;
        impl ChartRenderer for FakeChart {
            fn render(&self, series: &CalorieSeries) -> anyhow::Result<RenderedChart> {
                Ok(RenderedChart {
                    content_type: "text/plain",
                    body: format!("{} days", series.len()).into_bytes(),
                })
            }
        }

        let config = Arc::new(AppConfig {
            database_url: "sqlite::memory:".into(),
            host: "127.0.0.1".into(),
            port: 0,
            max_connections: 1,
        });

        Self::from_parts(db::test_pool().await, config, Arc::new(FakeChart))
    }
}
