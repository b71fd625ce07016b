// In-memory chart board - Holds the single mounted chart for the browser
use crate::application::chart_renderer::{ChartHandle, ChartRenderer};
use crate::domain::chart::ChartRequest;
use anyhow::{bail, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

#[derive(Debug)]
struct MountedChart {
    id: u64,
    request: ChartRequest,
}

#[derive(Debug, Default)]
pub struct ChartBoard {
    mounted: RwLock<Option<MountedChart>>,
    next_id: AtomicU64,
}

impl ChartBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The chart currently on the board, if any
    pub async fn current(&self) -> Option<ChartRequest> {
        self.mounted.read().await.as_ref().map(|m| m.request.clone())
    }
}

#[async_trait]
impl ChartRenderer for ChartBoard {
    async fn render(&self, request: ChartRequest) -> Result<ChartHandle> {
        let mut slot = self.mounted.write().await;
        if let Some(mounted) = slot.as_ref() {
            bail!("chart {} is still mounted", mounted.id);
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(chart = id, title = %request.title, "Mounting chart");
        *slot = Some(MountedChart { id, request });

        Ok(ChartHandle::new(id))
    }

    async fn destroy(&self, handle: ChartHandle) -> Result<()> {
        let mut slot = self.mounted.write().await;
        match slot.as_ref() {
            Some(mounted) if mounted.id == handle.id() => {
                *slot = None;
                Ok(())
            }
            _ => bail!("chart {} is not mounted", handle.id()),
        }
    }
}
