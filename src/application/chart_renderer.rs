// Rendering collaborator trait
use crate::domain::chart::ChartRequest;
use async_trait::async_trait;

/// Owned handle to a mounted chart.
///
/// Not `Clone`; [`ChartRenderer::destroy`] consumes it.
#[derive(Debug, PartialEq, Eq)]
pub struct ChartHandle {
    id: u64,
}

impl ChartHandle {
    pub fn new(id: u64) -> Self {
        Self { id }
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

#[async_trait]
pub trait ChartRenderer: Send + Sync {
    /// Mount a chart. Fails if a previous chart is still mounted.
    async fn render(&self, request: ChartRequest) -> anyhow::Result<ChartHandle>;

    /// Tear down a mounted chart
    async fn destroy(&self, handle: ChartHandle) -> anyhow::Result<()>;
}
