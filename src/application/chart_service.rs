// Chart service - Turns an uploaded file into a mounted chart
use crate::application::chart_assembler::{series, subtitle, to_points, value_bounds};
use crate::application::chart_renderer::{ChartHandle, ChartRenderer};
use crate::domain::chart::{ChartKind, ChartRequest};
use crate::domain::envelope::{moving_max, moving_min, window_size};
use crate::domain::error::LoadError;
use crate::domain::upload::UploadedFile;
use crate::infrastructure::config::{AppConfig, ChartSettings, DownsamplingSettings, InputSettings};
use crate::infrastructure::delimited::tokenize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Claim on the single in-flight load slot.
///
/// Only the most recently issued ticket may mount its chart.
#[derive(Debug)]
pub struct LoadTicket {
    generation: u64,
}

#[derive(Debug)]
enum ChartState {
    Idle,
    Rendered(ChartHandle),
}

pub struct ChartService {
    renderer: Arc<dyn ChartRenderer>,
    input: InputSettings,
    downsampling: DownsamplingSettings,
    chart: ChartSettings,
    state: Mutex<ChartState>,
    latest_generation: AtomicU64,
}

impl ChartService {
    pub fn new(renderer: Arc<dyn ChartRenderer>, config: &AppConfig) -> Self {
        Self {
            renderer,
            input: config.input.clone(),
            downsampling: config.downsampling.clone(),
            chart: config.chart.clone(),
            state: Mutex::new(ChartState::Idle),
            latest_generation: AtomicU64::new(0),
        }
    }

    /// Take the load slot before the file is read. Any earlier ticket that
    /// has not yet completed is superseded.
    pub fn begin_load(&self) -> LoadTicket {
        let generation = self.latest_generation.fetch_add(1, Ordering::SeqCst) + 1;
        LoadTicket { generation }
    }

    fn is_current(&self, ticket: &LoadTicket) -> bool {
        self.latest_generation.load(Ordering::SeqCst) == ticket.generation
    }

    /// Parse, downsample and mount `upload`, replacing any mounted chart.
    ///
    /// On any error the previously mounted chart, if any, stays as it was.
    pub async fn complete_load(
        &self,
        ticket: LoadTicket,
        upload: UploadedFile,
    ) -> Result<ChartRequest, LoadError> {
        tracing::info!(
            file = upload.name.as_deref().unwrap_or("NOT SUPPORTED"),
            content_type = upload.content_type.as_deref().unwrap_or("NOT SUPPORTED"),
            size = upload.text.len(),
            "Received heart-rate file"
        );

        if !self.is_current(&ticket) {
            tracing::debug!(generation = ticket.generation, "Dropping superseded load before parsing");
            return Err(LoadError::Superseded);
        }

        let request = self.build_request(&upload).inspect_err(|e| {
            tracing::warn!("Rejected {}: {}", upload.title(), e);
        })?;

        let mut state = self.state.lock().await;
        if !self.is_current(&ticket) {
            tracing::debug!(generation = ticket.generation, "Dropping superseded load before render");
            return Err(LoadError::Superseded);
        }

        if let ChartState::Rendered(handle) = std::mem::replace(&mut *state, ChartState::Idle) {
            tracing::debug!(chart = handle.id(), "Tearing down previous chart");
            self.renderer.destroy(handle).await.map_err(LoadError::Render)?;
        }

        let handle = self
            .renderer
            .render(request.clone())
            .await
            .map_err(LoadError::Render)?;

        tracing::info!(
            chart = handle.id(),
            title = %request.title,
            series = request.series.len(),
            points = request.point_count(),
            "Chart rendered"
        );
        *state = ChartState::Rendered(handle);

        Ok(request)
    }

    #[cfg(test)]
    pub async fn load(&self, upload: UploadedFile) -> Result<ChartRequest, LoadError> {
        let ticket = self.begin_load();
        self.complete_load(ticket, upload).await
    }

    /// Tear down the mounted chart, if any, and return to idle.
    pub async fn reset(&self) -> anyhow::Result<()> {
        let mut state = self.state.lock().await;
        if let ChartState::Rendered(handle) = std::mem::replace(&mut *state, ChartState::Idle) {
            let id = handle.id();
            self.renderer.destroy(handle).await?;
            tracing::info!(chart = id, "Chart reset");
        }
        Ok(())
    }

    #[cfg(test)]
    pub async fn is_rendered(&self) -> bool {
        matches!(*self.state.lock().await, ChartState::Rendered(_))
    }

    /// Run the pipeline without touching chart state.
    pub fn build_request(&self, upload: &UploadedFile) -> Result<ChartRequest, LoadError> {
        upload.check_content_type()?;

        let rows = tokenize(&upload.text, &self.input.delimiter, self.input.drop_header);
        if rows.is_empty() {
            return Err(LoadError::EmptyInput);
        }

        // Every row is validated, including those a window would skip.
        let all_points = to_points(&rows)?;
        let bounds = value_bounds(&all_points);

        let (kind, series_list) = if rows.len() > self.downsampling.threshold {
            let window = window_size(rows.len(), self.downsampling.target_points);
            tracing::debug!(rows = rows.len(), window, "Computing BPM envelope");

            let max = to_points(&moving_max(&rows, window)?)?;
            let min = to_points(&moving_min(&rows, window, self.downsampling.min_sentinel)?)?;
            (
                ChartKind::Envelope,
                vec![
                    series(&self.chart.max_series, max),
                    series(&self.chart.min_series, min),
                ],
            )
        } else {
            tracing::debug!(rows = rows.len(), "Rendering rows without downsampling");
            (ChartKind::Line, vec![series(&self.chart.max_series, all_points)])
        };

        let subtitle = subtitle(&series_list[0].points)?;

        Ok(ChartRequest {
            title: upload.title().to_string(),
            subtitle,
            kind,
            y_min: bounds.map(|(lo, _)| lo),
            y_max: bounds.map(|(_, hi)| hi),
            time_format: self.chart.time_format.clone(),
            series: series_list,
        })
    }
}
