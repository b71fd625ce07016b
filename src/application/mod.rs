// Application layer - Load pipeline and the chart rendering seam
pub mod chart_assembler;
pub mod chart_renderer;
pub mod chart_service;
