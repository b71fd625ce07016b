// Infrastructure layer - Input parsing, configuration and adapters
pub mod chart_board;
pub mod config;
pub mod delimited;
pub mod http_response;
