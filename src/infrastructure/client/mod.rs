mod http_analysis_api;

pub use http_analysis_api::HttpAnalysisApi;
