mod http_analysis_api_test;
