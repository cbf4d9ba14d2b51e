pub mod http_logging;
