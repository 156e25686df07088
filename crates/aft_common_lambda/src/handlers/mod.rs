pub mod event_logger;
