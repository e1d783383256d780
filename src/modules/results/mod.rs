pub mod analytics;
pub mod controller;
pub mod model;
pub mod report_card;
pub mod router;
pub mod service;
