pub mod analysis;
pub mod api;
pub mod capture;
pub mod normalize;
pub mod report;
pub mod ui;
