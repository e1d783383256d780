pub mod coscholastic;
pub mod exam_configs;
pub mod results;
