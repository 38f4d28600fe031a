pub mod agent;
pub mod cli;
pub mod evaluation;
pub mod log;
pub mod results;
pub mod train;
pub mod util;
