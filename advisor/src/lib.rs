pub mod pdf;
pub mod prompt;
pub mod report;
pub mod results;
pub mod scan;
pub mod session;

pub use report::{report_date, ReportParser, TestObservation};
pub use results::{DateResults, LabResult, ResultSet};
pub use scan::scan_folder;
