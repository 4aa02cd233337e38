/// Text table and CSV rendering of report rows
pub mod report;
