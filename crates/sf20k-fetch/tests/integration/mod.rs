mod report_file;
mod runner;
