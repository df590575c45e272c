pub mod listing;
pub mod ptr_record;
pub mod zone_file;
