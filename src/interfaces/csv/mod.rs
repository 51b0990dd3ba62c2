pub mod listing_writer;
pub mod property_reader;
