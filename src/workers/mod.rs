pub mod thumbnail_worker;
