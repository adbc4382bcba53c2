pub mod collect;
pub mod response;
