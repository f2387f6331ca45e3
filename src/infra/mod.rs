pub mod geonames;
pub mod picarta;
