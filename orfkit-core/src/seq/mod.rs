pub mod feature;
pub mod record;

pub use feature::FeatureLocation;
pub use record::SeqRecord;
