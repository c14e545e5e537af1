pub mod cleanup;
pub mod contacts;
pub mod dedupe;
pub mod enrich;
pub mod normalize;
pub mod shape;
