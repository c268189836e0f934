pub mod classifier_trait;
pub mod gbdt;
