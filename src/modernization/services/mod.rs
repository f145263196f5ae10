mod bom_upgrade_resolver;

pub use bom_upgrade_resolver::BomUpgradeResolver;
