pub mod analytics;
pub mod dns;
pub mod firewall;
pub mod zones;

pub use analytics::analytics_get;
pub use dns::dns_get;
pub use firewall::firewall_get;
pub use zones::zones_get;
