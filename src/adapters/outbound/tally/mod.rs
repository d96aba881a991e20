/// Counter adapters fed by security summaries
mod vulnerability_tally;

pub use vulnerability_tally::VulnerabilityTally;
