//! Ads report builder: breakdown taxonomy, selection rules, metric availability
//! and row normalization shared by the dashboard and the reports API.

pub mod availability;
pub mod breakdown;
pub mod export;
pub mod metrics;
pub mod normalize;
pub mod query;
pub mod row;
pub mod selection;

pub use availability::*;
pub use breakdown::*;
pub use export::*;
pub use metrics::*;
pub use query::*;
pub use row::*;
pub use selection::*;
