pub mod chart;
pub mod fonts;
pub mod holdings;
pub mod theme;
