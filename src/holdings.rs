use serde::Deserialize;
use std::path::Path;

use crate::chart::ChartItem;

/// One portfolio position as it appears in a holdings file.
///
/// Files are a JSON array of PascalCase objects; `Ticker` is optional for
/// positions that are plain cash amounts.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Holding {
    pub name: String,
    #[serde(default)]
    pub ticker: Option<String>,
    pub asset_class: String,
    pub value: f64,
}

pub fn parse_holdings(data: &str) -> Result<Vec<Holding>, String> {
    serde_json::from_str(data).map_err(|e| format!("Failed to parse holdings JSON: {}", e))
}

pub fn load_holdings(path: &Path) -> Result<Vec<Holding>, String> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read holdings file: {}", e))?;
    parse_holdings(&data)
}

fn class_allowed(holding: &Holding, allow: Option<&[String]>) -> bool {
    match allow {
        Some(classes) if !classes.is_empty() => classes
            .iter()
            .any(|class| class.eq_ignore_ascii_case(&holding.asset_class)),
        _ => true,
    }
}

/// One chart item per holding, colored by asset class.
///
/// `allow` is an optional asset-class allow-list (case-insensitive); `None`
/// or an empty list keeps everything.
pub fn holding_items(holdings: &[Holding], allow: Option<&[String]>) -> Vec<ChartItem> {
    holdings
        .iter()
        .filter(|h| class_allowed(h, allow))
        .map(|h| ChartItem {
            id: h.ticker.clone().unwrap_or_else(|| h.name.clone()),
            label: h.name.clone(),
            value: h.value,
            color_key: h.asset_class.clone(),
        })
        .collect()
}

/// One chart item per asset class, aggregated over the filtered holdings.
/// Classes keep first-seen order so the segment order is stable.
pub fn asset_class_items(holdings: &[Holding], allow: Option<&[String]>) -> Vec<ChartItem> {
    let mut items: Vec<ChartItem> = Vec::new();
    for holding in holdings.iter().filter(|h| class_allowed(h, allow)) {
        match items.iter_mut().find(|item| item.id == holding.asset_class) {
            Some(item) => item.value += holding.value,
            None => items.push(ChartItem {
                id: holding.asset_class.clone(),
                label: holding.asset_class.clone(),
                value: holding.value,
                color_key: holding.asset_class.clone(),
            }),
        }
    }
    items
}
