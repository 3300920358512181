//! # Price List
//!
//! Price-list entries and the economic settings that come with them.
//!
//! Price lists are maintained as spreadsheets with a `Material` sheet and an
//! `Ekonomi` sheet. This module reads their JSON export (one object per row)
//! and tolerates the column spellings that show up in practice
//! (`Inkopspris`, `Inköpspris`, `inkopspris`, ...). Missing numeric columns
//! fall back to defaults so a half-filled sheet still produces entries.
//!
//! When no file is supplied, [`default_price_list`] provides a built-in
//! table covering every article the quantity rules know about.
//!
//! ## Example
//!
//! ```rust
//! use timber_core::price_list::{parse_price_list, Category};
//!
//! let json = r#"[
//!     { "Kategori": "Tak", "Artikel": "Takplåt", "Enhet": "m2",
//!       "MangdPerM2": 1, "Inköpspris": 120, "TaMed": "TRUE" }
//! ]"#;
//! let source = parse_price_list(json).unwrap();
//! let entry = &source.entries[0];
//! assert_eq!(entry.category, Category::Roof);
//! assert_eq!(entry.waste_pct, 10.0);
//! assert_eq!(entry.markup_pct, 30.0);
//! assert!(entry.include);
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{CalcError, CalcResult};

/// Waste percentage assumed when a row has no waste column
pub const DEFAULT_WASTE_PCT: f64 = 10.0;

/// Markup percentage assumed when a row has no markup column
pub const DEFAULT_MARKUP_PCT: f64 = 30.0;

// ============================================================================
// Category and Unit
// ============================================================================

/// Price-list category. Quantity rules dispatch on this first.
///
/// Serializes as the spreadsheet label (`"Golv"`, `"Stomme"`, ...). Labels
/// no rule knows about are kept verbatim in [`Category::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    /// Golv
    Floor,
    /// Stomme
    Frame,
    /// Tak
    Roof,
    /// Vägg
    Wall,
    /// Invändigt
    Interior,
    /// Grund
    Foundation,
    /// Anything else found in a price list
    Other(String),
}

impl Category {
    /// Known categories in the order materials are listed in a quote
    pub const DISPLAY_ORDER: [Category; 6] = [
        Category::Frame,
        Category::Floor,
        Category::Roof,
        Category::Wall,
        Category::Interior,
        Category::Foundation,
    ];

    /// Spreadsheet label
    pub fn code(&self) -> &str {
        match self {
            Category::Floor => "Golv",
            Category::Frame => "Stomme",
            Category::Roof => "Tak",
            Category::Wall => "Vägg",
            Category::Interior => "Invändigt",
            Category::Foundation => "Grund",
            Category::Other(label) => label,
        }
    }

    /// Lenient parse: Swedish or English label, any case; unknown labels
    /// become [`Category::Other`].
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "golv" | "floor" => Category::Floor,
            "stomme" | "frame" => Category::Frame,
            "tak" | "roof" => Category::Roof,
            "vägg" | "vagg" | "wall" => Category::Wall,
            "invändigt" | "invandigt" | "interior" => Category::Interior,
            "grund" | "foundation" => Category::Foundation,
            _ => Category::Other(label.trim().to_string()),
        }
    }

    /// Strict parse for collaborators that want to reject unknown labels
    pub fn parse_known(label: &str) -> CalcResult<Self> {
        match Category::from_label(label) {
            Category::Other(_) => Err(CalcError::unknown_category(label)),
            known => Ok(known),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Category::Other(_))
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        Category::from_label(&label)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.code().to_string()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Unit of measure of a price-list article
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Unit {
    /// Running metres (lm)
    Length,
    /// Square metres (m2)
    Area,
    /// Pieces (st)
    Count,
    /// Any other unit label, kept verbatim
    Other(String),
}

impl Unit {
    pub fn code(&self) -> &str {
        match self {
            Unit::Length => "lm",
            Unit::Area => "m2",
            Unit::Count => "st",
            Unit::Other(label) => label,
        }
    }

    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "lm" | "m" => Unit::Length,
            "m2" | "m²" | "kvm" => Unit::Area,
            "st" | "pcs" => Unit::Count,
            _ => Unit::Other(label.trim().to_string()),
        }
    }

    pub fn is_count(&self) -> bool {
        matches!(self, Unit::Count)
    }
}

impl From<String> for Unit {
    fn from(label: String) -> Self {
        Unit::from_label(&label)
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.code().to_string()
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Entries and Economy
// ============================================================================

/// One row of the price list.
///
/// Read-only input to the quantity engine. Article names are not unique;
/// rules and override merges match on the name text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceListEntry {
    pub category: Category,
    pub article: String,
    pub unit: Unit,

    /// Quantity per m² of the governing area. Some rules reinterpret it
    /// (coverage per plate, boards per roof edge).
    #[serde(default)]
    pub quantity_per_m2: f64,

    /// Labor hours per unit
    #[serde(default)]
    pub labor_hours_per_unit: f64,

    /// Purchase price per unit (kr)
    #[serde(default)]
    pub purchase_price: f64,

    #[serde(default)]
    pub waste_pct: f64,

    #[serde(default)]
    pub markup_pct: f64,

    /// Include in the quote unless the quantity comes out as zero
    #[serde(default)]
    pub include: bool,

    #[serde(default)]
    pub note: String,
}

impl PriceListEntry {
    /// Entry with default waste and markup, included, no note
    pub fn new(category: Category, article: impl Into<String>, unit: Unit) -> Self {
        PriceListEntry {
            category,
            article: article.into(),
            unit,
            quantity_per_m2: 0.0,
            labor_hours_per_unit: 0.0,
            purchase_price: 0.0,
            waste_pct: DEFAULT_WASTE_PCT,
            markup_pct: DEFAULT_MARKUP_PCT,
            include: true,
            note: String::new(),
        }
    }

    pub fn with_coefficient(mut self, quantity_per_m2: f64) -> Self {
        self.quantity_per_m2 = quantity_per_m2;
        self
    }

    pub fn with_labor(mut self, hours_per_unit: f64) -> Self {
        self.labor_hours_per_unit = hours_per_unit;
        self
    }

    pub fn with_price(mut self, purchase_price: f64) -> Self {
        self.purchase_price = purchase_price;
        self
    }

    pub fn with_waste(mut self, waste_pct: f64) -> Self {
        self.waste_pct = waste_pct;
        self
    }

    pub fn with_include(mut self, include: bool) -> Self {
        self.include = include;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }
}

/// Economic parameters delivered alongside a price list
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EconomySettings {
    /// Log purchase price (kr per unit)
    pub log_price_in: f64,
    /// Log sale price (kr per unit)
    pub log_price_out: f64,
    /// Labor rate (kr/h)
    pub hourly_rate: f64,
    /// VAT percentage
    pub vat_pct: f64,
}

impl Default for EconomySettings {
    fn default() -> Self {
        EconomySettings {
            log_price_in: 458.0,
            log_price_out: 850.0,
            hourly_rate: 550.0,
            vat_pct: 25.0,
        }
    }
}

/// Everything a price-list file yields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceListSource {
    pub entries: Vec<PriceListEntry>,
    /// Present when the file carried an economy sheet
    pub economy: Option<EconomySettings>,
}

// ============================================================================
// Spreadsheet Row Parsing
// ============================================================================

const CATEGORY_COLUMNS: &[&str] = &["Kategori", "kategori", "Category", "category"];
const ARTICLE_COLUMNS: &[&str] = &["Artikel", "artikel", "Article", "article"];
const UNIT_COLUMNS: &[&str] = &["Enhet", "enhet", "Unit", "unit"];
const COEFFICIENT_COLUMNS: &[&str] = &["MangdPerM2", "mangdPerM2", "Mängd/m2", "quantity_per_m2"];
const LABOR_COLUMNS: &[&str] = &["Enhetstid", "enhetstid", "labor_hours_per_unit"];
const PRICE_COLUMNS: &[&str] = &["Inkopspris", "inkopspris", "Inköpspris", "purchase_price"];
const WASTE_COLUMNS: &[&str] = &["SpillPct", "spillPct", "Spill", "Spill %", "waste_pct"];
const MARKUP_COLUMNS: &[&str] = &["PaslagPct", "paslagPct", "Påslag", "Påslag %", "markup_pct"];
const INCLUDE_COLUMNS: &[&str] = &["TaMed", "taMed", "include"];
const NOTE_COLUMNS: &[&str] = &["Notering", "notering", "Note", "note"];

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// First non-empty cell among the alias columns.
///
/// Zeros and `false` also count as empty here, so a later alias can still
/// supply the value. Use [`explicit_cell`] where a zero is meaningful.
fn cell<'a>(row: &'a Map<String, Value>, columns: &[&str]) -> Option<&'a Value> {
    columns.iter().filter_map(|c| row.get(*c)).find(|v| match v {
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::Bool(b) => *b,
        other => !is_blank(other),
    })
}

/// First cell among the alias columns that is neither null nor blank text
fn explicit_cell<'a>(row: &'a Map<String, Value>, columns: &[&str]) -> Option<&'a Value> {
    columns.iter().filter_map(|c| row.get(*c)).find(|v| !is_blank(v))
}

fn cell_text(row: &Map<String, Value>, columns: &[&str]) -> String {
    match cell(row, columns) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

/// Numbers may arrive as JSON numbers or as text with a decimal comma
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', ".").parse().ok(),
        _ => None,
    }
}

fn cell_number(row: &Map<String, Value>, columns: &[&str]) -> Option<f64> {
    cell(row, columns).and_then(as_number)
}

/// Like [`cell_number`], but an explicit `0` is kept instead of skipped
fn explicit_number(row: &Map<String, Value>, columns: &[&str]) -> Option<f64> {
    explicit_cell(row, columns).and_then(as_number)
}

fn cell_flag(row: &Map<String, Value>, columns: &[&str]) -> bool {
    match cell(row, columns) {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64() == Some(1.0),
        Some(Value::String(s)) => matches!(s.trim(), "TRUE" | "true" | "True" | "1"),
        _ => false,
    }
}

/// Parse one material row. `Ok(None)` for a fully blank row.
fn parse_material_row(index: usize, row: &Value) -> CalcResult<Option<PriceListEntry>> {
    let row = row.as_object().ok_or_else(|| {
        CalcError::serialization(format!("price-list row {} is not an object", index + 1))
    })?;

    let category = cell_text(row, CATEGORY_COLUMNS);
    let article = cell_text(row, ARTICLE_COLUMNS);
    if category.is_empty() && article.is_empty() {
        return Ok(None);
    }
    if article.is_empty() {
        tracing::warn!(row = index + 1, category = %category, "price-list row without article");
        return Err(CalcError::missing_field(format!("Artikel (row {})", index + 1)));
    }

    Ok(Some(PriceListEntry {
        category: Category::from_label(&category),
        article,
        unit: Unit::from_label(&cell_text(row, UNIT_COLUMNS)),
        quantity_per_m2: cell_number(row, COEFFICIENT_COLUMNS).unwrap_or(0.0),
        labor_hours_per_unit: cell_number(row, LABOR_COLUMNS).unwrap_or(0.0),
        purchase_price: cell_number(row, PRICE_COLUMNS).unwrap_or(0.0),
        waste_pct: explicit_number(row, WASTE_COLUMNS).unwrap_or(DEFAULT_WASTE_PCT),
        markup_pct: explicit_number(row, MARKUP_COLUMNS).unwrap_or(DEFAULT_MARKUP_PCT),
        include: cell_flag(row, INCLUDE_COLUMNS),
        note: cell_text(row, NOTE_COLUMNS),
    }))
}

/// Parse the rows of a material sheet.
pub fn parse_material_rows(rows: &[Value]) -> CalcResult<Vec<PriceListEntry>> {
    let mut entries = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        if let Some(entry) = parse_material_row(index, row)? {
            entries.push(entry);
        }
    }
    Ok(entries)
}

/// Parse the `{ Parameter, Värde }` rows of an economy sheet.
///
/// Unknown parameters are ignored; missing ones keep their defaults.
pub fn parse_economy_rows(rows: &[Value]) -> EconomySettings {
    let mut economy = EconomySettings::default();
    for row in rows.iter().filter_map(Value::as_object) {
        let name = cell_text(row, &["Parameter", "parameter"]);
        let Some(value) = explicit_number(row, &["Värde", "Varde", "värde", "Value", "value"]) else {
            continue;
        };
        match name.as_str() {
            "PrisTimmerIn" => economy.log_price_in = value,
            "PrisTimmerUt" => economy.log_price_out = value,
            "Timkostnad" => economy.hourly_rate = value,
            "MomsPct" => economy.vat_pct = value,
            other => tracing::debug!(parameter = other, "ignoring unknown economy parameter"),
        }
    }
    economy
}

/// Parse a price-list JSON export.
///
/// Accepts either a bare array of material rows, or an object holding a
/// `Material` array and an optional `Ekonomi` array (one key per sheet).
pub fn parse_price_list(json: &str) -> CalcResult<PriceListSource> {
    let value: Value = serde_json::from_str(json)?;
    match value {
        Value::Array(rows) => Ok(PriceListSource {
            entries: parse_material_rows(&rows)?,
            economy: None,
        }),
        Value::Object(sheets) => {
            let material = sheets
                .get("Material")
                .or_else(|| sheets.get("material"))
                .and_then(Value::as_array)
                .ok_or_else(|| CalcError::missing_field("Material"))?;
            let economy = sheets
                .get("Ekonomi")
                .or_else(|| sheets.get("ekonomi"))
                .and_then(Value::as_array)
                .map(|rows| parse_economy_rows(rows));
            Ok(PriceListSource {
                entries: parse_material_rows(material)?,
                economy,
            })
        }
        _ => Err(CalcError::serialization("price list must be an array or an object of sheets")),
    }
}

// ============================================================================
// Built-in Price List
// ============================================================================

static DEFAULT_PRICE_LIST: Lazy<Vec<PriceListEntry>> = Lazy::new(|| {
    use Category::*;
    let m2 = || Unit::Area;
    let lm = || Unit::Length;
    let st = || Unit::Count;

    vec![
        // Golv
        PriceListEntry::new(Floor, "Golvreglar 45x145-220", lm()).with_coefficient(1.67).with_labor(0.2).with_price(45.0).with_note("Impregnerad"),
        PriceListEntry::new(Floor, "Stödregel 45x45", lm()).with_coefficient(0.41).with_labor(0.06).with_price(15.0).with_note("2 × invändig bredd"),
        PriceListEntry::new(Floor, "Bärlina 45x95", lm()).with_labor(0.1).with_price(25.0).with_note("Stommens bredd, endast med grund"),
        PriceListEntry::new(Floor, "Trallgolv", m2()).with_coefficient(1.0).with_labor(0.15).with_price(195.0).with_note("Beräknas på golvyta"),
        PriceListEntry::new(Floor, "Trossbottenskiva", st()).with_coefficient(1.389).with_labor(0.15).with_price(85.0).with_note("0.72 m²/skiva, avrundas uppåt"),
        PriceListEntry::new(Floor, "Trossbottenpapp", m2()).with_coefficient(1.0).with_labor(0.05).with_price(25.0),
        PriceListEntry::new(Floor, "Spånskivegolv", m2()).with_coefficient(1.0).with_labor(0.3).with_price(95.0),
        PriceListEntry::new(Floor, "Isolering golv", m2()).with_coefficient(1.0).with_labor(0.18).with_price(75.0),
        // Stomme
        PriceListEntry::new(Frame, "Timmer (tillverkning)", m2()).with_coefficient(1.0).with_labor(0.45).with_price(458.0).with_note("Väggarea m² × pris/m²"),
        PriceListEntry::new(Frame, "Montering stomme", m2()).with_coefficient(1.0).with_labor(0.4).with_waste(0.0).with_note("Endast arbetstid"),
        PriceListEntry::new(Frame, "Syllvirke 45x95", lm()).with_labor(0.1).with_price(25.0).with_note("Syllomkrets"),
        PriceListEntry::new(Frame, "Dragstång", st()).with_labor(0.25).with_price(120.0).with_waste(0.0),
        // Tak
        PriceListEntry::new(Roof, "Takåsar", lm()).with_labor(0.15).with_price(85.0).with_note("Antal × taklängd"),
        PriceListEntry::new(Roof, "Råspont", m2()).with_coefficient(1.0).with_labor(0.2).with_price(95.0),
        PriceListEntry::new(Roof, "Underlagspapp", m2()).with_coefficient(1.0).with_labor(0.08).with_price(35.0),
        PriceListEntry::new(Roof, "Ströläkt 12x50", lm()).with_coefficient(2.0).with_labor(0.05).with_price(8.0).with_note("c/c 0.6"),
        PriceListEntry::new(Roof, "Bärläkt 28x70", lm()).with_coefficient(1.67).with_labor(0.1).with_price(12.0).with_note("c/c 0.5"),
        PriceListEntry::new(Roof, "Takplåt", m2()).with_coefficient(1.0).with_labor(0.3).with_price(120.0),
        PriceListEntry::new(Roof, "Fotplåt", st()).with_coefficient(1.9).with_labor(0.12).with_price(45.0).with_note("Täcker 1.9 m/st"),
        PriceListEntry::new(Roof, "Vindskivor 22x145", lm()).with_coefficient(2.0).with_labor(0.15).with_price(55.0).with_note("2 brädor per takfall"),
        PriceListEntry::new(Roof, "Vindskiveplåt", st()).with_coefficient(1.9).with_labor(0.25).with_price(85.0).with_note("Täcker 1.9 m/st"),
        PriceListEntry::new(Roof, "Takfotsbräda 22x145", lm()).with_labor(0.15).with_price(25.0).with_note("2 × taklängd"),
        PriceListEntry::new(Roof, "Regnvattensystem", lm()).with_labor(0.2).with_price(85.0).with_note("2 × taklängd"),
        PriceListEntry::new(Roof, "Nockplåt", lm()).with_labor(0.25).with_price(65.0).with_note("Taklängd"),
        // Vägg
        PriceListEntry::new(Wall, "Ytbehandling utvändigt", Unit::Other("l".to_string())).with_coefficient(0.25).with_labor(0.1).with_price(120.0).with_note("Lasyr, två strykningar"),
        PriceListEntry::new(Wall, "Drevning", lm()).with_coefficient(1.2).with_labor(0.05).with_price(6.0),
        // Invändigt
        PriceListEntry::new(Interior, "Innerväggspanel", m2()).with_coefficient(1.0).with_labor(0.35).with_price(140.0).with_include(false).with_note("Tillval"),
        PriceListEntry::new(Interior, "Innertakspanel", m2()).with_coefficient(1.0).with_labor(0.45).with_price(150.0).with_include(false).with_note("Tillval"),
        PriceListEntry::new(Interior, "Golvlist", lm()).with_coefficient(0.8).with_labor(0.1).with_price(18.0).with_include(false),
        // Grund
        PriceListEntry::new(Foundation, "Plintar", st()).with_labor(0.5).with_price(350.0).with_waste(0.0),
        PriceListEntry::new(Foundation, "Betongsten 40x40x10", st()).with_labor(0.2).with_price(45.0).with_waste(0.0),
        PriceListEntry::new(Foundation, "Markduk", m2()).with_coefficient(1.2).with_labor(0.02).with_price(12.0),
    ]
});

/// Built-in price list used when no spreadsheet is available
pub fn default_price_list() -> &'static [PriceListEntry] {
    &DEFAULT_PRICE_LIST
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_labels() {
        assert_eq!(Category::from_label("Golv"), Category::Floor);
        assert_eq!(Category::from_label(" roof "), Category::Roof);
        assert_eq!(Category::from_label("Vägg"), Category::Wall);
        assert_eq!(Category::from_label("Garage"), Category::Other("Garage".to_string()));
        assert!(Category::parse_known("Garage").is_err());
        assert_eq!(Category::parse_known("Grund").unwrap(), Category::Foundation);
    }

    #[test]
    fn test_category_serializes_as_label() {
        let json = serde_json::to_string(&Category::Interior).unwrap();
        assert_eq!(json, "\"Invändigt\"");
        let back: Category = serde_json::from_str("\"Stomme\"").unwrap();
        assert_eq!(back, Category::Frame);
    }

    #[test]
    fn test_units() {
        assert_eq!(Unit::from_label("st"), Unit::Count);
        assert_eq!(Unit::from_label("m²"), Unit::Area);
        assert_eq!(Unit::from_label("lm"), Unit::Length);
        assert_eq!(Unit::from_label("l").code(), "l");
        assert!(Unit::Count.is_count());
    }

    #[test]
    fn test_row_aliases_and_defaults() {
        let rows = vec![json!({
            "kategori": "Golv",
            "artikel": "Trossbottenskiva",
            "enhet": "st",
            "Mängd/m2": "1,389",
            "Enhetstid": 0.15,
            "Inköpspris": 85,
            "TaMed": 1
        })];
        let entries = parse_material_rows(&rows).unwrap();
        let e = &entries[0];
        assert_eq!(e.category, Category::Floor);
        assert_eq!(e.unit, Unit::Count);
        assert!((e.quantity_per_m2 - 1.389).abs() < 1e-12);
        assert_eq!(e.purchase_price, 85.0);
        assert_eq!(e.waste_pct, DEFAULT_WASTE_PCT);
        assert_eq!(e.markup_pct, DEFAULT_MARKUP_PCT);
        assert!(e.include);
        assert_eq!(e.note, "");
    }

    #[test]
    fn test_explicit_zero_percentages_kept() {
        let rows = vec![json!({
            "Kategori": "Grund",
            "Artikel": "Plintar",
            "SpillPct": 0,
            "PaslagPct": "0"
        })];
        let e = &parse_material_rows(&rows).unwrap()[0];
        assert_eq!(e.waste_pct, 0.0);
        assert_eq!(e.markup_pct, 0.0);

        // Blank text still means "not filled in"
        let rows = vec![json!({ "Kategori": "Grund", "Artikel": "Plintar", "SpillPct": " " })];
        assert_eq!(parse_material_rows(&rows).unwrap()[0].waste_pct, DEFAULT_WASTE_PCT);
    }

    #[test]
    fn test_zero_economy_value_kept() {
        let economy = parse_economy_rows(&[json!({ "Parameter": "MomsPct", "Värde": 0 })]);
        assert_eq!(economy.vat_pct, 0.0);
    }

    #[test]
    fn test_default_price_list_survives_export() {
        let exported = serde_json::to_string(default_price_list()).unwrap();
        let source = parse_price_list(&exported).unwrap();
        assert_eq!(source.entries.len(), default_price_list().len());
        for (back, original) in source.entries.iter().zip(default_price_list()) {
            assert_eq!(back.category, original.category);
            assert_eq!(back.article, original.article);
            assert_eq!(back.unit, original.unit);
            assert_eq!(back.include, original.include);
            assert!((back.waste_pct - original.waste_pct).abs() < 1e-9, "{}", original.article);
            assert!((back.markup_pct - original.markup_pct).abs() < 1e-9, "{}", original.article);
            assert!((back.purchase_price - original.purchase_price).abs() < 1e-9);
            assert!((back.quantity_per_m2 - original.quantity_per_m2).abs() < 1e-9);
            assert!((back.labor_hours_per_unit - original.labor_hours_per_unit).abs() < 1e-9);
        }
    }

    #[test]
    fn test_include_flag_variants() {
        for (value, expected) in [
            (json!(true), true),
            (json!("TRUE"), true),
            (json!(1), true),
            (json!("nej"), false),
            (json!(false), false),
        ] {
            let rows = vec![json!({ "Kategori": "Tak", "Artikel": "Takplåt", "TaMed": value })];
            assert_eq!(parse_material_rows(&rows).unwrap()[0].include, expected);
        }
    }

    #[test]
    fn test_blank_rows_skipped_missing_article_rejected() {
        let rows = vec![json!({}), json!({ "Kategori": "", "Artikel": "" })];
        assert!(parse_material_rows(&rows).unwrap().is_empty());

        let rows = vec![json!({ "Kategori": "Tak" })];
        let err = parse_material_rows(&rows).unwrap_err();
        assert_eq!(err.error_code(), "MISSING_FIELD");
    }

    #[test]
    fn test_sheets_object() {
        let json = r#"{
            "Material": [{ "Kategori": "Grund", "Artikel": "Plintar", "Enhet": "st", "TaMed": true }],
            "Ekonomi": [
                { "Parameter": "PrisTimmerIn", "Värde": 500 },
                { "Parameter": "MomsPct", "Värde": 12 },
                { "Parameter": "Okänd", "Värde": 1 }
            ]
        }"#;
        let source = parse_price_list(json).unwrap();
        assert_eq!(source.entries.len(), 1);
        let economy = source.economy.unwrap();
        assert_eq!(economy.log_price_in, 500.0);
        assert_eq!(economy.vat_pct, 12.0);
        assert_eq!(economy.log_price_out, 850.0);
    }

    #[test]
    fn test_non_list_rejected() {
        assert!(parse_price_list("42").is_err());
        assert!(parse_price_list("[1]").is_err());
        assert!(parse_price_list("{\"Ekonomi\": []}").is_err());
    }

    #[test]
    fn test_entry_defaults_when_deserializing() {
        let entry: PriceListEntry = serde_json::from_str(
            r#"{ "category": "Vägg", "article": "Drevning", "unit": "lm" }"#,
        )
        .unwrap();
        assert_eq!(entry.quantity_per_m2, 0.0);
        assert!(!entry.include);
    }

    #[test]
    fn test_default_price_list() {
        let list = default_price_list();
        assert!(list.len() > 25);
        assert!(list.iter().all(|e| e.category.is_known()));
        assert!(list.iter().any(|e| e.article == "Timmer (tillverkning)"));
    }
}
