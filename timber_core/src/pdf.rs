//! # PDF Generation Module
//!
//! Renders the customer quote ("offert") as a PDF using Typst.
//!
//! ## Architecture
//!
//! - The Typst template is an embedded string constant
//! - Data is injected via placeholder replacement before compilation
//! - All user text (project name, article names) is escaped
//! - Output is raw PDF bytes (`Vec<u8>`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use timber_core::building::BuildingInputs;
//! use timber_core::calculations::estimate;
//! use timber_core::pdf::render_quote_pdf;
//! use timber_core::price_list::default_price_list;
//!
//! let inputs = BuildingInputs::default();
//! let result = estimate(&inputs, default_price_list());
//! let pdf = render_quote_pdf("Friggebod", &inputs, &result.geometry, &result.items)?;
//! std::fs::write("offert.pdf", pdf).unwrap();
//! # Ok::<(), timber_core::errors::CalcError>(())
//! ```

use chrono::Utc;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::building::BuildingInputs;
use crate::calculations::geometry::CalculatedValues;
use crate::calculations::quantities::LineItem;
use crate::calculations::quote::{calculate_totals, group_by_category};
use crate::errors::{CalcError, CalcResult};
use crate::format::{format_currency, format_number, format_time};

// ============================================================================
// Typst World Implementation
// ============================================================================

/// A minimal Typst world for compiling documents without external files.
struct PdfWorld {
    main: Source,
    book: LazyHash<FontBook>,
    fonts: Vec<Font>,
    library: LazyHash<Library>,
}

impl PdfWorld {
    fn new(source: String) -> Self {
        let fonts = Self::load_fonts();
        let book = FontBook::from_fonts(&fonts);

        PdfWorld {
            main: Source::detached(source),
            book: LazyHash::new(book),
            fonts,
            library: LazyHash::new(Library::default()),
        }
    }

    /// Fonts bundled with typst-assets
    fn load_fonts() -> Vec<Font> {
        typst_assets::fonts()
            .flat_map(|data| Font::iter(Bytes::new(data.to_vec())))
            .collect()
    }
}

impl World for PdfWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.fonts.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Utc::now();
        Datetime::from_ymd(
            now.format("%Y").to_string().parse().ok()?,
            now.format("%m").to_string().parse().ok()?,
            now.format("%d").to_string().parse().ok()?,
        )
    }
}

// ============================================================================
// Quote Template
// ============================================================================

const QUOTE_TEMPLATE: &str = r##"
#set page(
  paper: "a4",
  margin: (top: 2cm, bottom: 2cm, left: 2cm, right: 2cm),
  footer: context [
    #line(length: 100%, stroke: 0.5pt + gray)
    #v(4pt)
    #grid(
      columns: (1fr, 1fr),
      align(left)[#text(size: 9pt)[{{PROJECT}}]],
      align(right)[#text(size: 9pt)[Sida #counter(page).display()]],
    )
  ]
)

#set text(font: "Libertinus Serif", size: 10.5pt, lang: "sv")

#grid(
  columns: (1fr, auto),
  [#text(size: 24pt, weight: "bold")[OFFERT]],
  align(right)[
    #text(size: 12pt)[{{PROJECT}}] \
    #text(size: 10pt, fill: gray)[{{DATE}}]
  ],
)

#v(12pt)
#line(length: 100%, stroke: 0.5pt)

== Byggnadsspecifikation

#table(
  columns: (1fr, auto),
  stroke: none,
  row-gutter: 2pt,
  [Taktyp], [{{ROOF_TYPE}}],
  [Mått (L × B)], [{{LENGTH}} × {{WIDTH}} m],
  [Vägghöjd], [{{WALL_HEIGHT}} m],
  [Total höjd], [{{TOTAL_HEIGHT}} m],
  [Golvyta], [{{FLOOR_AREA}} m²],
  [Takarea], [{{ROOF_AREA}} m²],
  [Väggarea netto], [{{WALL_AREA}} m²],
  [Timmerlängd netto], [{{LOG_LENGTH}} lm],
)

== Material

#table(
  columns: (1fr, auto, auto, auto),
  inset: 6pt,
  stroke: 0.5pt + gray,
  align: (left, right, right, right),
  table.header([*Artikel*], [*Mängd*], [*À-pris*], [*Summa*]),
{{MATERIAL_ROWS}}
)

== Sammanställning

#table(
  columns: (1fr, auto),
  inset: 6pt,
  stroke: none,
  align: (left, right),
  [Material], [{{MATERIAL_SALE}}],
  [Arbete ({{LABOR_HOURS}})], [{{LABOR_COST}}],
  table.hline(stroke: 0.5pt),
  [Summa exkl. moms], [{{EX_VAT}}],
  [Moms {{VAT_PCT}} %], [{{VAT}}],
  table.hline(stroke: 1pt),
  [*Att betala inkl. moms*], [*{{INC_VAT}}*],
)
"##;

/// Escape text for Typst markup
fn escape_typst(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '*' | '_' | '#' | '$' | '@' | '<' | '>' | '\\' | '`' | '[' | ']' | '~' | '=' | '-' | '+'
            | '/' => format!("\\{}", c),
            _ => c.to_string(),
        })
        .collect()
}

/// Category header rows followed by one row per visible item
fn build_material_rows(items: &[LineItem]) -> String {
    let visible: Vec<LineItem> = items
        .iter()
        .filter(|i| i.include && i.quantity > 0.0)
        .cloned()
        .collect();

    let mut rows = String::new();
    for (category, members) in group_by_category(&visible) {
        rows.push_str(&format!(
            "  table.cell(colspan: 4, fill: luma(240))[*{}*],\n",
            escape_typst(category.code())
        ));
        for item in members {
            rows.push_str(&format!(
                "  [{}], [{} {}], [{}], [{}],\n",
                escape_typst(&item.article),
                format_number(item.quantity_with_waste(), 1),
                escape_typst(item.unit.code()),
                format_currency(item.unit_sale_price()),
                format_currency(item.sale_total()),
            ));
        }
    }
    rows
}

/// Build the Typst source of a quote.
fn quote_source(
    project_name: &str,
    inputs: &BuildingInputs,
    calculated: &CalculatedValues,
    items: &[LineItem],
) -> String {
    let totals = calculate_totals(items, inputs);
    let project = escape_typst(project_name);

    QUOTE_TEMPLATE
        .replace("{{PROJECT}}", &project)
        .replace("{{DATE}}", &Utc::now().format("%Y-%m-%d").to_string())
        .replace("{{ROOF_TYPE}}", inputs.roof_type.display_name())
        .replace("{{LENGTH}}", &format_number(inputs.length_m, 2))
        .replace("{{WIDTH}}", &format_number(inputs.width_m, 2))
        .replace("{{WALL_HEIGHT}}", &format_number(inputs.wall_height_m, 2))
        .replace("{{TOTAL_HEIGHT}}", &format_number(calculated.total_height_m, 2))
        .replace("{{FLOOR_AREA}}", &format_number(calculated.inner_area_m2, 1))
        .replace("{{ROOF_AREA}}", &format_number(calculated.roof_area_m2, 1))
        .replace("{{WALL_AREA}}", &format_number(calculated.wall_area_net_m2, 1))
        .replace("{{LOG_LENGTH}}", &format_number(calculated.net_log_length_m, 0))
        .replace("{{MATERIAL_ROWS}}", &build_material_rows(items))
        .replace("{{MATERIAL_SALE}}", &format_currency(totals.material_sale))
        .replace("{{LABOR_HOURS}}", &format_time(totals.labor_hours))
        .replace("{{LABOR_COST}}", &format_currency(totals.labor_cost))
        .replace("{{EX_VAT}}", &format_currency(totals.quote_ex_vat))
        .replace("{{VAT_PCT}}", &format_number(inputs.vat_pct, 0))
        .replace("{{VAT}}", &format_currency(totals.vat))
        .replace("{{INC_VAT}}", &format_currency(totals.quote_inc_vat))
}

/// Render a customer quote to PDF.
///
/// Only included items with a positive quantity are listed; the summary is
/// recomputed from `items` so it always matches the table.
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - PDF file as bytes
/// * `Err(CalcError::Internal)` - Typst compilation or PDF export failed
pub fn render_quote_pdf(
    project_name: &str,
    inputs: &BuildingInputs,
    calculated: &CalculatedValues,
    items: &[LineItem],
) -> CalcResult<Vec<u8>> {
    let source = quote_source(project_name, inputs, calculated, items);

    let world = PdfWorld::new(source);
    let warned = typst::compile(&world);
    let document = warned.output.map_err(|errors| {
        let messages: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::Internal {
            message: format!("Typst compilation failed: {}", messages.join("; ")),
        }
    })?;

    let pdf_bytes = typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
        let messages: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::Internal {
            message: format!("PDF rendering failed: {}", messages.join("; ")),
        }
    })?;

    tracing::info!(project = project_name, bytes = pdf_bytes.len(), "quote rendered");
    Ok(pdf_bytes)
}
