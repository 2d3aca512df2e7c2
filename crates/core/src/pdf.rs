//! Meal plan PDF export.
//!
//! Exports every meal plan in an inclusive date range into one US Letter document.
//! The first page opens with a title and the range. Each date starts a new page. A meal
//! lists its title, a metadata line and its dishes.
//!
//! [`layout`] decides what goes on which page; [`render`] draws those pages with the
//! built-in Helvetica faces, so no font files are needed.

use crate::config::CoreConfig;
use crate::error::{MealplanError, MealplanResult};
use crate::models::StoredMealPlan;
use crate::paths::pdf::MealPlanPdfPaths;
use crate::repositories::helpers::write_atomic;
use crate::repositories::mealplan::MealPlanService;
use crate::validation::parse_date_range;
use chrono::NaiveDate;
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::path::PathBuf;
use std::sync::Arc;

const DOCUMENT_TITLE: &str = "Meal Plans Export";
const NO_PLANS_TITLE: &str = "No meal plans found";
const NO_PLANS_NOTICE: &str = "No meal plans were found for the specified date range.";

const PAGE_WIDTH: f32 = 215.9;
const PAGE_HEIGHT: f32 = 279.4;
const MARGIN: f32 = 20.0;
/// Points to millimetres.
const PT: f32 = 0.3528;

/// Visual role of a line, which fixes its face, size and spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Title,
    Subtitle,
    MealTitle,
    Meta,
    Heading,
    Body,
    Notice,
}

impl LineStyle {
    fn font_size(self) -> f32 {
        match self {
            LineStyle::Title => 24.0,
            LineStyle::Subtitle | LineStyle::Notice => 14.0,
            LineStyle::MealTitle => 16.0,
            LineStyle::Heading => 12.0,
            LineStyle::Body => 11.0,
            LineStyle::Meta => 10.0,
        }
    }

    fn bold(self) -> bool {
        matches!(
            self,
            LineStyle::Title | LineStyle::MealTitle | LineStyle::Heading
        )
    }

    /// Extra space above the line, in millimetres.
    fn space_before(self) -> f32 {
        match self {
            LineStyle::MealTitle => 10.0,
            LineStyle::Subtitle | LineStyle::Heading => 3.0,
            LineStyle::Notice => 6.0,
            _ => 0.0,
        }
    }

    /// Distance from the previous baseline to this one, in millimetres.
    fn advance(self) -> f32 {
        self.space_before() + self.font_size() * PT * 1.4
    }

    /// Rough character budget for one line at this size. Helvetica averages about half
    /// an em per character.
    fn max_chars(self) -> usize {
        let usable = PAGE_WIDTH - 2.0 * MARGIN;
        (usable / (self.font_size() * PT * 0.5)) as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfLine {
    pub style: LineStyle,
    pub text: String,
}

/// One logical page. [`render`] may spill a long page onto further physical pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PdfPage {
    pub lines: Vec<PdfLine>,
}

impl PdfPage {
    fn push(&mut self, style: LineStyle, text: &str) {
        for chunk in wrap(text, style.max_chars()) {
            self.lines.push(PdfLine { style, text: chunk });
        }
    }
}

#[derive(Clone, Debug)]
pub struct PdfExportService {
    cfg: Arc<CoreConfig>,
    mealplans: MealPlanService,
}

impl PdfExportService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            mealplans: MealPlanService::new(cfg.clone()),
            cfg,
        }
    }

    /// Exports the meal plans dated `start..=end` and writes the PDF, replacing any
    /// earlier export of the same range. A range without plans still yields a document.
    ///
    /// # Returns
    ///
    /// The path written, relative to the data directory.
    ///
    /// # Errors
    ///
    /// - [`crate::ValidationReason::InvalidDate`] for a malformed bound
    /// - [`crate::ValidationReason::InvalidDateRange`] if `end` is before `start`
    /// - [`MealplanError::PdfRender`] if the document cannot be produced
    /// - an I/O error if the file cannot be written
    pub fn export(&self, start: &str, end: &str) -> MealplanResult<PathBuf> {
        let (start, end) = parse_date_range(start, end)?;
        let plans = self.mealplans.plans_in_range(start, end);

        let pages = layout(start, end, &plans);
        let bytes = render(&pages)?;
        let relative = MealPlanPdfPaths::new(start, end).file().to_path_buf();
        write_atomic(&self.cfg.resolve(&relative), &bytes)?;

        tracing::info!(
            path = %relative.display(),
            plans = plans.len(),
            pages = pages.len(),
            "exported meal plans to PDF"
        );
        Ok(relative)
    }
}

/// Lays out `plans` (already in date order) into logical pages.
pub fn layout(start: NaiveDate, end: NaiveDate, plans: &[StoredMealPlan]) -> Vec<PdfPage> {
    let mut first = PdfPage::default();
    first.push(LineStyle::Title, DOCUMENT_TITLE);
    first.push(LineStyle::Subtitle, &format!("{} to {}", start, end));

    if plans.is_empty() {
        first.push(LineStyle::MealTitle, NO_PLANS_TITLE);
        first.push(LineStyle::Notice, NO_PLANS_NOTICE);
        return vec![first];
    }

    let mut pages = Vec::new();
    let mut current = first;
    let mut current_date = None;

    for plan in plans {
        if current_date.is_some_and(|d| d != plan.date) {
            pages.push(std::mem::take(&mut current));
        }
        current_date = Some(plan.date);

        let title = if plan.title.is_empty() {
            crate::constants::DEFAULT_MEAL_TITLE
        } else {
            plan.title.as_str()
        };
        current.push(LineStyle::MealTitle, title);
        current.push(
            LineStyle::Meta,
            &format!(
                "Date: {} | Meal: {} | Cook: {}",
                plan.date.format("%A, %B %d, %Y"),
                capitalise(plan.meal_type.as_str()),
                plan.cook
            ),
        );

        if !plan.dishes.is_empty() {
            current.push(LineStyle::Heading, "Dishes:");
            for dish in &plan.dishes {
                current.push(LineStyle::Body, &format!("- {}", dish.name));
            }
        }
    }
    pages.push(current);
    pages
}

/// Draws logical pages into a PDF document and returns its bytes.
///
/// # Errors
///
/// Returns [`MealplanError::PdfRender`] if a font cannot be registered or the document
/// cannot be serialised.
pub fn render(pages: &[PdfPage]) -> MealplanResult<Vec<u8>> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(DOCUMENT_TITLE, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| MealplanError::PdfRender(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| MealplanError::PdfRender(e.to_string()))?;
    let font = |style: LineStyle| if style.bold() { &bold } else { &regular };

    let top = PAGE_HEIGHT - MARGIN;
    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut y = top;

    for (index, page) in pages.iter().enumerate() {
        if index > 0 {
            let (p, l) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            layer = doc.get_page(p).get_layer(l);
            y = top;
        }

        for line in &page.lines {
            y -= line.style.advance();
            if y < MARGIN {
                let (p, l) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
                layer = doc.get_page(p).get_layer(l);
                y = top - line.style.font_size() * PT * 1.4;
            }
            layer.use_text(
                line.text.as_str(),
                line.style.font_size(),
                Mm(MARGIN),
                Mm(y),
                font(line.style),
            );
        }
    }

    doc.save_to_bytes()
        .map_err(|e| MealplanError::PdfRender(e.to_string()))
}

fn capitalise(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Greedy word wrap to at most `max` characters per line. Words longer than `max` are
/// split.
fn wrap(text: &str, max: usize) -> Vec<String> {
    let max = max.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max {
            if len > 0 {
                lines.push(std::mem::take(&mut line));
                len = 0;
            }
            let rest = word.split_off(max);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        if len > 0 && len + 1 + word.len() > max {
            lines.push(std::mem::take(&mut line));
            len = 0;
        }
        if len > 0 {
            line.push(' ');
            len += 1;
        }
        len += word.len();
        line.extend(word);
    }

    if len > 0 || lines.is_empty() {
        lines.push(line);
    }
    lines
}
