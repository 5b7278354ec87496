use std::collections::BTreeMap;

use html_table_to_sheet::{CellModifier, ColumnOrder, TableOptions};

use crate::error::ApiError;
use crate::models::{Category, PresetResponse};

/// Source column carrying the reference date, rendered with dots on the page
/// but expected with slashes by the spreadsheet templates downstream.
const DATE_COLUMN: usize = 3;

/// The named preset for one portfolio layout. All three share the date
/// normalization; they differ in which source columns land where and in
/// whether the page renders a summary footer.
pub fn options_for(category: Category) -> TableOptions {
    let (column_order, remove_footer_row) = match category {
        Category::Dividendos => (vec![0, 2, 5, 6, 8, DATE_COLUMN], true),
        Category::Fiis => (vec![0, 1, 4, 6, 8, DATE_COLUMN], false),
        Category::Valor => (vec![0, 2, 4, 5, 7, DATE_COLUMN], true),
    };

    TableOptions {
        column_modifiers: BTreeMap::from([(
            DATE_COLUMN,
            CellModifier::replace_all(".", "/"),
        )]),
        column_order: ColumnOrder::indices(column_order),
        remove_footer_row,
        ..TableOptions::default()
    }
}

pub fn preset_summary(category: Category) -> Result<PresetResponse, ApiError> {
    let options = options_for(category);
    let column_order = options.column_order.resolve()?;

    Ok(PresetResponse {
        carteira: category,
        column_order,
        modified_columns: options.column_modifiers.keys().copied().collect(),
        remove_header_row: options.remove_header_row,
        remove_footer_row: options.remove_footer_row,
    })
}
