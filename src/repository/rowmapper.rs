//! Row mappers: `(row, prefix) -> record`, reading `{prefix}_{column}` cells.

use super::row::RawRow;
use crate::domain::{GridColumn, GridConfiguration, GridToolbarItem, Identity};
use crate::error::AppResult;

struct Cells<'a> {
    row: &'a RawRow,
    prefix: &'a str,
}

impl<'a> Cells<'a> {
    fn key(&self, column: &str) -> String {
        format!("{}_{}", self.prefix, column)
    }

    fn get<T: serde::de::DeserializeOwned>(&self, column: &str) -> AppResult<Option<T>> {
        self.row.get(&self.key(column))
    }

    fn require<T: serde::de::DeserializeOwned>(&self, column: &str) -> AppResult<T> {
        self.row.require(&self.key(column))
    }

    fn id(&self) -> AppResult<Identity> {
        self.require::<i64>("id").map(Identity::Saved)
    }
}

/// True when the row carries a joined record under `prefix` (LEFT JOIN miss leaves it NULL).
pub fn has_record(row: &RawRow, prefix: &str) -> bool {
    !row.is_null(&format!("{}_id", prefix))
}

pub fn grid_configuration(row: &RawRow, prefix: &str) -> AppResult<GridConfiguration> {
    let c = Cells { row, prefix };
    Ok(GridConfiguration {
        id: c.id()?,
        grid_name: c.require("grid_name")?,
        page_size: c.get("page_size")?,
        pager_allowed_page_sizes: c.get("pager_allowed_page_sizes")?,
        pager_show_page_size_selector: c.get("pager_show_page_size_selector")?,
        pager_show_navigation_buttons: c.get("pager_show_navigation_buttons")?,
        allow_sorting: c.get("allow_sorting")?,
        sorting_mode: c.get("sorting_mode")?,
        allow_filtering: c.get("allow_filtering")?,
        filter_row_visible: c.get("filter_row_visible")?,
        header_filter_visible: c.get("header_filter_visible")?,
        allow_search: c.get("allow_search")?,
        search_panel_visible: c.get("search_panel_visible")?,
        search_panel_width: c.get("search_panel_width")?,
        search_panel_placeholder: c.get("search_panel_placeholder")?,
        allow_column_chooser: c.get("allow_column_chooser")?,
        column_chooser_enabled: c.get("column_chooser_enabled")?,
        column_hiding_enabled: c.get("column_hiding_enabled")?,
        allow_export: c.get("allow_export")?,
        export_enabled: c.get("export_enabled")?,
        export_file_name: c.get("export_file_name")?,
        allow_grouping: c.get("allow_grouping")?,
        group_panel_visible: c.get("group_panel_visible")?,
        allow_column_reordering: c.get("allow_column_reordering")?,
        allow_column_resizing: c.get("allow_column_resizing")?,
        selection_mode: c.get("selection_mode")?,
        selection_allow_select_all: c.get("selection_allow_select_all")?,
        selection_show_check_boxes_mode: c.get("selection_show_check_boxes_mode")?,
        editing_mode: c.get("editing_mode")?,
        editing_allow_adding: c.get("editing_allow_adding")?,
        editing_allow_updating: c.get("editing_allow_updating")?,
        editing_allow_deleting: c.get("editing_allow_deleting")?,
        created_date: c.get("created_date")?,
    })
}

pub fn grid_column(row: &RawRow, prefix: &str) -> AppResult<GridColumn> {
    let c = Cells { row, prefix };
    Ok(GridColumn {
        id: c.id()?,
        data_field: c.require("data_field")?,
        caption: c.get("caption")?,
        visible: c.get("visible")?,
        data_type: c.get("data_type")?,
        format: c.get("format")?,
        width: c.get("width")?,
        allow_sorting: c.get("allow_sorting")?,
        allow_filtering: c.get("allow_filtering")?,
        grid_configuration_id: c.get("grid_configuration_id")?,
    })
}

pub fn grid_toolbar_item(row: &RawRow, prefix: &str) -> AppResult<GridToolbarItem> {
    let c = Cells { row, prefix };
    Ok(GridToolbarItem {
        id: c.id()?,
        location: c.get("location")?,
        widget: c.get("widget")?,
        icon: c.get("icon")?,
        text: c.get("text")?,
        hint: c.get("hint")?,
        on_click_action: c.get("on_click_action")?,
        visible: c.get("visible")?,
        grid_configuration_id: c.get("grid_configuration_id")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn row(v: Value) -> RawRow {
        match v {
            Value::Object(m) => RawRow::new(m),
            _ => unreachable!(),
        }
    }

    #[test]
    fn maps_prefixed_columns() {
        let r = row(json!({
            "e_id": 12,
            "e_data_field": "amount",
            "e_caption": "Amount",
            "e_visible": true,
            "e_width": 120,
            "e_grid_configuration_id": 3,
            "gridConfiguration_id": 3,
            "gridConfiguration_grid_name": "Orders Grid",
            "gridConfiguration_created_date": "2024-05-01T10:00:00+00:00"
        }));
        let column = grid_column(&r, "e").unwrap();
        assert_eq!(column.id, Identity::Saved(12));
        assert_eq!(column.data_field, "amount");
        assert_eq!(column.caption.as_deref(), Some("Amount"));
        assert_eq!(column.width, Some(120));
        assert_eq!(column.format, None);
        assert_eq!(column.grid_configuration_id, Some(3));

        assert!(has_record(&r, "gridConfiguration"));
        let owner = grid_configuration(&r, "gridConfiguration").unwrap();
        assert_eq!(owner.grid_name, "Orders Grid");
        assert!(owner.created_date.is_some());
    }

    #[test]
    fn missing_join_has_no_record() {
        let r = row(json!({ "e_id": 1, "e_location": "before", "gridConfiguration_id": null }));
        assert!(!has_record(&r, "gridConfiguration"));
        let item = grid_toolbar_item(&r, "e").unwrap();
        assert_eq!(item.location.as_deref(), Some("before"));
        assert_eq!(item.grid_configuration_id, None);
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let r = row(json!({ "e_id": 1 }));
        assert!(grid_column(&r, "e").is_err());
        assert!(grid_configuration(&r, "e").is_err());
    }
}
